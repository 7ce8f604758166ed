//! Random property values.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::model::Value;
use crate::schema::PropertyType;

/// Draws random values for declared property types.
///
/// STRING values are uppercase ASCII letters, each drawn independently;
/// INT values are uniform over an inclusive range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesizer {
    string_len: usize,
    int_range: RangeInclusive<i64>,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self { string_len: 8, int_range: 1..=1000 }
    }
}

impl Synthesizer {
    /// Returns `None` when `int_range` is empty.
    pub fn new(string_len: usize, int_range: RangeInclusive<i64>) -> Option<Self> {
        if int_range.is_empty() {
            return None;
        }
        Some(Self { string_len, int_range })
    }

    pub fn synthesize<R: Rng + ?Sized>(&self, ty: PropertyType, rng: &mut R) -> Value {
        match ty {
            PropertyType::String => Value::String(
                (0..self.string_len)
                    .map(|_| char::from(rng.gen_range(b'A'..=b'Z')))
                    .collect(),
            ),
            PropertyType::Int => Value::Int(rng.gen_range(self.int_range.clone())),
        }
    }
}
