//! PropertyMap — the key-value store on generated nodes.

use indexmap::IndexMap;
use super::Value;

/// Property names to values, in declaration order.
pub type PropertyMap = IndexMap<String, Value>;
