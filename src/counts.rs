//! Instance counts per label.
//!
//! A [`CountResolver`] merges an override table (`label,count` rows) with a
//! default node count and a default edge count. Overrides always win.
//!
//! ```text
//! PostType,12
//! KnowsType,7
//! ```

use std::collections::HashMap;
use std::io::Read;

use csv::StringRecord;

use tracing::{debug, warn};

use crate::schema::SchemaModel;
use crate::{Error, Result};

/// Which default a label falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Node,
    Edge,
}

/// Resolves the number of instances to generate for each internal label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountResolver {
    overrides: HashMap<String, usize>,
    default_nodes: usize,
    default_edges: usize,
}

impl CountResolver {
    pub fn new(default_nodes: usize, default_edges: usize) -> Self {
        Self { overrides: HashMap::new(), default_nodes, default_edges }
    }

    pub fn with_override(mut self, label: impl Into<String>, count: usize) -> Self {
        self.insert(label, count);
        self
    }

    /// Set an override; a later value for the same label replaces the earlier.
    pub fn insert(&mut self, label: impl Into<String>, count: usize) {
        self.overrides.insert(label.into(), count);
    }

    pub fn extend<I, S>(&mut self, rows: I)
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        for (label, count) in rows {
            self.insert(label, count);
        }
    }

    pub fn default_for(&self, kind: LabelKind) -> usize {
        match kind {
            LabelKind::Node => self.default_nodes,
            LabelKind::Edge => self.default_edges,
        }
    }

    pub fn count(&self, label: &str, kind: LabelKind) -> usize {
        self.overrides
            .get(label)
            .copied()
            .unwrap_or_else(|| self.default_for(kind))
    }

    pub fn node_count(&self, label: &str) -> usize {
        self.count(label, LabelKind::Node)
    }

    pub fn edge_count(&self, label: &str) -> usize {
        self.count(label, LabelKind::Edge)
    }

    /// Override labels that name no type in `model`. These are ignored.
    pub fn unused_overrides<'a>(&'a self, model: &SchemaModel) -> Vec<&'a str> {
        let mut unused: Vec<&str> = self.overrides
            .keys()
            .map(String::as_str)
            .filter(|label| !model.contains_label(label))
            .collect();
        unused.sort_unstable();
        unused
    }
}

// ============================================================================
// Override table
// ============================================================================

/// Open a count table: no header, ragged rows allowed, cells trimmed.
fn table_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn record_line(record: &StringRecord) -> usize {
    record.position().map_or(0, |p| p.line() as usize)
}

fn csv_error(e: csv::Error) -> Error {
    let line = e.position().map_or(0, |p| p.line() as usize);
    let message = e.to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        _ => Error::CountTable { line, message },
    }
}

/// Interpret one table record. Records whose cells are all empty yield `None`.
pub fn parse_record(record: &StringRecord) -> Result<Option<(String, usize)>> {
    if record.iter().all(str::is_empty) {
        return Ok(None);
    }

    let line = record_line(record);
    let label = record.get(0).unwrap_or_default();
    let Some(count) = record.get(1) else {
        return Err(Error::CountTable {
            line,
            message: format!("expected 'label,count', got '{}'", record.iter().collect::<Vec<_>>().join(",")),
        });
    };
    if label.is_empty() {
        return Err(Error::CountTable { line, message: "empty label".into() });
    }
    let count = count.parse::<usize>().map_err(|e| Error::CountTable {
        line,
        message: format!("invalid count '{count}' for {label}: {e}"),
    })?;

    Ok(Some((label.to_string(), count)))
}

/// Read a count table, skipping malformed rows with a warning.
///
/// Header rows such as `label,count` fall out as malformed and are skipped.
pub fn read_table<R: Read>(reader: R) -> Result<Vec<(String, usize)>> {
    let mut rows = Vec::new();
    for result in table_reader(reader).records() {
        let parsed = result.map_err(csv_error).and_then(|record| parse_record(&record));
        match parsed {
            Ok(Some(row)) => rows.push(row),
            Ok(None) => {}
            Err(Error::Io(e)) => return Err(Error::Io(e)),
            Err(e) => warn!("skipping count row: {e}"),
        }
    }
    debug!(rows = rows.len(), "count table loaded");
    Ok(rows)
}

/// Read a count table, failing on the first malformed row.
pub fn read_table_strict<R: Read>(reader: R) -> Result<Vec<(String, usize)>> {
    let mut rows = Vec::new();
    for result in table_reader(reader).records() {
        if let Some(row) = parse_record(&result.map_err(csv_error)?)? {
            rows.push(row);
        }
    }
    Ok(rows)
}
