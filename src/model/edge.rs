//! Generated edge instance.

use serde::{Deserialize, Serialize};
use super::NodeId;

/// Opaque edge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

/// One instance of an edge type. `src != dst` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeInstance {
    pub id: EdgeId,
    /// Index into the schema's edge types.
    pub edge_type: usize,
    pub src: NodeId,
    pub dst: NodeId,
}
