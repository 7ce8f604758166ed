//! Generated node instance.

use serde::{Deserialize, Serialize};
use crate::schema::NodeTypeId;
use super::PropertyMap;

/// Identity of a generated node: its position in the generated node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One instance of a node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInstance {
    pub id: NodeId,
    pub node_type: NodeTypeId,
    /// Zero-based, unique within `node_type`.
    pub ordinal: usize,
    pub properties: PropertyMap,
}

impl NodeInstance {
    /// Cypher variable for this instance, e.g. `PersonType_3`.
    pub fn variable(&self, internal_label: &str) -> String {
        format!("{internal_label}_{}", self.ordinal)
    }
}
