//! Typed schema model: node types, edge types, and their properties.
//!
//! Built once by the builder and read-only afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declared type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyType {
    String,
    Int,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::String => "STRING",
            PropertyType::Int => "INT",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a type token outside `{STRING, INT}`; carries the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPropertyType(pub String);

impl FromStr for PropertyType {
    type Err = UnknownPropertyType;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("STRING") {
            Ok(PropertyType::String)
        } else if s.eq_ignore_ascii_case("INT") {
            Ok(PropertyType::Int)
        } else {
            Err(UnknownPropertyType(s.to_string()))
        }
    }
}

/// A property declared on a node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub ty: PropertyType,
}

/// Index of a node type within its [`SchemaModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeTypeId(pub usize);

/// A node type: `(InternalLabel: DisplayLabel {prop TYPE, ...})`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTypeDef {
    pub internal_label: String,
    pub display_label: String,
    pub properties: Vec<PropertyDef>,
}

/// An edge type: `(:Src)-[InternalLabel: DisplayLabel]->(:Dst)`.
///
/// Endpoints are indices into the owning model's node types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeTypeDef {
    pub internal_label: String,
    pub display_label: String,
    pub source: NodeTypeId,
    pub target: NodeTypeId,
}

impl EdgeTypeDef {
    pub fn is_self_referencing(&self) -> bool {
        self.source == self.target
    }
}

/// The parsed graph type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaModel {
    pub graph_name: String,
    node_types: Vec<NodeTypeDef>,
    edge_types: Vec<EdgeTypeDef>,
}

impl SchemaModel {
    /// Assemble a model. Edge endpoints must already index into `node_types`.
    pub(crate) fn new(
        graph_name: String,
        node_types: Vec<NodeTypeDef>,
        edge_types: Vec<EdgeTypeDef>,
    ) -> Self {
        debug_assert!(edge_types.iter().all(|e| {
            e.source.0 < node_types.len() && e.target.0 < node_types.len()
        }));
        Self { graph_name, node_types, edge_types }
    }

    /// Node types in declaration order.
    pub fn node_types(&self) -> &[NodeTypeDef] {
        &self.node_types
    }

    /// Edge types in declaration order.
    pub fn edge_types(&self) -> &[EdgeTypeDef] {
        &self.edge_types
    }

    pub fn node_type(&self, id: NodeTypeId) -> &NodeTypeDef {
        &self.node_types[id.0]
    }

    /// Look up a node type by internal label.
    pub fn find_node_type(&self, internal_label: &str) -> Option<(NodeTypeId, &NodeTypeDef)> {
        self.node_types
            .iter()
            .enumerate()
            .find(|(_, n)| n.internal_label == internal_label)
            .map(|(i, n)| (NodeTypeId(i), n))
    }

    /// All internal labels, node types first, each group in declaration order.
    pub fn internal_labels(&self) -> impl Iterator<Item = &str> {
        self.node_types
            .iter()
            .map(|n| n.internal_label.as_str())
            .chain(self.edge_types.iter().map(|e| e.internal_label.as_str()))
    }

    pub fn contains_label(&self, internal_label: &str) -> bool {
        self.internal_labels().any(|l| l == internal_label)
    }
}
