//! Schema model builder.
//!
//! Node types are built as soon as their fragment arrives. Edge fragments are
//! parked until the whole body has been read, then resolved against a
//! label → node type table, so declaration order never matters.

use std::collections::HashMap;

use tracing::debug;

use crate::{Error, Result};
use super::fragment::{EdgeFragment, Fragment, NodeFragment};
use super::types::{EdgeTypeDef, NodeTypeDef, NodeTypeId, PropertyDef, PropertyType, SchemaModel};

/// Accumulates fragments into a [`SchemaModel`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    graph_name: String,
    node_types: Vec<NodeTypeDef>,
    node_index: HashMap<String, NodeTypeId>,
    pending_edges: Vec<EdgeFragment>,
}

impl SchemaBuilder {
    pub fn new(graph_name: impl Into<String>) -> Self {
        Self { graph_name: graph_name.into(), ..Self::default() }
    }

    /// Feed one classified fragment. Invalid fragments fail immediately.
    pub fn push(&mut self, fragment: Fragment) -> Result<()> {
        match fragment {
            Fragment::Node(node) => self.push_node(node),
            Fragment::Edge(edge) => {
                debug!(label = %edge.internal_label, "deferring edge type");
                self.pending_edges.push(edge);
                Ok(())
            }
            Fragment::Invalid(bad) => Err(bad.into_error()),
        }
    }

    fn push_node(&mut self, node: NodeFragment) -> Result<()> {
        if self.node_index.contains_key(&node.internal_label) {
            return Err(Error::DuplicateLabel { label: node.internal_label });
        }

        let properties = node.properties
            .into_iter()
            .map(|raw| {
                let ty = raw.type_token.parse::<PropertyType>().map_err(|_| Error::UnsupportedType {
                    property: format!("{}.{}", node.internal_label, raw.name),
                    token: raw.type_token.clone(),
                })?;
                Ok(PropertyDef { name: raw.name, ty })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            label = %node.internal_label,
            display = %node.display_label,
            properties = properties.len(),
            "node type"
        );

        let id = NodeTypeId(self.node_types.len());
        self.node_index.insert(node.internal_label.clone(), id);
        self.node_types.push(NodeTypeDef {
            internal_label: node.internal_label,
            display_label: node.display_label,
            properties,
        });
        Ok(())
    }

    /// Resolve parked edge types and freeze the model.
    pub fn finish(self) -> Result<SchemaModel> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.pending_edges.len());
        let mut edge_types = Vec::with_capacity(self.pending_edges.len());

        for edge in &self.pending_edges {
            let label = edge.internal_label.as_str();
            if self.node_index.contains_key(label) || seen.contains(&label) {
                return Err(Error::DuplicateLabel { label: label.to_string() });
            }
            seen.push(label);

            let resolve = |endpoint: &str| {
                self.node_index.get(endpoint).copied().ok_or_else(|| Error::UnknownLabel {
                    edge: edge.internal_label.clone(),
                    label: endpoint.to_string(),
                })
            };
            let source = resolve(&edge.source_label)?;
            let target = resolve(&edge.target_label)?;

            debug!(
                label = %edge.internal_label,
                source = %edge.source_label,
                target = %edge.target_label,
                "edge type"
            );
            edge_types.push(EdgeTypeDef {
                internal_label: edge.internal_label.clone(),
                display_label: edge.display_label.clone(),
                source,
                target,
            });
        }

        Ok(SchemaModel::new(self.graph_name, self.node_types, edge_types))
    }
}
