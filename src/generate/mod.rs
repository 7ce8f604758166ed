//! # Instance Generation
//!
//! Turns a [`SchemaModel`] into concrete node and edge instances.
//!
//! Randomness is drawn from a caller-supplied generator in a fixed order:
//! node types in declaration order (each instance's properties in declared
//! order), then edge types in declaration order (source before target for
//! each edge). Seeding the generator therefore fixes the whole output.

pub mod synth;

pub use synth::Synthesizer;

use std::ops::Range;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::counts::CountResolver;
use crate::model::{EdgeId, EdgeInstance, NodeId, NodeInstance, PropertyMap};
use crate::schema::{EdgeTypeDef, NodeTypeId, SchemaModel};
use crate::{Error, Result};

/// Instances generated from one schema.
#[derive(Debug, Clone)]
pub struct Generated<'m> {
    pub model: &'m SchemaModel,
    /// Grouped by node type in declaration order, then by ordinal.
    pub nodes: Vec<NodeInstance>,
    /// Grouped by edge type in declaration order.
    pub edges: Vec<EdgeInstance>,
    /// node type index → slice of `nodes`
    ranges: Vec<Range<usize>>,
}

impl<'m> Generated<'m> {
    pub fn node(&self, id: NodeId) -> &NodeInstance {
        &self.nodes[id.0]
    }

    /// Instances of one node type, ordered by ordinal.
    pub fn nodes_of(&self, node_type: NodeTypeId) -> &[NodeInstance] {
        &self.nodes[self.ranges[node_type.0].clone()]
    }

    /// Cypher variable of a generated node, e.g. `PersonType_0`.
    pub fn variable(&self, id: NodeId) -> String {
        let node = self.node(id);
        node.variable(&self.model.node_type(node.node_type).internal_label)
    }

    pub fn edge_type(&self, edge: &EdgeInstance) -> &'m EdgeTypeDef {
        &self.model.edge_types()[edge.edge_type]
    }
}

/// Generate instances for every node type and edge type in `model`.
pub fn generate<'m, R>(
    model: &'m SchemaModel,
    counts: &CountResolver,
    synth: &Synthesizer,
    rng: &mut R,
) -> Result<Generated<'m>>
where
    R: Rng + ?Sized,
{
    for label in counts.unused_overrides(model) {
        warn!(label, "count override names no type in the schema; ignored");
    }

    let mut nodes = Vec::new();
    let mut ranges = Vec::with_capacity(model.node_types().len());

    for (type_idx, node_type) in model.node_types().iter().enumerate() {
        let count = counts.node_count(&node_type.internal_label);
        let start = nodes.len();
        for ordinal in 0..count {
            let properties: PropertyMap = node_type.properties
                .iter()
                .map(|prop| (prop.name.clone(), synth.synthesize(prop.ty, rng)))
                .collect();
            nodes.push(NodeInstance {
                id: NodeId(nodes.len()),
                node_type: NodeTypeId(type_idx),
                ordinal,
                properties,
            });
        }
        debug!(label = %node_type.internal_label, count, "generated nodes");
        ranges.push(start..nodes.len());
    }

    let mut edges = Vec::new();
    for (type_idx, edge_type) in model.edge_types().iter().enumerate() {
        let count = counts.edge_count(&edge_type.internal_label);
        if count == 0 {
            continue;
        }

        let sources = ranges[edge_type.source.0].clone();
        let targets = ranges[edge_type.target.0].clone();
        check_realizable(model, edge_type, sources.len(), targets.len())?;

        for _ in 0..count {
            let src = rng.gen_range(sources.clone());
            let mut dst = rng.gen_range(targets.clone());
            while dst == src {
                dst = rng.gen_range(targets.clone());
            }
            edges.push(EdgeInstance {
                id: EdgeId(edges.len()),
                edge_type: type_idx,
                src: NodeId(src),
                dst: NodeId(dst),
            });
        }
        debug!(label = %edge_type.internal_label, count, "generated edges");
    }

    info!(nodes = nodes.len(), edges = edges.len(), "generation complete");
    Ok(Generated { model, nodes, edges, ranges })
}

/// An edge type with a positive count needs instances at both ends, and two
/// distinct ones when both ends are the same node type.
fn check_realizable(
    model: &SchemaModel,
    edge_type: &EdgeTypeDef,
    sources: usize,
    targets: usize,
) -> Result<()> {
    let insufficient = |reason: String| Error::InsufficientInstances {
        edge: edge_type.internal_label.clone(),
        reason,
    };

    for (end, id, n) in [("source", edge_type.source, sources), ("target", edge_type.target, targets)] {
        if n == 0 {
            return Err(insufficient(format!(
                "{end} type {} has no instances",
                model.node_type(id).internal_label
            )));
        }
    }
    if edge_type.is_self_referencing() && sources < 2 {
        return Err(insufficient(format!(
            "{} has a single instance, so every edge would be a self-loop",
            model.node_type(edge_type.source).internal_label
        )));
    }
    Ok(())
}
