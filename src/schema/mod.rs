//! # PG-Schema
//!
//! Parses a `CREATE GRAPH TYPE` definition into a [`SchemaModel`].
//! Pure functions — no I/O, no state.

pub mod lexer;
pub mod scanner;
pub mod fragment;
pub mod builder;
pub mod types;

pub use types::{
    SchemaModel, NodeTypeDef, EdgeTypeDef, PropertyDef, PropertyType, NodeTypeId,
};

use tracing::{debug, info};

use crate::Result;
use builder::SchemaBuilder;

/// Parse schema text into a model.
pub fn parse(text: &str) -> Result<SchemaModel> {
    let scan = scanner::scan(text)?;
    debug!(graph = %scan.graph_name, "scanning graph type");

    let mut builder = SchemaBuilder::new(scan.graph_name);
    for decl in scan.declarations {
        builder.push(fragment::classify(decl))?;
    }
    let model = builder.finish()?;
    info!(
        graph = %model.graph_name,
        node_types = model.node_types().len(),
        edge_types = model.edge_types().len(),
        "schema parsed"
    );
    Ok(model)
}
