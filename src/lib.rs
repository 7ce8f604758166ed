//! # pgschema-gen — Synthetic Graphs from PG-Schema
//!
//! Reads a PG-Schema graph type (node types with typed properties, edge
//! types bound to source/target node types) and emits a Cypher script that
//! creates a configurable number of randomly populated instances of each.
//!
//! ## Pipeline
//!
//! ```text
//! schema text → scanner → fragments → builder → SchemaModel
//!   → generator (+ synthesizer) → instances → export → Cypher lines
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pgschema_gen::{CountResolver, Synthesizer, generate_script};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! # fn example() -> pgschema_gen::Result<()> {
//! let schema = "CREATE GRAPH TYPE Social STRICT {
//!     (PersonType: Person {name STRING, age INT}),
//!     (:PersonType)-[KnowsType: knows]->(:PersonType)
//! }";
//! let counts = CountResolver::new(3, 2);
//! let mut rng = StdRng::seed_from_u64(7);
//! let script = generate_script(schema, &counts, &Synthesizer::default(), &mut rng)?;
//! assert_eq!(script.nodes.len(), 3);
//! assert_eq!(script.edges.len(), 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! Parsing, generation, and rendering are pure: no file or environment
//! access happens outside the binary.

// ============================================================================
// Modules
// ============================================================================

pub mod schema;
pub mod model;
pub mod counts;
pub mod generate;
pub mod export;

// ============================================================================
// Re-exports
// ============================================================================

pub use schema::{
    SchemaModel, NodeTypeDef, EdgeTypeDef, PropertyDef, PropertyType, NodeTypeId,
};
pub use model::{Value, PropertyMap, NodeInstance, NodeId, EdgeInstance, EdgeId};
pub use counts::{CountResolver, LabelKind};
pub use generate::{Generated, Synthesizer};
pub use export::Script;

use rand::Rng;

// ============================================================================
// Top-level entry point
// ============================================================================

/// Parse `schema_text`, generate instances, and render them as a Cypher script.
///
/// Fails fast on the first error; nothing is rendered unless every phase
/// succeeds.
pub fn generate_script<R>(
    schema_text: &str,
    counts: &CountResolver,
    synth: &Synthesizer,
    rng: &mut R,
) -> Result<Script>
where
    R: Rng + ?Sized,
{
    // Phase 1: Parse
    let model = schema::parse(schema_text)?;

    // Phase 2: Generate
    let generated = generate::generate(&model, counts, synth, rng)?;

    // Phase 3: Render
    Ok(export::render(&generated))
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Schema syntax error at position {position}: {message}")]
    SchemaSyntax { position: usize, message: String },

    #[error("Duplicate label: {label}")]
    DuplicateLabel { label: String },

    #[error("Unknown label '{label}' referenced by edge type {edge}")]
    UnknownLabel { edge: String, label: String },

    #[error("Unsupported type '{token}' for property {property}")]
    UnsupportedType { property: String, token: String },

    #[error("Insufficient instances for edge type {edge}: {reason}")]
    InsufficientInstances { edge: String, reason: String },

    #[error("Count table error on line {line}: {message}")]
    CountTable { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
