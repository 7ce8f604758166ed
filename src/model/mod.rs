//! # Generated Graph Model
//!
//! DTOs for the instances produced from a schema.
//! This module is pure data — no I/O, no randomness.

pub mod node;
pub mod edge;
pub mod value;
pub mod property_map;

pub use node::{NodeInstance, NodeId};
pub use edge::{EdgeInstance, EdgeId};
pub use value::Value;
pub use property_map::PropertyMap;
