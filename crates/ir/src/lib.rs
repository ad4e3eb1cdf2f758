//! # Scaffold IR (Intermediate Representation)
//!
//! This crate holds the schema description of a scaffolding run and the
//! relationship graph inferred from it.
//!
//! ## Core Concepts
//!
//! - **Schema**: ordered table name → table definition (singular, columns, indexes)
//! - **SchemaIndex**: read-only lookups by table name and by singular label
//! - **Relationship**: a directional edge between two tables, recorded on its owner
//! - **RelationshipGraph**: the frozen result of inference
//!
//! ## Inference
//!
//! [`inference::infer`] runs detection, disambiguation, and inverse synthesis
//! over a [`SchemaIndex`]. Yes/no questions go through a [`DecisionSource`].

// Module declarations
pub mod inference;
pub mod relationship;
pub mod schema;
pub mod schema_index;
pub mod serialization;
pub mod validation;

// Re-export commonly used types at crate root
pub use inference::{AlwaysDefault, DecisionSource, ScriptedDecisions, infer};
pub use relationship::{REFERENCED_KEY, Relationship, RelationshipGraph, RelationshipSet};
pub use schema::{Argument, Column, IndexColumns, IndexDef, Schema, TableDef};
pub use schema_index::SchemaIndex;
pub use serialization::{
    DEFAULT_SCHEMA_FILE, SchemaFormat, graph_to_json, load_schema, load_schema_from_str,
    write_sample_schema,
};
pub use validation::{ValidationResult, ValidationRule, Validator};

// Re-export core types that are commonly used with IR
pub use scaffold_core::{RelationKind, ScaffoldError, ScaffoldResult, Validatable};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
