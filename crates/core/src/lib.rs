//! # Scaffold Core
//!
//! Core types, traits, and error handling for Scaffold.
//!
//! This crate provides the foundational building blocks used throughout
//! the workspace, including:
//!
//! - **Types**: Relationship kinds and the static column-type registry
//! - **Traits**: `Validatable`
//! - **Errors**: Unified error handling with `ScaffoldError` and `ScaffoldResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ScaffoldError, ScaffoldResult};
pub use traits::Validatable;
pub use types::{COLUMN_TYPES, ColumnTypeSpec, RelationKind, column_type};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
