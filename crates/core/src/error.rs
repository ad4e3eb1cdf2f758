//! Error types for Scaffold
//!
//! This module provides unified error handling across the workspace,
//! covering relationship inference failures, schema validation, IO,
//! and serialization errors.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Scaffold
#[derive(Debug, Error)]
pub enum ScaffoldError {
    // ========================================================================
    // Inference Errors
    // ========================================================================
    /// A pivot-candidate table name has more than two underscore-separated parts
    #[error(
        "Table '{table}' has multiple underscores in its name; pivot tables must be named <singular>_<singular>"
    )]
    AmbiguousNaming { table: String },

    /// No table carries the singular label a pivot table refers to
    #[error("No table has the singular name '{singular}' referenced by pivot table '{table}'")]
    UnresolvedSingular { singular: String, table: String },

    /// Table not found in the schema
    #[error("Table not found: {0}")]
    TableNotFound(String),

    // ========================================================================
    // Schema Errors
    // ========================================================================
    /// Schema validation failed
    #[error("Schema validation error: {0}")]
    Validation(String),

    /// Schema file could not be found
    #[error("Schema file not found at path: {0}")]
    SchemaNotFound(PathBuf),

    /// Schema file extension is not a supported format
    #[error("Unsupported schema format '{0}' (expected .json or .toml)")]
    UnsupportedSchemaFormat(String),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON (de)serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ScaffoldError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ScaffoldError::Validation(msg.into())
    }

    /// Create an ambiguous pivot naming error
    pub fn ambiguous_naming(table: impl Into<String>) -> Self {
        ScaffoldError::AmbiguousNaming {
            table: table.into(),
        }
    }

    /// Create an unresolved singular error
    pub fn unresolved_singular(singular: impl Into<String>, table: impl Into<String>) -> Self {
        ScaffoldError::UnresolvedSingular {
            singular: singular.into(),
            table: table.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        ScaffoldError::Internal(msg.into())
    }

    /// Check if this error aborts relationship inference.
    ///
    /// Partial relationship graphs are never emitted after one of these.
    pub fn is_fatal_inference(&self) -> bool {
        matches!(
            self,
            ScaffoldError::AmbiguousNaming { .. }
                | ScaffoldError::UnresolvedSingular { .. }
                | ScaffoldError::TableNotFound(_)
        )
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, ScaffoldError::Validation(_))
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ScaffoldError::Io(_)
                | ScaffoldError::FileRead { .. }
                | ScaffoldError::FileWrite { .. }
                | ScaffoldError::DirectoryCreate { .. }
                | ScaffoldError::SchemaNotFound(_)
        )
    }
}

/// Result type alias using ScaffoldError
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

// ============================================================================
// Tests
// ============================================================================
