//! Loading schema descriptions and exporting relationship graphs
//!
//! Schema descriptions are JSON or TOML documents chosen by file extension.
//! Both keep table declaration order.

use crate::relationship::RelationshipGraph;
use crate::schema::Schema;
use scaffold_core::{ScaffoldError, ScaffoldResult};
use std::path::{Path, PathBuf};

// ============================================================================
// Constants
// ============================================================================

/// Schema file looked up when none is given
pub const DEFAULT_SCHEMA_FILE: &str = "scaffold.json";

/// Sample schema written by `scaffold init`
pub const SAMPLE_SCHEMA: &str = include_str!("sample_schema.json");

// ============================================================================
// SchemaFormat
// ============================================================================

/// On-disk format of a schema description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Toml,
}

impl SchemaFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: impl AsRef<Path>) -> ScaffoldResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(SchemaFormat::Json),
            "toml" => Ok(SchemaFormat::Toml),
            _ => Err(ScaffoldError::UnsupportedSchemaFormat(
                path.display().to_string(),
            )),
        }
    }

    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            SchemaFormat::Json => "json",
            SchemaFormat::Toml => "toml",
        }
    }
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load a schema description from a file
///
/// # Example
///
/// ```rust,ignore
/// use scaffold_ir::load_schema;
///
/// let schema = load_schema("scaffold.json")?;
/// println!("{} tables", schema.len());
/// ```
pub fn load_schema(path: impl AsRef<Path>) -> ScaffoldResult<Schema> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ScaffoldError::SchemaNotFound(path.to_path_buf()));
    }

    let format = SchemaFormat::from_path(path)?;

    let text = std::fs::read_to_string(path).map_err(|e| ScaffoldError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let schema = load_schema_from_str(&text, format).map_err(|e| match e {
        ScaffoldError::Json(_) | ScaffoldError::Toml(_) => ScaffoldError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid schema file: {}", e),
        },
        other => other,
    })?;

    tracing::debug!("Loaded {} table(s) from {}", schema.len(), path.display());
    Ok(schema)
}

/// Parse a schema description from a string
pub fn load_schema_from_str(text: &str, format: SchemaFormat) -> ScaffoldResult<Schema> {
    let schema = match format {
        SchemaFormat::Json => serde_json::from_str(text)?,
        SchemaFormat::Toml => toml::from_str(text)?,
    };
    Ok(schema)
}

// ============================================================================
// Export Functions
// ============================================================================

/// Serialize a finalized relationship graph as pretty JSON
pub fn graph_to_json(graph: &RelationshipGraph) -> ScaffoldResult<String> {
    Ok(serde_json::to_string_pretty(graph)?)
}

/// Write the sample schema to `path`, refusing to overwrite an existing file
pub fn write_sample_schema(path: impl AsRef<Path>) -> ScaffoldResult<PathBuf> {
    let path = path.as_ref();
    if path.exists() {
        return Err(ScaffoldError::FileWrite {
            path: path.to_path_buf(),
            message: "file already exists".to_string(),
        });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ScaffoldError::DirectoryCreate {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, SAMPLE_SCHEMA).map_err(|e| ScaffoldError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(path.to_path_buf())
}

// ============================================================================
// Tests
// ============================================================================
