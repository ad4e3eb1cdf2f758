//! # Scaffold Codegen
//!
//! Code generation for Laravel projects.
//!
//! This crate turns a validated schema description and its inferred
//! relationship graph into PHP source files.
//!
//! ## Features
//!
//! - **Migration Generation**: one `Schema::create` migration per table,
//!   including pivot tables, with foreign-key constraints
//! - **Model Generation**: one Eloquent model per non-pivot table with
//!   `$fillable`, soft deletes, and relationship accessors
//! - **File Writing**: existing files are only replaced after confirmation
//!

// ============================================================================
// Modules
// ============================================================================

pub mod context;
pub mod generator;
pub mod migrations;
pub mod models;

// ============================================================================
// Re-exports
// ============================================================================

pub use context::GenerationContext;
pub use generator::{GenerationSummary, Generator, generate, summarize};

use chrono::{DateTime, Utc};
use scaffold_core::{ScaffoldError, ScaffoldResult};
use scaffold_ir::{DecisionSource, RelationshipGraph};
use std::path::{Path, PathBuf};

/// Namespace models are generated in when none is configured
pub const DEFAULT_MODEL_NAMESPACE: &str = "App";

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the code generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Root of the Laravel project files are written into
    pub output_dir: PathBuf,

    /// Whether to generate migrations
    pub create_migrations: bool,

    /// Whether to generate models
    pub create_models: bool,

    /// PHP namespace of generated models (`App`, `App\Models`, ...)
    pub model_namespace: String,

    /// Fixed timestamp for migration file names (defaults to now)
    pub migration_timestamp: Option<DateTime<Utc>>,

    /// What to do when a generated file already exists
    pub overwrite: OverwritePolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            create_migrations: true,
            create_models: true,
            model_namespace: DEFAULT_MODEL_NAMESPACE.to_string(),
            migration_timestamp: None,
            overwrite: OverwritePolicy::Ask,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Disable migration generation
    pub fn without_migrations(mut self) -> Self {
        self.create_migrations = false;
        self
    }

    /// Disable model generation
    pub fn without_models(mut self) -> Self {
        self.create_models = false;
        self
    }

    /// Set the model namespace; forward slashes become backslashes
    pub fn with_model_namespace(mut self, namespace: impl AsRef<str>) -> Self {
        self.model_namespace = normalize_namespace(namespace.as_ref());
        self
    }

    /// Pin the migration timestamp
    pub fn with_migration_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.migration_timestamp = Some(timestamp);
        self
    }

    /// Set the overwrite policy
    pub fn with_overwrite(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    /// Replace existing files without asking
    pub fn allow_overwrite(self) -> Self {
        self.with_overwrite(OverwritePolicy::Always)
    }
}

/// Replace `/` with `\` and trim stray separators and whitespace
pub fn normalize_namespace(namespace: &str) -> String {
    let namespace = namespace.replace('/', "\\");
    let trimmed = namespace.trim_matches(|c: char| c == '\\' || c.is_whitespace());
    if trimmed.is_empty() {
        DEFAULT_MODEL_NAMESPACE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// What to do when a generated file already exists on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Ask the decision source (default answer: keep the existing file)
    #[default]
    Ask,
    /// Always replace
    Always,
    /// Never replace
    Never,
}

// ============================================================================
// GeneratedFile
// ============================================================================

/// Represents a single generated file
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Relative path from the project root
    pub path: PathBuf,

    /// File content
    pub content: String,

    /// File type for categorization
    pub file_type: FileType,
}

impl GeneratedFile {
    /// Create a new generated file
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, file_type: FileType) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            file_type,
        }
    }

    /// Create a migration file
    pub fn migration(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileType::Migration)
    }

    /// Create a model file
    pub fn model(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileType::Model)
    }

    /// Get the file extension
    pub fn extension(&self) -> &str {
        self.file_type.extension()
    }
}

/// Type of generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Migration,
    Model,
}

impl FileType {
    /// Get the file extension for this type
    pub fn extension(&self) -> &str {
        "php"
    }

    /// Label used in overwrite prompts
    pub fn label(&self) -> &'static str {
        match self {
            FileType::Migration => "Migration",
            FileType::Model => "Model",
        }
    }
}

// ============================================================================
// GeneratedProject
// ============================================================================

/// Collection of all generated files for a schema
#[derive(Debug, Clone, Default)]
pub struct GeneratedProject {
    /// All generated files
    pub files: Vec<GeneratedFile>,

    /// The relationship graph the files were generated from
    pub relationships: RelationshipGraph,

    /// Warnings generated during code generation
    pub warnings: Vec<String>,
}

impl GeneratedProject {
    /// Create an empty project for a relationship graph
    pub fn new(relationships: RelationshipGraph) -> Self {
        Self {
            files: Vec::new(),
            relationships,
            warnings: Vec::new(),
        }
    }

    /// Add a file to the project
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Get the number of files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get files by type
    pub fn files_by_type(&self, file_type: FileType) -> Vec<&GeneratedFile> {
        self.files
            .iter()
            .filter(|f| f.file_type == file_type)
            .collect()
    }

    /// Write all files under `base_dir`
    ///
    /// Files with empty contents are skipped. Existing files are handled
    /// according to `policy`; with [`OverwritePolicy::Ask`] the decision
    /// source is asked and defaults to keeping the file.
    pub fn write_to_disk(
        &self,
        base_dir: impl AsRef<Path>,
        policy: OverwritePolicy,
        decisions: &mut dyn DecisionSource,
    ) -> ScaffoldResult<WriteReport> {
        let base_dir = base_dir.as_ref();
        let mut report = WriteReport::default();

        for file in &self.files {
            if file.content.is_empty() {
                continue;
            }

            let full_path = base_dir.join(&file.path);

            if full_path.exists() {
                let replace = match policy {
                    OverwritePolicy::Always => true,
                    OverwritePolicy::Never => false,
                    OverwritePolicy::Ask => decisions.confirm(
                        &format!(
                            "{} {} already exists. Overwrite?",
                            file.file_type.label(),
                            full_path.display()
                        ),
                        false,
                    ),
                };

                if !replace {
                    tracing::warn!("Kept existing file {}", full_path.display());
                    report.skipped.push(full_path);
                    continue;
                }
            }

            // Create parent directories
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ScaffoldError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }

            std::fs::write(&full_path, &file.content).map_err(|e| ScaffoldError::FileWrite {
                path: full_path.clone(),
                message: e.to_string(),
            })?;

            tracing::info!("Wrote file {}", full_path.display());
            report.written.push(full_path);
        }

        Ok(report)
    }
}

// ============================================================================
// WriteReport
// ============================================================================

/// Outcome of [`GeneratedProject::write_to_disk`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Files written (new or replaced)
    pub written: Vec<PathBuf>,

    /// Existing files left untouched
    pub skipped: Vec<PathBuf>,
}

impl WriteReport {
    /// Total number of files considered
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
