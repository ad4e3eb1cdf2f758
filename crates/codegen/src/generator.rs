//! # Code Generator Orchestrator
//!
//! The `Generator` is the top-level entry point for code generation. It takes
//! a [`Schema`] and a [`GeneratorConfig`], validates the schema, infers the
//! relationship graph, builds a [`GenerationContext`], and delegates to the
//! migration and model generators to produce a complete [`GeneratedProject`].
//!
//! ## Pipeline
//!
//! ```text
//! Schema + GeneratorConfig
//!         │
//!         ▼
//!   Validator::with_default_rules()
//!         │
//!         ▼
//!   SchemaIndex → inference::infer()   (asks the DecisionSource)
//!         │
//!         ▼
//!   GenerationContext::new()
//!         │
//!         ├──► migrations::generate_migrations() → Vec<GeneratedFile>
//!         ├──► models::generate_models()         → Vec<GeneratedFile>
//!         │
//!         ▼
//!   GeneratedProject { files, relationships, warnings }
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scaffold_codegen::{Generator, GeneratorConfig};
//! use scaffold_ir::{AlwaysDefault, load_schema};
//!
//! let schema = load_schema("scaffold.json")?;
//! let generator = Generator::new(GeneratorConfig::default());
//!
//! let (output, report) = generator.generate_and_write(schema, &mut AlwaysDefault)?;
//! println!("Wrote {} files", report.written.len());
//! ```

use scaffold_core::{RelationKind, ScaffoldResult, Validatable};
use scaffold_ir::inference::candidate_table;
use scaffold_ir::{DecisionSource, Schema, SchemaIndex, infer};

use crate::context::GenerationContext;
use crate::migrations;
use crate::models;
use crate::{FileType, GeneratedProject, GeneratorConfig, WriteReport};

// ============================================================================
// Generator
// ============================================================================

/// Top-level code generator that orchestrates the full generation pipeline.
///
/// The `Generator` is stateless aside from its configuration.
#[derive(Debug, Clone)]
pub struct Generator {
    /// Configuration controlling output behaviour (output dir, flags, etc.).
    config: GeneratorConfig,
}

impl Generator {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Create a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.config = config;
    }

    // ====================================================================
    // Generation
    // ====================================================================

    /// Run the full pipeline on a schema description.
    ///
    /// # Steps
    ///
    /// 1. **Validate** the schema; any violation aborts the run.
    /// 2. **Infer** the relationship graph, asking `decisions` to confirm
    ///    each one-to-many relationship.
    /// 3. **Generate migrations** (one per table) when enabled.
    /// 4. **Generate models** (one per non-pivot table) when enabled.
    /// 5. **Collect warnings** about columns that look like foreign keys
    ///    but reference no table.
    pub fn generate(
        &self,
        schema: Schema,
        decisions: &mut dyn DecisionSource,
    ) -> ScaffoldResult<GeneratedProject> {
        // ── 1. Validate ──────────────────────────────────────────────────
        schema.validate()?;

        // ── 2. Infer relationships ───────────────────────────────────────
        let index = SchemaIndex::new(schema);
        let graph = infer(&index, decisions)?;

        // ── 3. Build context ─────────────────────────────────────────────
        let ctx = GenerationContext::new(&index, &graph, self.config.clone())?;
        let mut output = GeneratedProject::new(graph.clone());

        // ── 4. Emit files ────────────────────────────────────────────────
        if self.config.create_migrations {
            for file in migrations::generate_migrations(&ctx) {
                output.add_file(file);
            }
        }

        if self.config.create_models {
            for file in models::generate_models(&ctx)? {
                output.add_file(file);
            }
        }

        // ── 5. Collect warnings ──────────────────────────────────────────
        for warning in unresolved_reference_warnings(&index) {
            output.add_warning(warning);
        }

        tracing::info!(
            files = output.file_count(),
            relationships = graph.len(),
            warnings = output.warnings.len(),
            "code generation complete",
        );

        Ok(output)
    }

    // ====================================================================
    // Convenience: generate and write to disk
    // ====================================================================

    /// Generate files and write them to the configured output directory.
    ///
    /// Overwrite prompts go through the same decision source used for
    /// relationship disambiguation.
    pub fn generate_and_write(
        &self,
        schema: Schema,
        decisions: &mut dyn DecisionSource,
    ) -> ScaffoldResult<(GeneratedProject, WriteReport)> {
        let output = self.generate(schema, decisions)?;
        let report =
            output.write_to_disk(&self.config.output_dir, self.config.overwrite, decisions)?;
        tracing::info!(
            output_dir = %self.config.output_dir.display(),
            written = report.written.len(),
            skipped = report.skipped.len(),
            "files written to disk",
        );
        Ok((output, report))
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Integer `*_id` columns whose referenced table is missing.
///
/// Irregular plurals (`category_id` → `categorys`) are the usual cause.
fn unresolved_reference_warnings(index: &SchemaIndex) -> Vec<String> {
    let mut warnings = Vec::new();
    for (table_name, table) in index.all_tables() {
        for column in &table.columns {
            let Some(referenced) = candidate_table(column) else {
                continue;
            };
            if !index.contains_table(&referenced) {
                warnings.push(format!(
                    "Column '{}.{}' looks like a foreign key but there is no '{}' table; no relationship was created.",
                    table_name,
                    column.name().unwrap_or_default(),
                    referenced
                ));
            }
        }
    }
    warnings
}

// ============================================================================
// Standalone convenience function
// ============================================================================

/// Generate files from a schema using default configuration.
///
/// This is a shorthand for `Generator::with_defaults().generate(schema, decisions)`.
pub fn generate(
    schema: Schema,
    decisions: &mut dyn DecisionSource,
) -> ScaffoldResult<GeneratedProject> {
    Generator::with_defaults().generate(schema, decisions)
}

// ============================================================================
// GenerationSummary
// ============================================================================

/// A human-readable summary of a completed generation run.
///
/// Use [`summarize`] to produce a `GenerationSummary` from a `GeneratedProject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Total number of files generated.
    pub total_files: usize,
    /// Number of migration files.
    pub migration_files: usize,
    /// Number of model files.
    pub model_files: usize,
    /// Number of relationships in the graph (forward and inverse).
    pub relationships: usize,
    /// Number of many-to-many relationships.
    pub many_to_many: usize,
    /// Number of warnings.
    pub warning_count: usize,
}

impl GenerationSummary {
    /// Build a summary from a generated project.
    pub fn from_project(project: &GeneratedProject) -> Self {
        Self {
            total_files: project.file_count(),
            migration_files: project.files_by_type(FileType::Migration).len(),
            model_files: project.files_by_type(FileType::Model).len(),
            relationships: project.relationships.len(),
            many_to_many: project.relationships.count_kind(RelationKind::BelongsToMany),
            warning_count: project.warnings.len(),
        }
    }

    /// Format the summary as a human-readable string.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(512);

        out.push_str("╔══════════════════════════════════════════════════╗\n");
        out.push_str("║         Scaffolding Complete                     ║\n");
        out.push_str("╠══════════════════════════════════════════════════╣\n");
        out.push_str(&format!("║  Total Files:   {:<33}║\n", self.total_files));
        out.push_str(&format!("║    Migrations:  {:<33}║\n", self.migration_files));
        out.push_str(&format!("║    Models:      {:<33}║\n", self.model_files));
        out.push_str(&format!("║  Relationships: {:<33}║\n", self.relationships));
        out.push_str(&format!("║    Many-many:   {:<33}║\n", self.many_to_many));
        out.push_str(&format!("║  Warnings:      {:<33}║\n", self.warning_count));
        out.push_str("╚══════════════════════════════════════════════════╝\n");

        out
    }
}

impl std::fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Produce a [`GenerationSummary`] from a [`GeneratedProject`].
pub fn summarize(project: &GeneratedProject) -> GenerationSummary {
    GenerationSummary::from_project(project)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OverwritePolicy;
    use chrono::{TimeZone, Utc};
    use scaffold_core::ScaffoldError;
    use scaffold_ir::{AlwaysDefault, Column, ScriptedDecisions, TableDef};
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Helper: users, profiles, roles and their pivot.
    fn schema() -> Schema {
        Schema::new()
            .with_table(
                "users",
                TableDef::new("user")
                    .with_column(Column::new("id", "increments"))
                    .with_column(Column::new("name", "string"))
                    .with_column(Column::unnamed("softDeletes")),
            )
            .with_table(
                "profiles",
                TableDef::new("profile")
                    .with_column(Column::new("id", "increments"))
                    .with_column(Column::new("user_id", "integer").with_modifier("unsigned", "")),
            )
            .with_table(
                "roles",
                TableDef::new("role").with_column(Column::new("id", "increments")),
            )
            .with_table(
                "role_user",
                TableDef::new("role_user")
                    .with_column(Column::new("role_id", "integer"))
                    .with_column(Column::new("user_id", "integer")),
            )
    }

    fn config(dir: &std::path::Path) -> GeneratorConfig {
        GeneratorConfig::new()
            .with_output_dir(dir)
            .with_migration_timestamp(Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_generate_full_schema() {
        let output = generate(schema(), &mut AlwaysDefault).unwrap();

        // 4 migrations, 3 models (no pivot model)
        assert_eq!(output.files_by_type(FileType::Migration).len(), 4);
        assert_eq!(output.files_by_type(FileType::Model).len(), 3);
        assert_eq!(output.relationships.len(), 6);
        assert!(!output.has_warnings());
    }

    #[test]
    fn test_invalid_schema_is_rejected() {
        let schema = Schema::new().with_table("users", TableDef::new(""));
        let mut decisions = ScriptedDecisions::default();

        let err = generate(schema, &mut decisions).unwrap_err();
        assert!(err.is_validation());
        assert!(decisions.asked().is_empty());
    }

    #[test]
    fn test_ambiguous_table_aborts() {
        let schema = Schema::new()
            .with_table(
                "users",
                TableDef::new("user").with_column(Column::new("id", "increments")),
            )
            .with_table(
                "user_login_events",
                TableDef::new("user_login_event").with_column(Column::new("user_id", "integer")),
            );

        let err = generate(schema, &mut AlwaysDefault).unwrap_err();
        assert!(err.is_fatal_inference());
    }

    #[test]
    fn test_ambiguous_table_without_foreign_keys_aborts() {
        let schema = Schema::new()
            .with_table(
                "users",
                TableDef::new("user").with_column(Column::new("id", "increments")),
            )
            .with_table(
                "password_reset_tokens",
                TableDef::new("password_reset_token").with_column(Column::new("email", "string")),
            );

        let err = generate(schema, &mut AlwaysDefault).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::AmbiguousNaming { ref table } if table == "password_reset_tokens"
        ));
    }

    #[test]
    fn test_flags_disable_outputs() {
        let generator = Generator::new(GeneratorConfig::new().without_models());
        let output = generator.generate(schema(), &mut AlwaysDefault).unwrap();
        assert_eq!(output.file_count(), 4);

        let generator = Generator::new(GeneratorConfig::new().without_migrations());
        let output = generator.generate(schema(), &mut AlwaysDefault).unwrap();
        assert_eq!(output.files_by_type(FileType::Model).len(), 3);
        assert_eq!(output.file_count(), 3);
    }

    #[test]
    fn test_unresolved_reference_warning() {
        let schema = Schema::new()
            .with_table(
                "categories",
                TableDef::new("category").with_column(Column::new("id", "increments")),
            )
            .with_table(
                "posts",
                TableDef::new("post").with_column(Column::new("category_id", "integer")),
            );

        let output = generate(schema, &mut AlwaysDefault).unwrap();
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].contains("'categorys'"));
        assert!(output.relationships.is_empty());
    }

    #[test]
    fn test_generate_and_write() {
        let temp_dir = TempDir::new().unwrap();
        let generator = Generator::new(config(temp_dir.path()));

        let (output, report) = generator
            .generate_and_write(schema(), &mut AlwaysDefault)
            .unwrap();
        assert_eq!(report.written.len(), output.file_count());

        let user = std::fs::read_to_string(temp_dir.path().join("app/User.php")).unwrap();
        assert!(user.contains("use SoftDeletes;"));
        assert!(user.contains("public function profiles()"));
        assert!(user.contains("public function roles()"));
        assert!(!temp_dir.path().join("app/RoleUser.php").exists());

        let migrations: Vec<PathBuf> = std::fs::read_dir(temp_dir.path().join("database/migrations"))
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(migrations.len(), 4);
    }

    #[test]
    fn test_rerun_keeps_existing_files_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let generator = Generator::new(config(temp_dir.path()));
        generator
            .generate_and_write(schema(), &mut AlwaysDefault)
            .unwrap();

        // same timestamp, so every file collides; every overwrite prompt defaults to "no"
        let (_, report) = generator
            .generate_and_write(schema(), &mut AlwaysDefault)
            .unwrap();
        assert!(report.written.is_empty());
        assert_eq!(report.skipped.len(), 7);

        let generator = Generator::new(config(temp_dir.path()).with_overwrite(OverwritePolicy::Always));
        let (_, report) = generator
            .generate_and_write(schema(), &mut AlwaysDefault)
            .unwrap();
        assert_eq!(report.written.len(), 7);
    }

    #[test]
    fn test_disambiguation_and_overwrite_share_decisions() {
        let temp_dir = TempDir::new().unwrap();
        let generator = Generator::new(config(temp_dir.path()));
        generator
            .generate_and_write(schema(), &mut AlwaysDefault)
            .unwrap();

        // yes to "Profiles belong to Users", then yes to the first overwrite only
        let mut decisions = ScriptedDecisions::new([true, true]);
        let (_, report) = generator
            .generate_and_write(schema(), &mut decisions)
            .unwrap();

        assert_eq!(decisions.asked()[0], "Profiles belong to Users (one to many)");
        assert!(decisions.asked()[1].starts_with("Migration "));
        assert_eq!(report.written.len(), 1);
        assert_eq!(report.skipped.len(), 6);
    }

    #[test]
    fn test_generation_summary() {
        let output = generate(schema(), &mut AlwaysDefault).unwrap();
        let summary = summarize(&output);

        assert_eq!(
            summary,
            GenerationSummary {
                total_files: 7,
                migration_files: 4,
                model_files: 3,
                relationships: 6,
                many_to_many: 4,
                warning_count: 0,
            }
        );
        assert!(summary.to_string().contains("Scaffolding Complete"));
    }
}
