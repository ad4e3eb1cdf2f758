//! # Generation Context
//!
//! The `GenerationContext` holds all the information needed by code generators
//! to produce output files. It is built from a `SchemaIndex` and the inferred
//! `RelationshipGraph` and provides convenient accessors and helper methods for:
//!
//! - Tables in declaration order, with pivot tables flagged
//! - Relationship lookups per table
//! - Derived model metadata (class names, `$fillable`, soft deletes)
//! - Namespace and path conversion for generated models
//! - The migration timestamp shared by every migration of a run
//!

use chrono::{DateTime, Utc};
use heck::{ToLowerCamelCase, ToUpperCamelCase};
use scaffold_core::types::SOFT_DELETES;
use scaffold_core::ScaffoldResult;
use scaffold_ir::{Relationship, RelationshipGraph, SchemaIndex, TableDef};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::GeneratorConfig;

// ============================================================================
// GenerationContext
// ============================================================================

/// Context carrying all information needed for code generation.
///
/// Built once per run and shared (by reference) with every individual
/// generator module.
#[derive(Debug, Clone)]
pub struct GenerationContext<'a> {
    // ── inputs ───────────────────────────────────────────────────────────
    index: &'a SchemaIndex,

    graph: &'a RelationshipGraph,

    /// Generator configuration (output dir, flags, …)
    pub generator_config: GeneratorConfig,

    // ── derived ──────────────────────────────────────────────────────────
    /// Tables classified as pivot tables
    pivot_tables: HashSet<String>,

    /// Timestamp used for every migration file name of this run
    pub migration_timestamp: DateTime<Utc>,
}

impl<'a> GenerationContext<'a> {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Build a `GenerationContext` for an indexed schema and its graph.
    ///
    /// Every table is classified as pivot or not; a table name that is
    /// ambiguous as a pivot name aborts generation with `AmbiguousNaming`.
    pub fn new(
        index: &'a SchemaIndex,
        graph: &'a RelationshipGraph,
        generator_config: GeneratorConfig,
    ) -> ScaffoldResult<Self> {
        let mut pivot_tables = HashSet::new();
        for (name, _) in index.all_tables() {
            if index.is_pivot_table(name)? {
                pivot_tables.insert(name.to_string());
            }
        }

        let migration_timestamp = generator_config
            .migration_timestamp
            .unwrap_or_else(Utc::now);

        Ok(Self {
            index,
            graph,
            generator_config,
            pivot_tables,
            migration_timestamp,
        })
    }

    // ====================================================================
    // Table accessors
    // ====================================================================

    /// All tables in declaration order.
    pub fn tables(&self) -> impl Iterator<Item = (&'a str, &'a TableDef)> + use<'a> {
        self.index.all_tables()
    }

    /// Tables that get a model, in declaration order.
    pub fn model_tables(&self) -> impl Iterator<Item = (&'a str, &'a TableDef)> {
        self.tables().filter(|(name, _)| !self.is_pivot(name))
    }

    /// Number of tables.
    pub fn table_count(&self) -> usize {
        self.index.table_count()
    }

    /// Check if a table is a pivot table.
    pub fn is_pivot(&self, table: &str) -> bool {
        self.pivot_tables.contains(table)
    }

    /// Singular label of a table.
    pub fn singular(&self, table: &str) -> ScaffoldResult<&'a str> {
        self.index
            .require_table(table)
            .map(|def| def.singular.as_str())
    }

    /// The indexed schema.
    pub fn index(&self) -> &'a SchemaIndex {
        self.index
    }

    // ====================================================================
    // Relationship accessors
    // ====================================================================

    /// Every relationship recorded on a table, forward and inverse.
    pub fn relationships_for(&self, table: &str) -> &'a [Relationship] {
        self.graph.relationships_for(table)
    }

    /// Forward relationships of a table (those needing a foreign key).
    pub fn foreign_keys_for(&self, table: &str) -> impl Iterator<Item = &'a Relationship> + use<'a> {
        self.graph.foreign_keys_for(table)
    }

    // ====================================================================
    // Model metadata
    // ====================================================================

    /// Column names listed in `$fillable`: every named column, in order.
    pub fn fillable(table: &TableDef) -> Vec<&str> {
        table.column_names().collect()
    }

    /// Check whether a table needs the `SoftDeletes` trait.
    pub fn uses_soft_deletes(table: &TableDef) -> bool {
        table.has_column_type(SOFT_DELETES)
    }

    /// Model namespace, e.g. `App` or `App\Models`.
    pub fn model_namespace(&self) -> &str {
        &self.generator_config.model_namespace
    }

    /// Directory of model files relative to the project root.
    ///
    /// The leading `App` segment maps to `app/`; the remaining segments are
    /// kept as directories.
    pub fn model_dir(&self) -> PathBuf {
        let mut segments = self.model_namespace().split('\\').filter(|s| !s.is_empty());
        let mut dir = PathBuf::from("app");

        match segments.next() {
            Some("App") | None => {}
            Some(first) => dir.push(first),
        }
        for segment in segments {
            dir.push(segment);
        }

        dir
    }

    // ====================================================================
    // Naming
    // ====================================================================

    /// Model class name for a singular label: `blog_post` → `BlogPost`.
    pub fn class_name(singular: &str) -> String {
        singular.to_upper_camel_case()
    }

    /// Fully qualified model class: `\App\BlogPost`.
    pub fn qualified_class(&self, singular: &str) -> String {
        format!("\\{}\\{}", self.model_namespace(), Self::class_name(singular))
    }

    /// Migration class name for a table: `role_user` → `CreateRoleUserTable`.
    pub fn migration_class(table: &str) -> String {
        format!("Create{}Table", table.to_upper_camel_case())
    }

    /// Accessor method name: `blog_posts` → `blogPosts`.
    pub fn method_name(name: &str) -> String {
        name.to_lower_camel_case()
    }

    /// Migration file name for the table at `position` in declaration order.
    ///
    /// `{Y_m_d}_{unix time + position}_create_{table}_table.php`; adding the
    /// position keeps files sorted in declaration order.
    pub fn migration_file_name(&self, position: usize, table: &str) -> String {
        let seconds = self.migration_timestamp.timestamp() + position as i64;
        format!(
            "{}_{}_create_{}_table.php",
            self.migration_timestamp.format("%Y_%m_%d"),
            seconds,
            table
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
