//! Command implementations
//!
//! Each command writes its results to `out` and returns an error instead of
//! exiting, so the binary decides how failures are reported. Questions and
//! notes go through a [`DecisionSource`], which the binary points at the
//! terminal.

use anyhow::{Context, bail};
use colored::Colorize;
use scaffold_codegen::{Generator, WriteReport, summarize};
use scaffold_core::ScaffoldError;
use scaffold_ir::{
    DecisionSource, RelationshipGraph, Schema, SchemaIndex, Validator, graph_to_json, infer,
    load_schema, write_sample_schema,
};
use std::io::Write;
use std::path::Path;

use crate::args::{MakeArgs, OutputFormat, RelationshipsArgs, SchemaArgs};
use crate::config::{self, FileConfig};

// ============================================================================
// Shared helpers
// ============================================================================

/// Load `scaffold.toml` (explicit or discovered from `cwd`).
fn load_config(args: &SchemaArgs, cwd: &Path) -> anyhow::Result<FileConfig> {
    Ok(config::load(args.config.as_deref(), cwd)?)
}

/// Load the schema description named by the arguments or the configuration.
pub fn read_schema(args: &SchemaArgs, file: &FileConfig) -> anyhow::Result<Schema> {
    let path = config::schema_path(args, file);

    match load_schema(&path) {
        Ok(schema) => Ok(schema),
        Err(ScaffoldError::SchemaNotFound(path)) => bail!(
            "Expected the schema file {} to exist but it is missing; run `scaffold init` to create a sample",
            path.display()
        ),
        Err(e) => Err(e.into()),
    }
}

fn check(schema: &Schema) -> anyhow::Result<()> {
    Validator::with_default_rules()
        .validate_result(schema)
        .context("The schema description is invalid")
}

// ============================================================================
// make
// ============================================================================

/// Validate, infer relationships, and write migrations and models.
pub fn make(
    args: &MakeArgs,
    cwd: &Path,
    decisions: &mut dyn DecisionSource,
    out: &mut dyn Write,
) -> anyhow::Result<WriteReport> {
    let file = load_config(&args.schema, cwd)?;
    let schema = read_schema(&args.schema, &file)?;
    let generator = Generator::new(config::generator_config(args, &file));

    let (project, report) = generator.generate_and_write(schema, decisions)?;

    for warning in &project.warnings {
        writeln!(out, "{} {}", "warning:".yellow().bold(), warning)?;
    }

    for path in &report.written {
        writeln!(out, "{} {}", "created".green(), path.display())?;
    }
    for path in &report.skipped {
        writeln!(out, "{} {}", "skipped".dimmed(), path.display())?;
    }

    write!(out, "{}", summarize(&project))?;

    Ok(report)
}

// ============================================================================
// relationships
// ============================================================================

/// Print the inferred relationship graph as JSON or text.
pub fn relationships(
    args: &RelationshipsArgs,
    cwd: &Path,
    decisions: &mut dyn DecisionSource,
    out: &mut dyn Write,
) -> anyhow::Result<RelationshipGraph> {
    let file = load_config(&args.schema, cwd)?;
    let schema = read_schema(&args.schema, &file)?;
    check(&schema)?;

    let index = SchemaIndex::new(schema);
    let graph = infer(&index, decisions)?;

    match args.format {
        OutputFormat::Json => writeln!(out, "{}", graph_to_json(&graph)?)?,
        OutputFormat::Text => write!(out, "{}", render_graph(&graph))?,
    }

    Ok(graph)
}

/// One line per relationship, grouped by owning table
pub fn render_graph(graph: &RelationshipGraph) -> String {
    let mut text = String::new();
    let mut current: Option<&str> = None;

    for (table, relationship) in graph.iter() {
        if current != Some(table) {
            text.push_str(&format!("{}\n", table.bold()));
            current = Some(table);
        }

        let via = match &relationship.foreign_column {
            Some(column) => format!(" via {column}"),
            None => String::new(),
        };

        text.push_str(&format!(
            "  {} {} {} ({}){}\n",
            relationship.kind.method_name(),
            relationship.kind.arrow_symbol(),
            relationship.on,
            relationship.kind.display_name(),
            via,
        ));
    }

    text
}

// ============================================================================
// validate
// ============================================================================

/// Check the schema description and list every problem found.
pub fn validate(args: &SchemaArgs, cwd: &Path, out: &mut dyn Write) -> anyhow::Result<()> {
    let file = load_config(args, cwd)?;
    let path = config::schema_path(args, &file);
    let schema = read_schema(args, &file)?;

    let result = Validator::with_default_rules().validate(&schema);
    if result.has_errors() {
        for error in &result.errors {
            writeln!(out, "{} {}", "error:".red().bold(), error)?;
        }
        bail!(
            "{} has {} problem(s)",
            path.display(),
            result.errors.len()
        );
    }

    writeln!(
        out,
        "{} {} is valid ({} tables)",
        "✓".green(),
        path.display(),
        schema.len()
    )?;
    Ok(())
}

// ============================================================================
// pivot
// ============================================================================

/// Tell whether `table` names a pivot table of the schema.
pub fn pivot(
    table: &str,
    args: &SchemaArgs,
    cwd: &Path,
    out: &mut dyn Write,
) -> anyhow::Result<bool> {
    let file = load_config(args, cwd)?;
    let index = SchemaIndex::new(read_schema(args, &file)?);

    let is_pivot = index.is_pivot_table(table)?;
    if is_pivot {
        writeln!(out, "{table} is a pivot table")?;
    } else {
        writeln!(out, "{table} is not a pivot table")?;
    }

    Ok(is_pivot)
}

// ============================================================================
// init
// ============================================================================

/// Write the sample schema description.
pub fn init(path: &Path, out: &mut dyn Write) -> anyhow::Result<()> {
    let written = write_sample_schema(path)?;
    writeln!(
        out,
        "Wrote a sample schema to {}; edit it, then run `scaffold make`",
        written.display()
    )?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_ir::{AlwaysDefault, ScriptedDecisions};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn project_with_sample() -> (TempDir, PathBuf) {
        colored::control::set_override(false);
        let temp_dir = TempDir::new().unwrap();
        let schema = temp_dir.path().join("scaffold.json");
        init(&schema, &mut Vec::new()).unwrap();
        (temp_dir, schema)
    }

    fn schema_args(schema: &Path) -> SchemaArgs {
        SchemaArgs {
            schema: Some(schema.to_path_buf()),
            config: None,
        }
    }

    fn output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let (_temp_dir, schema) = project_with_sample();
        assert!(init(&schema, &mut Vec::new()).is_err());
    }

    #[test]
    fn test_validate_sample() {
        let (temp_dir, schema) = project_with_sample();
        let mut out = Vec::new();

        validate(&schema_args(&schema), temp_dir.path(), &mut out).unwrap();
        assert!(output(out).contains("is valid (5 tables)"));
    }

    #[test]
    fn test_validate_lists_every_problem() {
        let temp_dir = TempDir::new().unwrap();
        let schema = temp_dir.path().join("broken.json");
        std::fs::write(
            &schema,
            r#"{ "users": { "singular": "user", "columns": [ { "name": "id" }, { "name": "email", "type": "strang" } ] } }"#,
        )
        .unwrap();

        let mut out = Vec::new();
        let err = validate(&schema_args(&schema), temp_dir.path(), &mut out).unwrap_err();
        assert!(err.to_string().contains("2 problem(s)"));
        assert_eq!(output(out).matches("error:").count(), 2);
    }

    #[test]
    fn test_missing_schema_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let schema = temp_dir.path().join("missing.json");

        let err = validate(&schema_args(&schema), temp_dir.path(), &mut Vec::new()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing.json"));
        assert!(message.contains("scaffold init"));
    }

    #[test]
    fn test_relationships_text() {
        let (temp_dir, schema) = project_with_sample();
        let args = RelationshipsArgs {
            schema: schema_args(&schema),
            yes: true,
            format: OutputFormat::Text,
        };

        let mut out = Vec::new();
        let graph = relationships(&args, temp_dir.path(), &mut AlwaysDefault, &mut out).unwrap();
        let text = output(out);

        assert!(!graph.is_empty());
        assert!(text.contains("belongsTo * >─── 1 users (Belongs To) via user_id"));
        assert!(text.contains("belongsToMany"));
    }

    #[test]
    fn test_relationships_json_with_answers() {
        let (temp_dir, schema) = project_with_sample();
        let args = RelationshipsArgs {
            schema: schema_args(&schema),
            ..RelationshipsArgs::default()
        };

        // A profile does not belong to many users, nor does it have one user
        let mut decisions = ScriptedDecisions::new([false, false]);
        let mut out = Vec::new();
        relationships(&args, temp_dir.path(), &mut decisions, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["profiles"][0]["kind"], "belongsTo");
        assert_eq!(json["users"][0]["kind"], "hasOne");
        assert_eq!(decisions.notes().len(), 2);
    }

    #[test]
    fn test_pivot() {
        let (temp_dir, schema) = project_with_sample();
        let mut out = Vec::new();

        assert!(pivot("role_user", &schema_args(&schema), temp_dir.path(), &mut out).unwrap());
        assert!(!pivot("users", &schema_args(&schema), temp_dir.path(), &mut out).unwrap());
        assert!(pivot("user_role_archive", &schema_args(&schema), temp_dir.path(), &mut out).is_err());

        let text = output(out);
        assert!(text.contains("role_user is a pivot table"));
        assert!(text.contains("users is not a pivot table"));
    }

    #[test]
    fn test_make_writes_files() {
        let (temp_dir, schema) = project_with_sample();
        let args = MakeArgs {
            schema: schema_args(&schema),
            out: Some(temp_dir.path().to_path_buf()),
            yes: true,
            ..MakeArgs::default()
        };

        let mut out = Vec::new();
        let report = make(&args, temp_dir.path(), &mut AlwaysDefault, &mut out).unwrap();

        // 5 migrations, 4 models (role_user is a pivot)
        assert_eq!(report.written.len(), 9);
        assert!(temp_dir.path().join("app/User.php").exists());
        assert!(temp_dir.path().join("database/migrations").is_dir());

        let text = output(out);
        assert!(text.contains("Scaffolding Complete"));
        assert!(text.contains("created"));
    }

    #[test]
    fn test_make_uses_config_file() {
        let (temp_dir, _schema) = project_with_sample();
        std::fs::write(
            temp_dir.path().join("scaffold.toml"),
            "output_dir = \"site\"\ncreate_migrations = false\n",
        )
        .unwrap();

        let args = MakeArgs {
            schema: schema_args(&temp_dir.path().join("scaffold.json")),
            ..MakeArgs::default()
        };

        let report = make(&args, temp_dir.path(), &mut AlwaysDefault, &mut Vec::new()).unwrap();
        assert_eq!(report.written.len(), 4);
        assert!(temp_dir.path().join("site/app/Post.php").exists());
        assert!(!temp_dir.path().join("site/database").exists());
    }
}
