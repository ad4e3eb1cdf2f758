//! Command-line arguments

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Infer table relationships from a schema description and generate
/// Laravel migrations and Eloquent models.
#[derive(Debug, Parser)]
#[command(name = "scaffold", version, about, long_about = None)]
pub struct Cli {
    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the schema, confirm relationships, and write migrations and models
    Make(MakeArgs),

    /// Print the inferred relationship graph
    Relationships(RelationshipsArgs),

    /// Validate the schema description only
    Validate(SchemaArgs),

    /// Tell whether a table name denotes a pivot table
    Pivot {
        /// Table name, e.g. `role_user`
        table: String,

        #[command(flatten)]
        schema: SchemaArgs,
    },

    /// Write a sample schema description to get started
    Init {
        /// Where to write the sample
        #[arg(default_value = scaffold_ir::DEFAULT_SCHEMA_FILE)]
        path: PathBuf,
    },
}

/// Where the schema description comes from
#[derive(Debug, Clone, Default, Args)]
pub struct SchemaArgs {
    /// Schema description file (.json or .toml)
    #[arg(short, long, env = "SCAFFOLD_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Configuration file (defaults to scaffold.toml in this or a parent directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments of `scaffold make`
#[derive(Debug, Clone, Default, Args)]
pub struct MakeArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Root of the Laravel project
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Accept the default answer to every question
    #[arg(short, long)]
    pub yes: bool,

    /// Overwrite existing files without asking
    #[arg(short, long)]
    pub force: bool,

    /// Do not generate migrations
    #[arg(long)]
    pub no_migrations: bool,

    /// Do not generate models
    #[arg(long)]
    pub no_models: bool,

    /// Namespace of generated models, e.g. `App\Models` or `App/Models`
    #[arg(long)]
    pub model_namespace: Option<String>,
}

/// Arguments of `scaffold relationships`
#[derive(Debug, Clone, Default, Args)]
pub struct RelationshipsArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Accept the default answer to every question
    #[arg(short, long)]
    pub yes: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Output format of `scaffold relationships`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_make() {
        let cli = Cli::parse_from([
            "scaffold",
            "make",
            "--schema",
            "db/scaffold.toml",
            "--yes",
            "--no-models",
            "--model-namespace",
            "App/Models",
            "-v",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Command::Make(args) => {
                assert_eq!(args.schema.schema, Some(PathBuf::from("db/scaffold.toml")));
                assert!(args.yes);
                assert!(args.no_models);
                assert!(!args.no_migrations);
                assert!(!args.force);
                assert_eq!(args.model_namespace.as_deref(), Some("App/Models"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_pivot_and_init() {
        let cli = Cli::parse_from(["scaffold", "pivot", "role_user"]);
        assert!(matches!(cli.command, Command::Pivot { ref table, .. } if table == "role_user"));

        let cli = Cli::parse_from(["scaffold", "init"]);
        assert!(matches!(cli.command, Command::Init { ref path } if path == &PathBuf::from("scaffold.json")));
    }

    #[test]
    fn test_relationships_format() {
        let cli = Cli::parse_from(["scaffold", "relationships", "--format", "text"]);
        match cli.command {
            Command::Relationships(args) => assert_eq!(args.format, OutputFormat::Text),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
