//! # Scaffold CLI
//!
//! Command-line interface for Scaffold.
//!
//! ## Commands
//!
//! - `make` - Confirm relationships and write migrations and models
//! - `relationships` - Print the inferred relationship graph
//! - `validate` - Validate a schema description
//! - `pivot` - Tell whether a table name denotes a pivot table
//! - `init` - Write a sample schema description
//!
//! Configuration comes from `scaffold.toml` (see [`config`]) with command
//! line flags taking precedence.

pub mod args;
pub mod commands;
pub mod config;
pub mod logging;
pub mod prompt;

pub use args::{Cli, Command};
pub use prompt::TerminalDecisions;

use scaffold_ir::{AlwaysDefault, DecisionSource};
use std::io::Write;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Answer with defaults when `yes` is set, otherwise ask on the terminal.
pub fn decision_source(yes: bool) -> Box<dyn DecisionSource> {
    if yes {
        Box::new(AlwaysDefault)
    } else {
        Box::new(TerminalDecisions::stdio())
    }
}

/// Run a parsed command line against the current directory.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    tracing::debug!("{} {} in {}", NAME, VERSION, cwd.display());

    match cli.command {
        Command::Make(args) => {
            let mut decisions = decision_source(args.yes);
            commands::make(&args, &cwd, decisions.as_mut(), &mut out)?;
        }
        Command::Relationships(args) => {
            let mut decisions = decision_source(args.yes);
            commands::relationships(&args, &cwd, decisions.as_mut(), &mut out)?;
        }
        Command::Validate(args) => commands::validate(&args, &cwd, &mut out)?,
        Command::Pivot { table, schema } => {
            commands::pivot(&table, &schema, &cwd, &mut out)?;
        }
        Command::Init { path } => commands::init(&path, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
