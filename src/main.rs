//! Scaffold
//!
//! Infers table relationships from a schema description and writes Laravel
//! migrations and Eloquent models.

use clap::Parser;
use scaffold_cli::{Cli, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    scaffold_cli::run(cli)
}
