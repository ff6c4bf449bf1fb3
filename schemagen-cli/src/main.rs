//! schemagen CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use schemagen::observability;
use schemagen_cli_lib::{GenerateCommand, TemplatesCommand};

#[derive(Parser)]
#[command(name = "schemagen")]
#[command(version)]
#[command(about = "Generate JPA entities, repositories, services and controllers from table metadata", long_about = None)]
struct Cli {
    /// Log more detail (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render Java sources for every table in a schema document
    Generate(GenerateCommand),
    /// Inspect and customize the source templates
    Templates {
        #[command(subcommand)]
        command: TemplatesCommand,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose);

    match cli.command {
        Commands::Generate(command) => {
            command.execute()?;
        }
        Commands::Templates { command } => {
            command.execute()?;
        }
    }

    Ok(())
}
