//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ikigai")]
#[command(about = "Ikigai - find where what you love meets what the world needs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (interactive session when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Additional YAML configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Answer with a canned analysis instead of calling the service
    #[arg(long, global = true)]
    pub dry_run: bool,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Interactive)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Walk through the three screens interactively
    Interactive,

    /// Analyze an input file in one shot
    Analyze(InputArgs),

    /// Print the prompt that would be sent for an input file
    Prompt(InputArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct InputArgs {
    /// Input file (YAML or JSON) with love, goodAt, paid, needs, values,
    /// constraints and energyLevel
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,
}
