//! CLI command implementations for snn-connect

use clap::{Parser, Subcommand};
use crate::error::CliResult;

pub mod build;
pub mod query;
pub mod types;

/// snn-connect - build and inspect partitioned synaptic connection registries
#[derive(Parser, Debug)]
#[command(
    name = "snn-connect",
    version,
    about = "Build and query synaptic connection registries",
    long_about = "snn-connect constructs a spiking network's connectivity from a TOML \
                  description (populations, synapse types, connection rules) over a fixed \
                  number of workers, then reports edge counts or prints filtered \
                  connection lists in a deterministic order."
)]
pub struct ConnectCli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a network and report edge counts
    Build(build::BuildCommand),

    /// Build a network and print matching connections
    #[command(alias = "get-connections")]
    Query(query::QueryCommand),

    /// List registered synapse types and their defaults
    Types(types::TypesCommand),
}

impl ConnectCli {
    /// Execute the CLI command
    pub fn execute(self) -> CliResult<()> {
        match self.command {
            Commands::Build(cmd) => cmd.execute(),
            Commands::Query(cmd) => cmd.execute(),
            Commands::Types(cmd) => cmd.execute(),
        }
    }
}
