//! Build a network and report synapse counts

use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::config::NetworkDescription;
use crate::error::CliResult;
use crate::network::build_network;

/// Build a network description and report edge counts
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Network description (TOML)
    pub network: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl BuildCommand {
    pub fn execute(self) -> CliResult<()> {
        info!("Building network from {}", self.network.display());
        let description = NetworkDescription::load_from_file(&self.network)?;
        let network = build_network(&description)?;
        let report = network.registry.report();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("Nodes:       {}", report.num_nodes);
        println!("Workers:     {}", report.edges_per_worker.len());
        println!("Connections: {}", report.total_edges);
        for (name, count) in &report.edges_per_type {
            println!("  {:<24} {}", name, count);
        }
        for (worker, count) in report.edges_per_worker.iter().enumerate() {
            println!("  worker {:<17} {}", worker, count);
        }
        Ok(())
    }
}
