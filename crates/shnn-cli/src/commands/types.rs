//! List synapse types of a network description

use clap::Args;
use std::path::PathBuf;

use crate::config::NetworkDescription;
use crate::error::CliResult;
use crate::network::build_network;

/// List registered synapse types and their default parameters
#[derive(Args, Debug)]
pub struct TypesCommand {
    /// Network description (TOML)
    pub network: PathBuf,
}

impl TypesCommand {
    pub fn execute(self) -> CliResult<()> {
        let description = NetworkDescription::load_from_file(&self.network)?;
        let network = build_network(&description)?;

        for ty in network.registry.synapse_types() {
            let params = ty
                .defaults
                .entries()
                .into_iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join(" ");
            println!("{:>3} {:<24} {:<16} {}", ty.id.raw(), ty.name, ty.model(), params);
        }
        Ok(())
    }
}
