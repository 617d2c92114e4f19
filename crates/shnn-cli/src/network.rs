//! Building a connection registry from a network description

use shnn_connect::{ConnectionRegistry, NodeId, NodeRange, SynapseSpec};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::{NetworkDescription, NodeSelector};
use crate::error::{CliError, CliResult};

/// A registry built from a description, with its named populations
#[derive(Debug)]
pub struct BuiltNetwork {
    pub registry: ConnectionRegistry,
    pub populations: BTreeMap<String, NodeRange>,
}

impl BuiltNetwork {
    /// Resolve a selector to node ids
    pub fn select(&self, selector: &NodeSelector) -> CliResult<Vec<NodeId>> {
        let range = self.populations.get(&selector.population).ok_or_else(|| {
            CliError::config(format!("Unknown population '{}'", selector.population))
        })?;
        Ok(range.slice(selector.start, selector.stop, selector.step))
    }
}

/// Create populations, synapse types and connections in description order
///
/// A single set of per-worker random streams, seeded from the registry
/// config, is shared by all connection calls.
pub fn build_network(description: &NetworkDescription) -> CliResult<BuiltNetwork> {
    let mut network = BuiltNetwork {
        registry: ConnectionRegistry::new(description.registry.clone())?,
        populations: BTreeMap::new(),
    };

    for population in &description.populations {
        let range = network.registry.create_nodes(population.size)?;
        debug!("Population '{}' -> {}", population.name, range);
        network.populations.insert(population.name.clone(), range);
    }

    for synapse_type in &description.synapse_types {
        let overrides: Vec<(&str, f64)> = synapse_type
            .params
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        network
            .registry
            .clone_type(&synapse_type.base, &synapse_type.name, &overrides)?;
        debug!("Synapse type '{}' cloned from '{}'", synapse_type.name, synapse_type.base);
    }

    let mut rngs = network.registry.random_streams();
    for connection in &description.connections {
        let sources = network.select(&connection.sources)?;
        let targets = network.select(&connection.targets)?;
        let spec = connection
            .params
            .iter()
            .fold(SynapseSpec::new(connection.synapse.as_str()), |spec, (name, value)| {
                spec.with_param(name.as_str(), *value)
            });

        let created = network
            .registry
            .connect(connection.rule, &sources, &targets, &spec, &mut rngs)?;
        info!(
            "Connected {} -> {} with {} ({}): {} edges",
            connection.sources.population,
            connection.targets.population,
            connection.rule,
            connection.synapse,
            created
        );
    }

    Ok(network)
}
