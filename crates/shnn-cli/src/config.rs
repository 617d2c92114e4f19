//! TOML network descriptions
//!
//! A description lists populations, derived synapse types and connection
//! calls, in the order a construction script would issue them:
//!
//! ```toml
//! [registry]
//! num_workers = 2
//! seed = 42
//!
//! [[populations]]
//! name = "neurons"
//! size = 100
//!
//! [[synapse_types]]
//! name = "static"
//! base = "static_synapse"
//! params = { weight = 2.0 }
//!
//! [[connections]]
//! rule = "one_to_one"
//! synapse = "static"
//! sources = { population = "neurons", start = 0, stop = 70, step = 2 }
//! targets = { population = "neurons", start = 1, stop = 70, step = 2 }
//! ```

use serde::{Deserialize, Serialize};
use shnn_connect::{ConnectionRule, ParamValue, RegistryConfig};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{CliError, CliResult};

/// Full network description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDescription {
    /// Worker count and seed
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Node populations, created in order
    #[serde(default)]
    pub populations: Vec<PopulationDescription>,

    /// Synapse types derived from registered ones
    #[serde(default)]
    pub synapse_types: Vec<SynapseTypeDescription>,

    /// Connection calls, executed in order
    #[serde(default)]
    pub connections: Vec<ConnectionDescription>,
}

/// A named block of nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationDescription {
    /// Name used by connection selectors
    pub name: String,
    /// Number of nodes; must be at least 1
    pub size: usize,
}

/// A copy of `base` registered under `name`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynapseTypeDescription {
    /// Name of the new type
    pub name: String,
    /// Registered type to copy, e.g. `static_synapse`
    pub base: String,
    /// Default overrides, checked against the base model's schema
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

/// Positions `start..stop` (step `step`) of a population
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSelector {
    /// Population to select from
    pub population: String,
    /// First position (0-based, default 0)
    #[serde(default)]
    pub start: usize,
    /// End position, exclusive; the population end when absent
    pub stop: Option<usize>,
    /// Stride between positions (default 1)
    #[serde(default = "default_step")]
    pub step: usize,
}

fn default_step() -> usize {
    1
}

/// One connect call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionDescription {
    /// Connection rule and its arguments
    #[serde(flatten)]
    pub rule: ConnectionRule,
    /// Source nodes
    pub sources: NodeSelector,
    /// Target nodes
    pub targets: NodeSelector,
    /// Synapse type name
    pub synapse: String,
    /// Per-edge overrides, applied in name order
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

impl NetworkDescription {
    /// Parse a description from TOML text
    pub fn from_toml(content: &str) -> CliResult<Self> {
        let description: Self = toml::from_str(content)?;
        description.validate()?;
        Ok(description)
    }

    /// Load a description from file
    pub fn load_from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check cross references that the registry cannot see
    pub fn validate(&self) -> CliResult<()> {
        self.registry.validate()?;

        let mut names = std::collections::HashSet::new();
        for population in &self.populations {
            if !names.insert(population.name.as_str()) {
                return Err(CliError::config(format!(
                    "Duplicate population '{}'",
                    population.name
                )));
            }
        }

        for (i, connection) in self.connections.iter().enumerate() {
            for selector in [&connection.sources, &connection.targets] {
                if !names.contains(selector.population.as_str()) {
                    return Err(CliError::config(format!(
                        "Connection #{} refers to unknown population '{}'",
                        i, selector.population
                    )));
                }
                if selector.step == 0 {
                    return Err(CliError::config(format!(
                        "Connection #{}: step must be >= 1",
                        i
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIRING: &str = r#"
        [registry]
        num_workers = 2
        seed = 42

        [[populations]]
        name = "neurons"
        size = 100

        [[synapse_types]]
        name = "static"
        base = "static_synapse"
        params = { weight = 2 }

        [[connections]]
        rule = "fixed_indegree"
        indegree = 5
        synapse = "static"
        sources = { population = "neurons", stop = 50 }
        targets = { population = "neurons", start = 50 }
        params = { weight = { low = 0.5, high = 1.5 }, delay = 2.0 }
    "#;

    #[test]
    fn test_parse_description() {
        let description = NetworkDescription::from_toml(PAIRING).unwrap();
        assert_eq!(description.registry.num_workers, 2);
        assert_eq!(description.synapse_types[0].params.get("weight"), Some(&2.0));

        let connection = &description.connections[0];
        assert_eq!(connection.rule, ConnectionRule::FixedIndegree { indegree: 5 });
        assert_eq!(connection.sources.step, 1);
        assert_eq!(connection.sources.stop, Some(50));
        assert_eq!(connection.params.get("delay"), Some(&ParamValue::Constant(2.0)));
        assert_eq!(
            connection.params.get("weight"),
            Some(&ParamValue::Uniform { low: 0.5, high: 1.5 })
        );
    }

    #[test]
    fn test_registry_section_optional() {
        let description = NetworkDescription::from_toml(
            r#"
            [[populations]]
            name = "a"
            size = 3
            "#,
        )
        .unwrap();
        assert_eq!(description.registry, RegistryConfig::default());
    }

    #[test]
    fn test_unknown_population_rejected() {
        let err = NetworkDescription::from_toml(
            r#"
            [[populations]]
            name = "a"
            size = 3

            [[connections]]
            rule = "all_to_all"
            synapse = "static_synapse"
            sources = { population = "a" }
            targets = { population = "b" }
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown population 'b'"));
    }
}
