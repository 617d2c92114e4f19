//! Build a network and print the connections matching a filter
//!
//! Example:
//!   snn-connect query pairing.toml --source 31,33,35 --format table
//!   snn-connect query brunel.toml --synapse inhibitory --format json --output inh.json

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde::Serialize;
use shnn_connect::{ConnectionFilter, ConnectionRegistry, Edge, NodeId};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::config::NetworkDescription;
use crate::error::{CliError, CliResult};
use crate::network::build_network;

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Print connections matching source, target and synapse type filters
#[derive(Args, Debug)]
pub struct QueryCommand {
    /// Network description (TOML)
    pub network: PathBuf,

    /// Source node ids (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub source: Option<Vec<u64>>,

    /// Target node ids (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub target: Option<Vec<u64>>,

    /// Synapse type name
    #[arg(long)]
    pub synapse: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print at most this many connections
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Serialized form of one connection
#[derive(Debug, Serialize)]
pub struct ConnectionRecord<'a> {
    pub source: u64,
    pub target: u64,
    pub synapse: &'a str,
    pub worker: u32,
    pub local_index: usize,
    pub params: BTreeMap<&'static str, f64>,
}

impl<'a> ConnectionRecord<'a> {
    fn new(edge: &Edge, registry: &'a ConnectionRegistry) -> Self {
        Self {
            source: edge.source.raw(),
            target: edge.target.raw(),
            synapse: registry.type_name(edge.synapse_type).unwrap_or("?"),
            worker: edge.worker.raw(),
            local_index: edge.local_index,
            params: edge.params.entries().into_iter().collect(),
        }
    }
}

impl QueryCommand {
    fn filter(&self) -> ConnectionFilter {
        let mut filter = ConnectionFilter::new();
        if let Some(ids) = &self.source {
            filter = filter.sources(ids.iter().copied().map(NodeId::new));
        }
        if let Some(ids) = &self.target {
            filter = filter.targets(ids.iter().copied().map(NodeId::new));
        }
        if let Some(name) = &self.synapse {
            filter = filter.synapse_type(name.as_str());
        }
        filter
    }

    pub fn execute(self) -> CliResult<()> {
        if self.limit == Some(0) {
            return Err(CliError::invalid_args("--limit must be >= 1"));
        }

        let description = NetworkDescription::load_from_file(&self.network)?;
        let network = build_network(&description)?;
        let registry = &network.registry;

        let mut edges = registry.query(&self.filter());
        info!("{} matching connections", edges.len());
        if let Some(limit) = self.limit {
            edges.truncate(limit);
        }

        let records: Vec<_> = edges
            .iter()
            .map(|edge| ConnectionRecord::new(edge, registry))
            .collect();
        let rendered = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&records)?,
            OutputFormat::Table => render_table(&records),
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, rendered)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("Wrote {} connections to {}", records.len(), path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", rendered)?;
            }
        }
        Ok(())
    }
}

fn render_table(records: &[ConnectionRecord<'_>]) -> String {
    let mut out = format!(
        "{:>8} {:>8} {:<20} {:>6} {:>10} {:>8}",
        "source", "target", "synapse", "worker", "weight", "delay"
    );
    for record in records {
        out.push('\n');
        out.push_str(&format!(
            "{:>8} {:>8} {:<20} {:>6} {:>10.4} {:>8.3}",
            record.source,
            record.target,
            record.synapse,
            record.worker,
            record.params.get("weight").copied().unwrap_or_default(),
            record.params.get("delay").copied().unwrap_or_default(),
        ));
    }
    out
}
