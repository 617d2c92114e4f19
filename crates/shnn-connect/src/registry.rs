//! The connection registry: one context object owning ids, types and stores
//!
//! All registry state lives here and is passed explicitly; there are no
//! process-wide singletons. Construction (`create_nodes`, `register_type`,
//! `connect`) and retrieval (`query`, `total_count`, `report`) never overlap:
//! the borrow checker enforces that a query can only run after a wiring pass
//! has returned.

use crate::{
    config::RegistryConfig,
    error::Result,
    ids::{NodeId, NodeRange, SynapseTypeId, WorkerId},
    partition::IdentifierSpace,
    query::{self, ConnectionFilter},
    rng::{RandomSource, RandomStreams},
    store::{ConnectionStore, Edge},
    synapse::SynapseParams,
    types::{SynapseType, SynapseTypeTable, TypeRef},
    wiring::{ConnectionRule, SynapseSpec, WiringPlan},
};
use rand::rngs::StdRng;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Edge counts after construction
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConnectivityReport {
    /// Number of allocated nodes
    pub num_nodes: u64,
    /// Edges across all workers
    pub total_edges: usize,
    /// Edges per synapse type name (types without edges omitted)
    pub edges_per_type: BTreeMap<String, usize>,
    /// Edges per worker, in worker order
    pub edges_per_worker: Vec<usize>,
}

/// Synaptic connection registry partitioned over workers
#[derive(Debug)]
pub struct ConnectionRegistry {
    config: RegistryConfig,
    space: IdentifierSpace,
    types: SynapseTypeTable,
    stores: Vec<ConnectionStore>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        let space = IdentifierSpace::new(config.num_workers)?;
        let stores = (0..config.num_workers)
            .map(|w| ConnectionStore::new(WorkerId(w)))
            .collect();
        log::info!(
            "Created connection registry with {} workers (seed {})",
            config.num_workers,
            config.seed
        );
        Ok(Self {
            config,
            space,
            types: SynapseTypeTable::with_builtins(),
            stores,
        })
    }

    /// Registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of workers
    pub fn num_workers(&self) -> usize {
        self.stores.len()
    }

    /// Fresh per-worker random streams derived from the configured seed
    pub fn random_streams(&self) -> RandomStreams<StdRng> {
        RandomStreams::seeded(self.config.seed, self.num_workers())
    }

    /// Allocate `count` new node ids
    pub fn create_nodes(&mut self, count: usize) -> Result<NodeRange> {
        let range = self.space.allocate(count)?;
        log::debug!("Created nodes {}", range);
        Ok(range)
    }

    /// Worker owning `id`
    pub fn owner_of(&self, id: NodeId) -> Result<WorkerId> {
        self.space.owner_of(id)
    }

    /// Register a new synapse type
    pub fn register_type(&mut self, name: &str, defaults: SynapseParams) -> Result<SynapseTypeId> {
        self.types.register_type(name, defaults)
    }

    /// Register `new_name` as a copy of `base_name` with overrides
    pub fn clone_type(
        &mut self,
        base_name: &str,
        new_name: &str,
        overrides: &[(&str, f64)],
    ) -> Result<SynapseTypeId> {
        self.types.clone_type(base_name, new_name, overrides)
    }

    /// Id registered for `name`
    pub fn resolve_type(&self, name: &str) -> Result<SynapseTypeId> {
        self.types.resolve(name)
    }

    /// Name registered for `id`
    pub fn type_name(&self, id: SynapseTypeId) -> Result<&str> {
        self.types.name_of(id)
    }

    /// Full type record for an id or name
    pub fn synapse_type(&self, reference: &TypeRef) -> Result<&SynapseType> {
        self.types.resolve_ref(reference)
    }

    /// Registered synapse types in id order
    pub fn synapse_types(&self) -> impl Iterator<Item = &SynapseType> {
        self.types.iter()
    }

    /// Create edges from `sources` to `targets` according to `rule`
    ///
    /// Returns the number of edges created. On error nothing is inserted.
    pub fn connect<R>(
        &mut self,
        rule: ConnectionRule,
        sources: &[NodeId],
        targets: &[NodeId],
        spec: &SynapseSpec,
        rngs: &mut RandomStreams<R>,
    ) -> Result<usize>
    where
        R: RandomSource + Send,
    {
        let plan = WiringPlan::prepare(&self.space, &self.types, rule, sources, targets, spec)?;
        plan.execute(&self.space, &mut self.stores, rngs)
    }

    /// Edges matching `filter`, worker-major then insertion order
    pub fn query(&self, filter: &ConnectionFilter) -> Vec<Edge> {
        query::query(&self.space, &self.types, &self.stores, filter)
    }

    /// Edge count across all workers, optionally restricted to one type
    ///
    /// An unknown type counts zero edges.
    pub fn total_count(&self, synapse_type: Option<&TypeRef>) -> usize {
        match synapse_type {
            None => self.stores.iter().map(ConnectionStore::len).sum(),
            Some(reference) => match self.types.resolve_ref(reference) {
                Ok(ty) => self.stores.iter().map(|s| s.count(ty.id)).sum(),
                Err(_) => 0,
            },
        }
    }

    /// Per-worker stores, indexed by worker
    pub fn stores(&self) -> &[ConnectionStore] {
        &self.stores
    }

    /// Summarise edge counts per type and per worker
    pub fn report(&self) -> ConnectivityReport {
        let edges_per_type = self
            .types
            .iter()
            .filter_map(|ty| {
                let count: usize = self.stores.iter().map(|s| s.count(ty.id)).sum();
                (count > 0).then(|| (ty.name.clone(), count))
            })
            .collect();
        ConnectivityReport {
            num_nodes: self.space.last_id(),
            total_edges: self.total_count(None),
            edges_per_type,
            edges_per_worker: self.stores.iter().map(ConnectionStore::len).collect(),
        }
    }

    /// Clear all nodes, edges and user-registered types
    ///
    /// The built-in synapse models are registered again; the worker count
    /// and seed are kept.
    pub fn reset(&mut self) {
        self.space.reset();
        self.types = SynapseTypeTable::with_builtins();
        for store in &mut self.stores {
            store.clear();
        }
        log::info!("Connection registry reset");
    }
}
