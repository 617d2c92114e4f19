//! Per-worker, append-only connection storage

use crate::{
    ids::{NodeId, SynapseTypeId, WorkerId},
    synapse::SynapseParams,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A directed, typed connection between two nodes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Pre-synaptic node
    pub source: NodeId,
    /// Post-synaptic node
    pub target: NodeId,
    /// Synapse type of this edge
    pub synapse_type: SynapseTypeId,
    /// Worker whose store holds the edge (owner of `target`)
    pub worker: WorkerId,
    /// Position of the edge in its worker's store
    pub local_index: usize,
    /// Per-edge parameters
    pub params: SynapseParams,
}

/// Connections owned by a single worker
///
/// Only the owning worker inserts; readers scan after the wiring pass has
/// completed. Edges are kept in insertion order.
#[derive(Debug, Clone)]
pub struct ConnectionStore {
    worker: WorkerId,
    edges: Vec<Edge>,
    /// Edge count per synapse type index
    type_counts: Vec<usize>,
}

impl ConnectionStore {
    /// Create an empty store for `worker`
    pub fn new(worker: WorkerId) -> Self {
        Self {
            worker,
            edges: Vec::new(),
            type_counts: Vec::new(),
        }
    }

    /// Worker owning this store
    pub fn worker(&self) -> WorkerId {
        self.worker
    }

    /// Append an edge
    ///
    /// Ids must already be validated and `target` must be owned by this
    /// store's worker.
    pub fn insert(
        &mut self,
        source: NodeId,
        target: NodeId,
        synapse_type: SynapseTypeId,
        params: SynapseParams,
    ) {
        let local_index = self.edges.len();
        self.edges.push(Edge {
            source,
            target,
            synapse_type,
            worker: self.worker,
            local_index,
            params,
        });

        let slot = synapse_type.index();
        if slot >= self.type_counts.len() {
            self.type_counts.resize(slot + 1, 0);
        }
        self.type_counts[slot] += 1;
    }

    /// Reserve room for `additional` edges
    pub fn reserve(&mut self, additional: usize) {
        self.edges.reserve(additional);
    }

    /// Number of edges of `synapse_type` in this store
    pub fn count(&self, synapse_type: SynapseTypeId) -> usize {
        self.type_counts
            .get(synapse_type.index())
            .copied()
            .unwrap_or(0)
    }

    /// Total number of edges in this store
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True if the store holds no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate over edges in insertion order
    pub fn scan(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    /// Drop all edges
    pub fn clear(&mut self) {
        self.edges.clear();
        self.type_counts.clear();
    }
}
