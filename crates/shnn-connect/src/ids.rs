//! Identifier types for nodes, workers and synapse types

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Network node (neuron or device) identifier
///
/// Ids are dense, start at 1 and are never reused within a registry's
/// lifetime. `NodeId(0)` is never handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new node ID
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Parallel worker (thread or rank) index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct WorkerId(pub u32);

impl WorkerId {
    /// Create a new worker ID
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Index into per-worker collections
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{}", self.0)
    }
}

/// Registered synapse type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct SynapseTypeId(pub u16);

impl SynapseTypeId {
    /// Create a new synapse type ID
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub const fn raw(&self) -> u16 {
        self.0
    }

    /// Index into per-type collections
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SynapseTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Contiguous block of node ids created in one call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeRange {
    first: NodeId,
    last: NodeId,
}

impl NodeRange {
    /// Create a range covering `first..=last`
    pub const fn new(first: NodeId, last: NodeId) -> Self {
        Self { first, last }
    }

    /// First id in the range
    pub const fn first(&self) -> NodeId {
        self.first
    }

    /// Last id in the range
    pub const fn last(&self) -> NodeId {
        self.last
    }

    /// Number of ids in the range
    pub fn len(&self) -> usize {
        (self.last.0 + 1).saturating_sub(self.first.0) as usize
    }

    /// True if the range holds no ids
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether `id` lies in the range
    pub fn contains(&self, id: NodeId) -> bool {
        id >= self.first && id <= self.last
    }

    /// Iterate over the ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        (self.first.0..=self.last.0).map(NodeId)
    }

    /// Collect the ids into a vector
    pub fn to_vec(&self) -> Vec<NodeId> {
        self.iter().collect()
    }

    /// Select positions `start..stop` with the given step, clamped to the range
    ///
    /// Positions are zero-based offsets from `first`.
    pub fn slice(&self, start: usize, stop: Option<usize>, step: usize) -> Vec<NodeId> {
        let stop = stop.unwrap_or(self.len()).min(self.len());
        (start..stop)
            .step_by(step.max(1))
            .map(|offset| NodeId(self.first.0 + offset as u64))
            .collect()
    }
}

impl fmt::Display for NodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..={}]", self.first, self.last)
    }
}
