//! Node id allocation and worker ownership
//!
//! Ids are handed out densely starting at 1. Ownership is round-robin:
//! node `id` belongs to worker `id % num_workers`. The worker count is fixed
//! when the space is created, so `owner_of` stays a pure function of the id
//! for the whole life of a registry.

use crate::{
    error::{ConnectError, Result},
    ids::{NodeId, NodeRange, WorkerId},
};

/// Allocator and partitioning rule for node ids
#[derive(Debug, Clone)]
pub struct IdentifierSpace {
    num_workers: u32,
    last_id: u64,
}

impl IdentifierSpace {
    /// Create an empty id space partitioned over `num_workers`
    pub fn new(num_workers: u32) -> Result<Self> {
        if num_workers == 0 {
            return Err(ConnectError::invalid_config("num_workers must be >= 1"));
        }
        Ok(Self {
            num_workers,
            last_id: 0,
        })
    }

    /// Number of workers ids are partitioned over
    pub fn num_workers(&self) -> u32 {
        self.num_workers
    }

    /// Last allocated id, 0 if nothing has been allocated
    pub fn last_id(&self) -> u64 {
        self.last_id
    }

    /// Allocate `count` fresh consecutive ids
    pub fn allocate(&mut self, count: usize) -> Result<NodeRange> {
        if count == 0 {
            return Err(ConnectError::invalid_parameter("count", "0", ">= 1"));
        }
        let first = self.last_id + 1;
        let last = self.last_id + count as u64;
        self.last_id = last;
        Ok(NodeRange::new(NodeId(first), NodeId(last)))
    }

    /// Check that `id` has been allocated
    pub fn validate(&self, id: NodeId) -> Result<()> {
        if id.0 == 0 || id.0 > self.last_id {
            return Err(ConnectError::InvalidId {
                id: id.0,
                last: self.last_id,
            });
        }
        Ok(())
    }

    /// Check every id in `ids`
    pub fn validate_all(&self, ids: &[NodeId]) -> Result<()> {
        ids.iter().try_for_each(|&id| self.validate(id))
    }

    /// Worker owning `id`
    pub fn owner_of(&self, id: NodeId) -> Result<WorkerId> {
        self.validate(id)?;
        Ok(self.owner_unchecked(id))
    }

    /// Worker owning `id` without range checking
    ///
    /// Callers must have validated `id` beforehand.
    pub(crate) fn owner_unchecked(&self, id: NodeId) -> WorkerId {
        WorkerId((id.0 % self.num_workers as u64) as u32)
    }

    /// Drop all allocated ids
    pub fn reset(&mut self) {
        self.last_id = 0;
    }
}
