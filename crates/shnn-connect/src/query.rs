//! Filtered connection retrieval
//!
//! Results are merged worker by worker in ascending worker index; within a
//! worker, edges keep their store insertion order. Neither source nor target
//! order affects the merge.

use crate::{
    ids::{NodeId, SynapseTypeId, WorkerId},
    partition::IdentifierSpace,
    store::{ConnectionStore, Edge},
    types::{SynapseTypeTable, TypeRef},
};
use std::collections::{BTreeSet, HashSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Restriction on the edges returned by a query
///
/// Every field is optional; `None` means unrestricted. An empty set is a real
/// restriction that matches nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionFilter {
    /// Keep edges whose source is in this set
    pub sources: Option<HashSet<NodeId>>,
    /// Keep edges whose target is in this set
    pub targets: Option<HashSet<NodeId>>,
    /// Keep edges of this synapse type
    pub synapse_type: Option<TypeRef>,
}

impl ConnectionFilter {
    /// Filter matching every edge
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given sources
    pub fn sources(mut self, ids: impl IntoIterator<Item = NodeId>) -> Self {
        self.sources = Some(ids.into_iter().collect());
        self
    }

    /// Restrict to the given targets
    pub fn targets(mut self, ids: impl IntoIterator<Item = NodeId>) -> Self {
        self.targets = Some(ids.into_iter().collect());
        self
    }

    /// Restrict to one synapse type
    pub fn synapse_type(mut self, synapse_type: impl Into<TypeRef>) -> Self {
        self.synapse_type = Some(synapse_type.into());
        self
    }
}

/// A filter with its type reference resolved
struct ResolvedFilter<'f> {
    sources: Option<&'f HashSet<NodeId>>,
    targets: Option<&'f HashSet<NodeId>>,
    synapse_type: Option<SynapseTypeId>,
}

impl ResolvedFilter<'_> {
    fn matches(&self, edge: &Edge) -> bool {
        self.sources.map_or(true, |s| s.contains(&edge.source))
            && self.targets.map_or(true, |t| t.contains(&edge.target))
            && self.synapse_type.map_or(true, |ty| edge.synapse_type == ty)
    }

    fn scan(&self, store: &ConnectionStore) -> Vec<Edge> {
        // Type counts let a typed query skip stores without that type.
        if let Some(ty) = self.synapse_type {
            if store.count(ty) == 0 {
                return Vec::new();
            }
        }
        store.scan().filter(|e| self.matches(e)).cloned().collect()
    }
}

/// Workers that may hold edges matching `filter`, in ascending order
fn candidate_workers(space: &IdentifierSpace, targets: Option<&HashSet<NodeId>>) -> Vec<WorkerId> {
    match targets {
        Some(targets) => targets
            .iter()
            .filter_map(|&id| space.owner_of(id).ok())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        None => (0..space.num_workers()).map(WorkerId).collect(),
    }
}

/// Run `filter` over the worker stores
///
/// An unknown synapse type and ids outside the allocated range simply match
/// nothing.
pub fn query(
    space: &IdentifierSpace,
    types: &SynapseTypeTable,
    stores: &[ConnectionStore],
    filter: &ConnectionFilter,
) -> Vec<Edge> {
    let synapse_type = match &filter.synapse_type {
        Some(reference) => match types.resolve_ref(reference) {
            Ok(ty) => Some(ty.id),
            Err(_) => {
                log::debug!("Query for unknown synapse type '{}' matches nothing", reference);
                return Vec::new();
            }
        },
        None => None,
    };
    let resolved = ResolvedFilter {
        sources: filter.sources.as_ref(),
        targets: filter.targets.as_ref(),
        synapse_type,
    };

    let workers = candidate_workers(space, resolved.targets);

    #[cfg(feature = "parallel")]
    let per_worker: Vec<Vec<Edge>> = workers
        .par_iter()
        .map(|w| resolved.scan(&stores[w.index()]))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let per_worker: Vec<Vec<Edge>> = workers
        .iter()
        .map(|w| resolved.scan(&stores[w.index()]))
        .collect();

    let edges: Vec<Edge> = per_worker.into_iter().flatten().collect();
    log::debug!(
        "Query over {} of {} workers returned {} edges",
        workers.len(),
        stores.len(),
        edges.len()
    );
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synapse::SynapseModel;

    fn fixture() -> (IdentifierSpace, SynapseTypeTable, Vec<ConnectionStore>) {
        let mut space = IdentifierSpace::new(2).unwrap();
        space.allocate(10).unwrap();
        let types = SynapseTypeTable::with_builtins();
        let mut stores = vec![ConnectionStore::new(WorkerId(0)), ConnectionStore::new(WorkerId(1))];
        let params = SynapseModel::Static.default_params();
        // (source, target, type); target parity decides the worker
        for (s, t, ty) in [(1, 2, 0), (3, 5, 0), (1, 4, 1), (7, 5, 1), (9, 2, 0)] {
            let store = &mut stores[space.owner_of(NodeId(t)).unwrap().index()];
            store.insert(NodeId(s), NodeId(t), SynapseTypeId(ty), params);
        }
        (space, types, stores)
    }

    fn pairs(edges: &[Edge]) -> Vec<(u64, u64)> {
        edges.iter().map(|e| (e.source.raw(), e.target.raw())).collect()
    }

    #[test]
    fn test_unfiltered_is_worker_major() {
        let (space, types, stores) = fixture();
        let edges = query(&space, &types, &stores, &ConnectionFilter::new());
        assert_eq!(pairs(&edges), vec![(1, 2), (1, 4), (9, 2), (3, 5), (7, 5)]);
    }

    #[test]
    fn test_filters_compose() {
        let (space, types, stores) = fixture();
        let by_type = query(
            &space,
            &types,
            &stores,
            &ConnectionFilter::new().synapse_type(SynapseTypeId(1)),
        );
        assert_eq!(pairs(&by_type), vec![(1, 4), (7, 5)]);

        let by_source = query(&space, &types, &stores, &ConnectionFilter::new().sources([NodeId(1)]));
        assert_eq!(pairs(&by_source), vec![(1, 2), (1, 4)]);

        let both = query(
            &space,
            &types,
            &stores,
            &ConnectionFilter::new().sources([NodeId(1), NodeId(9)]).targets([NodeId(2)]),
        );
        assert_eq!(pairs(&both), vec![(1, 2), (9, 2)]);
    }

    #[test]
    fn test_unknown_type_and_ids_match_nothing() {
        let (space, types, stores) = fixture();
        let filter = ConnectionFilter::new().synapse_type("no_such_type");
        assert!(query(&space, &types, &stores, &filter).is_empty());

        let filter = ConnectionFilter::new().targets([NodeId(0), NodeId(999)]);
        assert!(query(&space, &types, &stores, &filter).is_empty());

        let filter = ConnectionFilter::new().sources(Vec::new());
        assert!(query(&space, &types, &stores, &filter).is_empty());
    }

    #[test]
    fn test_candidate_workers() {
        let (space, _, _) = fixture();
        let targets: HashSet<_> = [NodeId(5), NodeId(7)].into_iter().collect();
        assert_eq!(candidate_workers(&space, Some(&targets)), vec![WorkerId(1)]);
        assert_eq!(candidate_workers(&space, None), vec![WorkerId(0), WorkerId(1)]);
    }
}
