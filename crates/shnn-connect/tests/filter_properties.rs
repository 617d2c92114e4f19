//! Property tests: every filtered query equals a brute-force scan of the stores

use proptest::prelude::*;
use shnn_connect::{
    ConnectionFilter, ConnectionRegistry, ConnectionRule, Edge, NodeId, RegistryConfig,
    SynapseSpec, SynapseTypeId,
};
use std::collections::HashSet;

const NODES: u64 = 40;

fn build(workers: u32, seed: u64, indegree: usize) -> ConnectionRegistry {
    let mut registry = ConnectionRegistry::new(RegistryConfig::new(workers, seed).unwrap()).unwrap();
    let nodes = registry.create_nodes(NODES as usize).unwrap();
    let mut rngs = registry.random_streams();
    registry
        .connect(
            ConnectionRule::FixedIndegree { indegree },
            &nodes.slice(0, Some(20), 1),
            &nodes.to_vec(),
            &SynapseSpec::new("static_synapse"),
            &mut rngs,
        )
        .unwrap();
    registry
        .connect(
            ConnectionRule::OneToOne,
            &nodes.slice(0, Some(20), 1),
            &nodes.slice(20, None, 1),
            &SynapseSpec::new("stdp_synapse"),
            &mut rngs,
        )
        .unwrap();
    registry
}

fn brute_force(
    registry: &ConnectionRegistry,
    sources: Option<&HashSet<NodeId>>,
    targets: Option<&HashSet<NodeId>>,
    synapse_type: Option<SynapseTypeId>,
) -> Vec<Edge> {
    registry
        .stores()
        .iter()
        .flat_map(|s| s.scan())
        .filter(|e| sources.map_or(true, |q| q.contains(&e.source)))
        .filter(|e| targets.map_or(true, |r| r.contains(&e.target)))
        .filter(|e| synapse_type.map_or(true, |t| e.synapse_type == t))
        .cloned()
        .collect()
}

fn id_subset() -> impl Strategy<Value = Option<HashSet<NodeId>>> {
    proptest::option::of(proptest::collection::hash_set(
        (1..=NODES + 5).prop_map(NodeId::new),
        0..12,
    ))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn query_matches_brute_force(
        workers in 1u32..5,
        seed in any::<u64>(),
        indegree in 0usize..4,
        sources in id_subset(),
        targets in id_subset(),
        typed in proptest::option::of(0u16..4),
    ) {
        let registry = build(workers, seed, indegree);
        let synapse_type = typed.map(SynapseTypeId::new);

        let mut filter = ConnectionFilter::new();
        filter.sources = sources.clone();
        filter.targets = targets.clone();
        filter.synapse_type = synapse_type.map(Into::into);

        let expected = brute_force(&registry, sources.as_ref(), targets.as_ref(), synapse_type);
        prop_assert_eq!(registry.query(&filter), expected);
    }

    #[test]
    fn conjunction_is_intersection(
        workers in 1u32..5,
        seed in any::<u64>(),
        sources in id_subset(),
        targets in id_subset(),
    ) {
        let registry = build(workers, seed, 2);
        let by_source = registry.query(&ConnectionFilter {
            sources: sources.clone(),
            ..ConnectionFilter::default()
        });
        let both = registry.query(&ConnectionFilter {
            sources,
            targets: targets.clone(),
            ..ConnectionFilter::default()
        });

        let narrowed: Vec<_> = by_source
            .into_iter()
            .filter(|e| targets.as_ref().map_or(true, |r| r.contains(&e.target)))
            .collect();
        prop_assert_eq!(both, narrowed);
    }
}
