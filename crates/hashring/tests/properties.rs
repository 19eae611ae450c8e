//! Property tests for lookup, traversal and churn.

use std::collections::HashSet;

use hashring::{HashRing, RingBuilder};
use proptest::prelude::*;

fn node_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,8}:[0-9]{2,5}", 1..12)
        .prop_map(|nodes| nodes.into_iter().collect())
}

fn ring_of(nodes: &[String], replicas: usize) -> HashRing<String> {
    RingBuilder::new()
        .replicas(replicas)
        .nodes(nodes.iter().cloned())
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every key resolves to a member of a non-empty ring.
    #[test]
    fn prop_resolution_is_total(
        nodes in node_names(),
        keys in prop::collection::vec(any::<Vec<u8>>(), 1..50),
    ) {
        let ring = ring_of(&nodes, 20);
        for key in &keys {
            let owner = ring.get(key);
            prop_assert!(owner.is_some());
            prop_assert!(ring.contains(owner.unwrap()));
        }
    }

    /// Same nodes, same configuration: same ring.
    #[test]
    fn prop_deterministic_placement(nodes in node_names()) {
        let a = ring_of(&nodes, 20);
        let b = ring_of(&nodes, 20);
        let lhs: Vec<(u32, &String)> = a.virtual_nodes().map(|v| (v.position, v.node)).collect();
        let rhs: Vec<(u32, &String)> = b.virtual_nodes().map(|v| (v.position, v.node)).collect();
        prop_assert_eq!(lhs, rhs);
    }

    /// Traversal yields each member exactly once, whatever the start.
    #[test]
    fn prop_traversal_is_complete(nodes in node_names(), key in any::<Vec<u8>>()) {
        let ring = ring_of(&nodes, 20);
        let walked: Vec<&String> = ring.iter_from(&key).collect();
        let distinct: HashSet<&String> = walked.iter().copied().collect();
        prop_assert_eq!(walked.len(), nodes.len());
        prop_assert_eq!(distinct.len(), nodes.len());
        prop_assert_eq!(walked.first().copied(), ring.get(&key));
    }

    /// Removing a node only moves the keys it owned.
    #[test]
    fn prop_bounded_churn(
        nodes in node_names(),
        victim in any::<prop::sample::Index>(),
        keys in prop::collection::vec(any::<Vec<u8>>(), 1..100),
    ) {
        let mut ring = ring_of(&nodes, 20);
        let victim = nodes[victim.index(nodes.len())].clone();
        let before: Vec<Option<String>> = keys.iter().map(|k| ring.get(k).cloned()).collect();

        ring.remove_nodes([&victim]);
        for (key, owner) in keys.iter().zip(before) {
            let now = ring.get(key).cloned();
            if owner.as_ref() != Some(&victim) {
                prop_assert_eq!(now, owner);
            } else {
                prop_assert_ne!(now, Some(victim.clone()));
            }
        }
    }

    /// Set semantics: the ring ends up holding exactly the requested nodes.
    #[test]
    fn prop_set_nodes_is_exact(first in node_names(), second in node_names()) {
        let mut ring = ring_of(&first, 10);
        ring.set_nodes(second.iter().cloned());
        let members: HashSet<&String> = ring.members().collect();
        let expected: HashSet<&String> = second.iter().collect();
        prop_assert_eq!(members, expected);
        prop_assert_eq!(ring.position_count(), second.len() * 10);
    }

    /// Weighted shares track the weights up to the flooring of each share.
    #[test]
    fn prop_weighted_proportionality(
        weights in prop::collection::vec(1u32..10, 2..6),
        replicas in 50usize..200,
    ) {
        let nodes: Vec<String> = (0..weights.len()).map(|i| format!("node-{i}")).collect();
        let ring = RingBuilder::new()
            .replicas(replicas)
            .weighted(true)
            .weights(nodes.iter().cloned().zip(weights.iter().copied()))
            .nodes(nodes.iter().cloned())
            .build()
            .unwrap();

        let total_weight: u32 = weights.iter().sum();
        let total_positions = (replicas * nodes.len()) as f64;
        for (node, weight) in nodes.iter().zip(&weights) {
            let owned = ring.virtual_nodes().filter(|v| v.node == node).count() as f64;
            let ideal = total_positions * f64::from(*weight) / f64::from(total_weight);
            prop_assert!(owned <= ideal + 1e-6 && ideal - owned < 1.0, "{node}: {owned} vs {ideal}");
        }
    }
}
