//! Consistent hash ring implementation.
//!
//! The ring keeps three pieces of state in step: the sorted position index
//! with its owner table, the logical members keyed by their
//! canonical label, and the optional weight table. Membership only changes
//! through [`HashRing::add_nodes`], [`HashRing::set_nodes`],
//! [`HashRing::remove_nodes`] and [`HashRing::remove_all_nodes`]; each of them
//! ends with a single index rebuild.
//!
//! Unweighted rings are patched incrementally, which is what keeps churn low:
//! untouched members keep every position they had. Weighted rings are
//! recomputed from scratch on every change, because each node's share of
//! positions depends on the whole member set.
//!
//! The ring does no locking. Embedders either serialize every call behind an
//! exclusive lock or mutate a clone and swap it in for readers.

mod builder;
mod locator;
mod placement;
mod store;

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use self::placement::{weighted_target, Placer};
use self::store::RingStore;
use crate::formatter::NodeKeyFormatter;
use crate::hash::HashAlgorithm;
use crate::node::NodeKey;
use crate::vnode::VirtualNode;

pub use builder::{RingBuilder, DEFAULT_REPLICAS};
pub use locator::Iter;

/// Consistent hash ring mapping keys onto a dynamic set of nodes.
///
/// Nodes are opaque: the ring only ever looks at them through its
/// [`NodeKeyFormatter`], and two nodes rendering the same replica-0 label
/// are the same member.
pub struct HashRing<N> {
    store: RingStore,
    members: BTreeMap<NodeKey, N>,
    weights: HashMap<NodeKey, u32>,
    replicas: usize,
    weighted: bool,
    hash: Arc<dyn HashAlgorithm>,
    formatter: Arc<dyn NodeKeyFormatter<N>>,
}

impl<N: fmt::Display> HashRing<N> {
    /// Creates an empty, unweighted ring with the default settings
    /// (160 ketama replicas per node).
    pub fn new() -> Self {
        RingBuilder::new().assemble()
    }

    /// Returns a builder preset with the ketama formatter.
    pub fn builder() -> RingBuilder<N> {
        RingBuilder::new()
    }
}

impl<N: fmt::Display> Default for HashRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> HashRing<N> {
    /// Inserts nodes into the ring.
    ///
    /// Nodes already present (by formatter identity), and repeats within
    /// `nodes`, are ignored. Unweighted, only the new nodes' positions are
    /// added; weighted, the whole ring is recomputed.
    pub fn add_nodes<I: IntoIterator<Item = N>>(&mut self, nodes: I) {
        let fresh: Vec<(NodeKey, N)> = self
            .distinct(nodes)
            .into_iter()
            .filter(|(key, _)| !self.members.contains_key(key))
            .collect();
        if fresh.is_empty() {
            return;
        }

        let added = fresh.len();
        if self.weighted {
            let mut members = std::mem::take(&mut self.members);
            members.extend(fresh);
            self.recompute(members);
        } else {
            self.insert_unweighted(fresh);
            self.store.rebuild();
        }
        debug!(
            added,
            members = self.members.len(),
            positions = self.store.len(),
            weighted = self.weighted,
            "added nodes to ring"
        );
    }

    /// Makes `nodes` the exact membership of the ring.
    ///
    /// Unweighted, members missing from `nodes` are removed and new ones
    /// added, leaving every other member's positions untouched. Weighted, the
    /// ring is recomputed from `nodes`.
    pub fn set_nodes<I: IntoIterator<Item = N>>(&mut self, nodes: I) {
        let wanted = self.distinct(nodes);
        if self.weighted {
            self.recompute(wanted.into_iter().collect());
            debug!(
                members = self.members.len(),
                positions = self.store.len(),
                "set weighted ring nodes"
            );
            return;
        }

        let wanted_keys: HashSet<&NodeKey> = wanted.iter().map(|(key, _)| key).collect();
        let stale: Vec<NodeKey> = self
            .members
            .keys()
            .filter(|key| !wanted_keys.contains(key))
            .cloned()
            .collect();
        let removed = stale.len();
        if removed > 0 && removed == self.members.len() {
            self.clear();
        } else {
            self.remove_unweighted(stale);
        }

        let fresh: Vec<(NodeKey, N)> = wanted
            .into_iter()
            .filter(|(key, _)| !self.members.contains_key(key))
            .collect();
        let added = fresh.len();
        self.insert_unweighted(fresh);
        self.store.rebuild();

        debug!(
            added,
            removed,
            members = self.members.len(),
            positions = self.store.len(),
            "set ring nodes"
        );
    }

    /// Removes nodes from the ring. Nodes that are not members are ignored.
    pub fn remove_nodes<I>(&mut self, nodes: I)
    where
        I: IntoIterator,
        I::Item: Borrow<N>,
    {
        let mut seen = HashSet::new();
        let gone: Vec<NodeKey> = nodes
            .into_iter()
            .map(|node| NodeKey::of(self.formatter.as_ref(), node.borrow()))
            .filter(|key| self.members.contains_key(key) && seen.insert(key.clone()))
            .collect();
        if gone.is_empty() {
            return;
        }

        let removed = gone.len();
        if self.weighted {
            let mut members = std::mem::take(&mut self.members);
            for key in &gone {
                members.remove(key);
            }
            self.recompute(members);
        } else {
            self.remove_unweighted(gone);
            self.store.rebuild();
        }
        debug!(
            removed,
            members = self.members.len(),
            positions = self.store.len(),
            weighted = self.weighted,
            "removed nodes from ring"
        );
    }

    /// Removes every node, leaving an empty ring. Weights are kept.
    pub fn remove_all_nodes(&mut self) {
        self.clear();
        debug!("removed all nodes from ring");
    }

    /// Sets the weight of `node`.
    ///
    /// On a weighted ring where `node` is a member this recomputes every
    /// position. It never turns weighting on for a ring built without it.
    pub fn set_weight(&mut self, node: &N, weight: u32) {
        let key = NodeKey::of(self.formatter.as_ref(), node);
        let recompute = self.weighted && self.members.contains_key(&key);
        self.weights.insert(key, weight);
        if recompute {
            let members = std::mem::take(&mut self.members);
            self.recompute(members);
        }
    }

    /// Returns true if a node with the same identity is a member.
    pub fn contains(&self, node: &N) -> bool {
        self.members
            .contains_key(&NodeKey::of(self.formatter.as_ref(), node))
    }

    /// All members, in no particular order.
    pub fn members(&self) -> impl ExactSizeIterator<Item = &N> + '_ {
        self.members.values()
    }

    /// Number of logical members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Total number of virtual positions on the ring.
    pub fn position_count(&self) -> usize {
        self.store.len()
    }

    /// Largest stored position: keys hashing past it wrap to the first one.
    pub fn max_position(&self) -> Option<u32> {
        self.store.positions().last().copied()
    }

    /// Every virtual position with its owner, in ascending ring order.
    pub fn virtual_nodes(&self) -> impl Iterator<Item = VirtualNode<'_, N>> + '_ {
        self.store
            .positions()
            .iter()
            .enumerate()
            .filter_map(move |(index, &position)| {
                self.members
                    .get(self.store.owner_at(index))
                    .map(|node| VirtualNode::new(position, node))
            })
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn replicas_per_node(&self) -> usize {
        self.replicas
    }

    pub fn hash_algorithm_name(&self) -> &'static str {
        self.hash.name()
    }

    /// Keys `nodes` by identity, dropping repeats (first occurrence wins).
    fn distinct<I: IntoIterator<Item = N>>(&self, nodes: I) -> Vec<(NodeKey, N)> {
        let mut seen = HashSet::new();
        nodes
            .into_iter()
            .map(|node| (NodeKey::of(self.formatter.as_ref(), &node), node))
            .filter(|(key, _)| seen.insert(key.clone()))
            .collect()
    }

    fn clear(&mut self) {
        self.store.clear();
        self.members.clear();
    }

    /// Places each node with the uniform replica count. No rebuild.
    fn insert_unweighted(&mut self, nodes: Vec<(NodeKey, N)>) {
        let placer = Placer {
            hash: self.hash.as_ref(),
            formatter: self.formatter.as_ref(),
        };
        for (key, node) in nodes {
            placer.place(&mut self.store, &node, &key, self.replicas);
            self.members.insert(key, node);
        }
    }

    /// Releases the positions of each member in `keys`. No rebuild.
    fn remove_unweighted(&mut self, keys: Vec<NodeKey>) {
        let placer = Placer {
            hash: self.hash.as_ref(),
            formatter: self.formatter.as_ref(),
        };
        for key in keys {
            if let Some(node) = self.members.remove(&key) {
                placer.unplace(&mut self.store, &node, &key, self.replicas);
            }
        }
    }

    /// Rebuilds a weighted ring from scratch for `members`.
    fn recompute(&mut self, members: BTreeMap<NodeKey, N>) {
        self.store.clear();

        let weight_of = |key: &NodeKey| self.weights.get(key).copied().unwrap_or(0);
        let total_weight: u64 = members.keys().map(|key| u64::from(weight_of(key))).sum();
        let node_count = members.len();

        if total_weight == 0 {
            if node_count > 0 {
                warn!(node_count, "weighted ring members have zero total weight; no positions placed");
            }
        } else {
            let placer = Placer {
                hash: self.hash.as_ref(),
                formatter: self.formatter.as_ref(),
            };
            for (key, node) in &members {
                let target = weighted_target(weight_of(key), total_weight, self.replicas, node_count);
                placer.place(&mut self.store, node, key, target);
            }
        }

        self.members = members;
        self.store.rebuild();
    }
}

impl<N: Clone> Clone for HashRing<N> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            members: self.members.clone(),
            weights: self.weights.clone(),
            replicas: self.replicas,
            weighted: self.weighted,
            hash: Arc::clone(&self.hash),
            formatter: Arc::clone(&self.formatter),
        }
    }
}

impl<N> fmt::Debug for HashRing<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("members", &self.members.len())
            .field("positions", &self.store.len())
            .field("replicas", &self.replicas)
            .field("weighted", &self.weighted)
            .field("hash", &self.hash.name())
            .finish()
    }
}
