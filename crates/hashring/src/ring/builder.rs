//! Ring construction.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use tracing::debug;

use super::store::RingStore;
use super::HashRing;
use crate::config::RingConfig;
use crate::error::{Error, Result};
use crate::formatter::{KetamaNodeKeyFormatter, NodeKeyFormatter};
use crate::hash::{HashAlgorithm, Ketama};
use crate::node::NodeKey;

/// Virtual positions per node on an unweighted ring, and the per-node basis
/// of a weighted one.
pub const DEFAULT_REPLICAS: usize = 160;

/// Builder for constructing a [`HashRing`].
///
/// # Example
///
/// ```rust
/// use hashring::{HashRing, RingBuilder};
///
/// let ring: HashRing<&str> = RingBuilder::new()
///     .replicas(100)
///     .weighted(true)
///     .weight("cache-a:11211", 1)
///     .weight("cache-b:11211", 3)
///     .nodes(["cache-a:11211", "cache-b:11211"])
///     .build()
///     .unwrap();
///
/// assert_eq!(ring.position_count(), 200);
/// ```
pub struct RingBuilder<N> {
    replicas: usize,
    weighted: bool,
    hash: Arc<dyn HashAlgorithm>,
    formatter: Arc<dyn NodeKeyFormatter<N>>,
    weights: Vec<(N, u32)>,
    nodes: Vec<N>,
}

impl<N: Display> RingBuilder<N> {
    /// Creates a builder using the ketama formatter in spymemcached layout.
    pub fn new() -> Self {
        Self::with_formatter(KetamaNodeKeyFormatter::default())
    }

    /// Creates a builder from a plain configuration.
    pub fn from_config(config: &RingConfig) -> Self {
        Self::with_formatter(KetamaNodeKeyFormatter::new(config.key_format))
            .replicas(config.replicas_per_node)
            .weighted(config.weighted)
            .shared_hash_algorithm(config.hash_algorithm.algorithm())
    }
}

impl<N: Display> Default for RingBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> RingBuilder<N> {
    /// Creates a builder that identifies and labels nodes with `formatter`.
    pub fn with_formatter<F: NodeKeyFormatter<N> + 'static>(formatter: F) -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            weighted: false,
            hash: Arc::new(Ketama),
            formatter: Arc::new(formatter),
            weights: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Sets the number of virtual positions per node.
    pub fn replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    /// Enables weight-proportional placement. Ignored unless at least one
    /// weight is supplied.
    pub fn weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    pub fn weight(mut self, node: N, weight: u32) -> Self {
        self.weights.push((node, weight));
        self
    }

    pub fn weights<I: IntoIterator<Item = (N, u32)>>(mut self, weights: I) -> Self {
        self.weights.extend(weights);
        self
    }

    pub fn hash_algorithm<H: HashAlgorithm>(self, hash: H) -> Self {
        self.shared_hash_algorithm(Arc::new(hash))
    }

    pub fn shared_hash_algorithm(mut self, hash: Arc<dyn HashAlgorithm>) -> Self {
        self.hash = hash;
        self
    }

    pub fn formatter<F: NodeKeyFormatter<N> + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Initial members, added once the ring is built.
    pub fn nodes<I: IntoIterator<Item = N>>(mut self, nodes: I) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Validates the configuration and builds the ring.
    ///
    /// Fails if `replicas` is zero, or if weighting is on and the supplied
    /// weights sum to zero.
    pub fn build(self) -> Result<HashRing<N>> {
        if self.replicas == 0 {
            return Err(Error::invalid_config("replicas per node must be positive"));
        }
        if self.weighted && !self.weights.is_empty() && self.weights.iter().all(|(_, w)| *w == 0) {
            return Err(Error::invalid_config("weights sum to zero"));
        }
        Ok(self.assemble())
    }

    pub(super) fn assemble(self) -> HashRing<N> {
        let RingBuilder {
            replicas,
            weighted,
            hash,
            formatter,
            weights,
            nodes,
        } = self;

        let weights: HashMap<NodeKey, u32> = weights
            .iter()
            .map(|(node, weight)| (NodeKey::of(formatter.as_ref(), node), *weight))
            .collect();
        if weighted && weights.is_empty() {
            debug!("no node weights supplied; weighting disabled");
        }

        let mut ring = HashRing {
            store: RingStore::default(),
            members: Default::default(),
            weighted: weighted && !weights.is_empty(),
            weights,
            replicas,
            hash,
            formatter,
        };
        ring.add_nodes(nodes);
        ring
    }
}
