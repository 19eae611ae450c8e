//! Simple replication strategy.
//!
//! Places N replicas on the first N distinct nodes clockwise from the key,
//! which is exactly the ring's own traversal order. Works well for:
//!
//! - Small clusters
//! - Single data center deployments
//!
//! # Performance
//!
//! - **Time**: O(log P + k) where P = positions, k = positions walked until
//!   N distinct nodes were found
//! - **Space**: O(N)
//!
//! # Limitations
//!
//! - Doesn't consider data center/rack placement

use hashring::HashRing;
use tracing::trace;

use crate::strategy::ReplicationStrategy;

/// Replication factor used by [`SimpleStrategy::default`].
const DEFAULT_REPLICATION_FACTOR: usize = 3;

/// Simple replication strategy: N replicas on consecutive distinct nodes.
///
/// # Example
///
/// ```rust
/// use hashring::HashRing;
/// use replication::{ReplicationStrategy, SimpleStrategy};
///
/// let mut ring = HashRing::new();
/// ring.add_nodes(["a:11211", "b:11211", "c:11211", "d:11211"]);
///
/// let replicas = SimpleStrategy::new(3).replicas_for_key(&ring, b"my-key");
/// assert_eq!(replicas.len(), 3);
/// assert_eq!(replicas[0], ring.get("my-key").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    /// Number of replicas to create (including primary).
    replication_factor: usize,
}

impl SimpleStrategy {
    pub fn new(replication_factor: usize) -> Self {
        Self { replication_factor }
    }

    pub fn replication_factor(&self) -> usize {
        self.replication_factor
    }
}

impl Default for SimpleStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_REPLICATION_FACTOR)
    }
}

impl<N> ReplicationStrategy<N> for SimpleStrategy {
    fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    fn replicas_for_key<'r>(&self, ring: &'r HashRing<N>, key: &[u8]) -> Vec<&'r N> {
        let replicas: Vec<&N> = ring.iter_from(key).take(self.replication_factor).collect();
        trace!(
            wanted = self.replication_factor,
            found = replicas.len(),
            "selected replicas"
        );
        replicas
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}
