//! Replication strategy abstractions.
//!
//! - **SimpleStrategy**: N replicas placed on consecutive distinct nodes
//!   clockwise around the ring

pub mod simple;

pub use simple::SimpleStrategy;

use hashring::HashRing;

/// Trait for replication strategies over rings of `N`.
///
/// Object safe, so strategies can be chosen at runtime as
/// `Box<dyn ReplicationStrategy<N>>`.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (Send + Sync) as they may be
/// shared across threads.
pub trait ReplicationStrategy<N>: Send + Sync {
    /// Number of copies this strategy asks for, primary included.
    fn replication_factor(&self) -> usize;

    /// Nodes that should hold `key`, primary first.
    ///
    /// Returns fewer than [`replication_factor`](Self::replication_factor)
    /// nodes when the ring has fewer members.
    fn replicas_for_key<'r>(&self, ring: &'r HashRing<N>, key: &[u8]) -> Vec<&'r N>;

    /// Get the strategy name (for logging/debugging).
    fn name(&self) -> &'static str;
}
