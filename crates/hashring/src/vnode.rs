//! Virtual node view.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Each logical node owns many positions on the ring instead of one. More
//! positions smooth out the share of keys each node receives, and when a node
//! joins or leaves only the keys next to its own positions move.
//!
//! - **Memory**: O(v) per node, v = positions per node
//! - **Lookup**: O(log P), P = positions on the whole ring

use std::fmt;

/// One position on the ring and the node that owns it.
///
/// Yielded by [`HashRing::virtual_nodes`](crate::HashRing::virtual_nodes) in
/// ascending position order.
#[derive(Debug, PartialEq, Eq)]
pub struct VirtualNode<'a, N> {
    /// Position on the 32-bit ring.
    pub position: u32,
    /// The logical node owning this position.
    pub node: &'a N,
}

impl<'a, N> VirtualNode<'a, N> {
    #[inline]
    pub fn new(position: u32, node: &'a N) -> Self {
        Self { position, node }
    }

    /// Clockwise distance from this virtual node to `other`.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> u32 {
        other.position.wrapping_sub(self.position)
    }
}

impl<N> Clone for VirtualNode<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for VirtualNode<'_, N> {}

impl<N: fmt::Display> fmt::Display for VirtualNode<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode(position={:08x}, node={})", self.position, self.node)
    }
}
