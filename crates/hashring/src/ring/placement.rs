//! Virtual position placement.
//!
//! A node's positions come from hashing its labels for replica indices
//! 0, 1, 2, ... An algorithm may return several positions per label, in which
//! case the replica index advances by however many came back. Every position
//! that is already taken (by any node, the same one included) and every label
//! that derives nothing grows the budget by one, so the node still ends up
//! with its full target.
//!
//! Removal replays the identical scan. A position is released only where the
//! insert claimed it; everything else grows the budget exactly as it did on
//! insert, which keeps the two walks in lockstep.

use tracing::{trace, warn};

use super::store::RingStore;
use crate::formatter::NodeKeyFormatter;
use crate::hash::HashAlgorithm;
use crate::node::NodeKey;

/// Placement never scans more than this many times a node's target...
const RETRY_BUDGET_FACTOR: usize = 4;
/// ...or its target plus this, whichever is larger.
const MIN_RETRY_HEADROOM: usize = 64;

/// Bias added before flooring a weighted share, so products that land a hair
/// under an integer (159.99999999) round to it.
pub(crate) const WEIGHT_ROUNDING_EPSILON: f64 = 1e-10;

/// Inputs shared by every placement call of one ring.
pub(crate) struct Placer<'a, N> {
    pub(crate) hash: &'a dyn HashAlgorithm,
    pub(crate) formatter: &'a dyn NodeKeyFormatter<N>,
}

impl<N> Placer<'_, N> {
    /// Inserts up to `target` positions for `node`. Returns how many it got.
    pub(crate) fn place(
        &self,
        store: &mut RingStore,
        node: &N,
        key: &NodeKey,
        target: usize,
    ) -> usize {
        let placed = self.scan(node, key, target, |position| store.claim(position, key));
        trace!(node = %key, target, placed, "placed node");
        placed
    }

    /// Removes the positions [`Placer::place`] gave `node` for `target`.
    pub(crate) fn unplace(
        &self,
        store: &mut RingStore,
        node: &N,
        key: &NodeKey,
        target: usize,
    ) -> usize {
        let released = self.scan(node, key, target, |position| store.release(position, key));
        trace!(node = %key, target, released, "unplaced node");
        released
    }

    /// Walks the node's derived positions, offering each to `visit` until
    /// `target` of them were accepted or the retry budget runs out.
    fn scan(
        &self,
        node: &N,
        key: &NodeKey,
        target: usize,
        mut visit: impl FnMut(u32) -> bool,
    ) -> usize {
        let limit = retry_limit(target);
        let mut budget = target;
        let mut exhausted = false;
        let mut grow = |budget: &mut usize| {
            if *budget < limit {
                *budget += 1;
            } else {
                exhausted = true;
            }
        };

        let mut accepted = 0;
        let mut replica = 0;
        while replica < budget {
            let positions = self.hash.derive(&self.formatter.format(node, replica));
            if positions.is_empty() {
                grow(&mut budget);
                replica += 1;
                continue;
            }
            for (offset, &position) in positions.iter().enumerate() {
                if replica + offset >= budget {
                    break;
                }
                if visit(position) {
                    accepted += 1;
                } else {
                    grow(&mut budget);
                }
            }
            replica += positions.len();
        }

        if exhausted {
            warn!(
                node = %key,
                target,
                accepted,
                limit,
                "retry budget exhausted while placing node; check hash/formatter pairing"
            );
        }
        accepted
    }
}

fn retry_limit(target: usize) -> usize {
    target
        .saturating_mul(RETRY_BUDGET_FACTOR)
        .max(target.saturating_add(MIN_RETRY_HEADROOM))
}

/// Number of positions a node of `weight` gets out of `total_weight`, when
/// `node_count` nodes share `replicas * node_count` positions.
pub(crate) fn weighted_target(
    weight: u32,
    total_weight: u64,
    replicas: usize,
    node_count: usize,
) -> usize {
    let share = f64::from(weight) / total_weight as f64;
    (share * replicas as f64 * node_count as f64 + WEIGHT_ROUNDING_EPSILON).floor() as usize
}
