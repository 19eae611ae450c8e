//! Sorted position index plus the position -> owner table.

use std::collections::HashMap;

use crate::node::NodeKey;

/// A shrunk index is reallocated once its capacity exceeds this many times
/// the live position count.
const SHRINK_FACTOR: usize = 4;

/// Virtual positions of the ring.
///
/// Between public ring calls `positions` holds exactly the keys of `owners`,
/// ascending and without duplicates. Mutations go to `owners` only; callers
/// batch them and finish with a single [`RingStore::rebuild`].
#[derive(Clone, Debug, Default)]
pub(crate) struct RingStore {
    positions: Vec<u32>,
    owners: HashMap<u32, NodeKey>,
}

impl RingStore {
    pub(crate) fn positions(&self) -> &[u32] {
        &self.positions
    }

    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub(crate) fn owner(&self, position: u32) -> Option<&NodeKey> {
        self.owners.get(&position)
    }

    /// Owner of the position at `index` in the sorted index.
    pub(crate) fn owner_at(&self, index: usize) -> &NodeKey {
        &self.owners[&self.positions[index]]
    }

    /// Claims `position` for `owner` unless another virtual node already
    /// holds it. Returns whether the claim succeeded.
    pub(crate) fn claim(&mut self, position: u32, owner: &NodeKey) -> bool {
        if self.owners.contains_key(&position) {
            return false;
        }
        self.owners.insert(position, owner.clone());
        true
    }

    /// Releases `position` if `owner` holds it. Returns whether it did.
    pub(crate) fn release(&mut self, position: u32, owner: &NodeKey) -> bool {
        match self.owners.get(&position) {
            Some(current) if current == owner => {
                self.owners.remove(&position);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.positions = Vec::new();
        self.owners.clear();
    }

    /// Recollects the sorted index from the owner table.
    ///
    /// O(P log P) in the number of positions.
    pub(crate) fn rebuild(&mut self) {
        let mut positions = std::mem::take(&mut self.positions);
        positions.clear();
        if positions.capacity() / SHRINK_FACTOR > self.owners.len() {
            positions = Vec::with_capacity(self.owners.len());
        }
        positions.extend(self.owners.keys().copied());
        positions.sort_unstable();
        self.positions = positions;
    }

    /// Index of the first position at or clockwise after `position`,
    /// wrapping to 0 past the largest one. The store must not be empty.
    pub(crate) fn tail_index(&self, position: u32) -> usize {
        let index = self.positions.partition_point(|&p| p < position);
        if index == self.positions.len() {
            0
        } else {
            index
        }
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.positions.capacity()
    }
}
