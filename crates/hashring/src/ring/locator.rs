//! Key lookup and clockwise traversal.

use std::collections::HashSet;
use std::iter::FusedIterator;

use super::HashRing;
use crate::node::NodeKey;

impl<N> HashRing<N> {
    /// Returns the node owning `key`, or `None` if the ring is empty.
    ///
    /// The key is hashed to a position; the owner is the virtual node at that
    /// exact position or, failing that, the first one clockwise from it,
    /// wrapping past the largest position back to the smallest.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&N> {
        if self.store.is_empty() {
            return None;
        }
        let position = self.hash.position(key.as_ref());
        let owner = match self.store.owner(position) {
            Some(owner) => owner,
            None => self.store.owner_at(self.store.tail_index(position)),
        };
        self.members.get(owner)
    }

    /// Iterates over distinct nodes clockwise, starting with the owner of
    /// `key`.
    ///
    /// Every member holding at least one position is yielded exactly once.
    /// The walk is lazy; dropping the iterator early costs nothing.
    pub fn iter_from(&self, key: impl AsRef<[u8]>) -> Iter<'_, N> {
        let start = if self.store.is_empty() {
            None
        } else {
            Some(self.store.tail_index(self.hash.position(key.as_ref())))
        };
        Iter {
            ring: self,
            start: start.unwrap_or(0),
            cursor: start,
            seen: HashSet::new(),
        }
    }
}

/// Clockwise walk over distinct ring members, created by
/// [`HashRing::iter_from`].
pub struct Iter<'a, N> {
    ring: &'a HashRing<N>,
    start: usize,
    /// Next index of the sorted positions to inspect; `None` once done.
    cursor: Option<usize>,
    seen: HashSet<&'a NodeKey>,
}

impl<'a, N> Iterator for Iter<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        let ring = self.ring;
        while let Some(index) = self.cursor {
            let next = (index + 1) % ring.store.len();
            self.cursor = (next != self.start).then_some(next);

            let owner = ring.store.owner_at(index);
            if self.seen.insert(owner) {
                if self.seen.len() == ring.members.len() {
                    self.cursor = None;
                }
                return ring.members.get(owner);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor {
            Some(_) => (0, Some(self.ring.members.len() - self.seen.len())),
            None => (0, Some(0)),
        }
    }
}

impl<N> FusedIterator for Iter<'_, N> {}

#[cfg(test)]
mod tests {
    use crate::formatter::FnFormatter;
    use crate::hash::HashAlgorithm;
    use crate::{HashRing, RingBuilder};

    /// Labels and keys are decimal numbers; their value is the position.
    struct Literal;

    impl HashAlgorithm for Literal {
        fn derive(&self, label: &[u8]) -> Vec<u32> {
            vec![std::str::from_utf8(label).unwrap().parse().unwrap()]
        }

        fn name(&self) -> &'static str {
            "Literal"
        }
    }

    /// Node `n` owns positions n*10+0, n*10+100, n*10+200, ...
    fn ring(nodes: &[u32], replicas: usize) -> HashRing<u32> {
        RingBuilder::with_formatter(FnFormatter::new(|node: &u32, replica: usize| {
            (node * 10 + replica as u32 * 100).to_string().into_bytes()
        }))
        .hash_algorithm(Literal)
        .replicas(replicas)
        .nodes(nodes.iter().copied())
        .build()
        .unwrap()
    }

    #[test]
    fn test_get_exact_and_next() {
        // positions: 10 -> 1, 20 -> 2, 30 -> 3
        let ring = ring(&[1, 2, 3], 1);
        assert_eq!(ring.get("10"), Some(&1));
        assert_eq!(ring.get("11"), Some(&2));
        assert_eq!(ring.get("20"), Some(&2));
        assert_eq!(ring.get("0"), Some(&1));
    }

    #[test]
    fn test_get_wraps_around() {
        let ring = ring(&[1, 2, 3], 1);
        assert_eq!(ring.max_position(), Some(30));
        assert_eq!(ring.get("31"), Some(&1));
        assert_eq!(ring.get(u32::MAX.to_string()), Some(&1));
    }

    #[test]
    fn test_get_empty_ring() {
        let ring = ring(&[], 1);
        assert_eq!(ring.get("10"), None);
        assert_eq!(ring.iter_from("10").count(), 0);
    }

    #[test]
    fn test_iter_from_order() {
        // 10 -> 1, 20 -> 2, 30 -> 3, 110 -> 1, 120 -> 2, 130 -> 3
        let ring = ring(&[1, 2, 3], 2);
        let order: Vec<u32> = ring.iter_from("25").copied().collect();
        assert_eq!(order, vec![3, 1, 2]);

        let order: Vec<u32> = ring.iter_from("131").copied().collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_iter_from_starts_at_get() {
        let ring = ring(&[1, 2, 3, 4, 5], 3);
        for key in ["0", "17", "42", "99", "250", "999"] {
            assert_eq!(ring.iter_from(key).next(), ring.get(key));
        }
    }

    #[test]
    fn test_iter_stops_early() {
        let ring = ring(&[1, 2, 3], 2);
        let mut iter = ring.iter_from("0");
        assert_eq!(iter.size_hint(), (0, Some(3)));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.size_hint(), (0, Some(2)));
        drop(iter);

        // Restarting re-derives the start.
        let first_two: Vec<&u32> = ring.iter_from("0").take(2).collect();
        assert_eq!(first_two, vec![&1, &2]);
    }

    #[test]
    fn test_iter_exhausted_stays_exhausted() {
        let ring = ring(&[1, 2], 1);
        let mut iter = ring.iter_from("15");
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }
}
