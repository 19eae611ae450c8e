//! XXH3 hashing.

use xxhash_rust::xxh3::xxh3_64;

use super::{split_u64, HashAlgorithm};

/// XXH3-64; each digest yields two positions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3;

impl HashAlgorithm for Xxh3 {
    fn derive(&self, label: &[u8]) -> Vec<u32> {
        split_u64(xxh3_64(label))
    }

    fn name(&self) -> &'static str {
        "Xxh3"
    }
}
