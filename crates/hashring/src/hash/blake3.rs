//! BLAKE3 hashing.

use super::{le_words, HashAlgorithm};

/// BLAKE3; the 32-byte digest yields eight positions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3;

impl HashAlgorithm for Blake3 {
    fn derive(&self, label: &[u8]) -> Vec<u32> {
        le_words(::blake3::hash(label).as_bytes())
    }

    fn name(&self) -> &'static str {
        "Blake3"
    }
}
