//! FNV-1a hashing.

use std::hash::Hasher;

use ::fnv::FnvHasher;

use super::HashAlgorithm;

/// 64-bit FNV-1a truncated to its low 32 bits, one position per call.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fnv1a64;

impl HashAlgorithm for Fnv1a64 {
    fn derive(&self, label: &[u8]) -> Vec<u32> {
        let mut hasher = FnvHasher::default();
        hasher.write(label);
        vec![hasher.finish() as u32]
    }

    fn name(&self) -> &'static str {
        "Fnv1a64"
    }
}
