//! SipHash-1-3 hashing.

use std::hash::Hasher;

use siphasher::sip::SipHasher13;

use super::{split_u64, HashAlgorithm};

/// SipHash-1-3 with zero keys; each digest yields two positions.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipHash13;

impl HashAlgorithm for SipHash13 {
    fn derive(&self, label: &[u8]) -> Vec<u32> {
        let mut hasher = SipHasher13::new();
        hasher.write(label);
        split_u64(hasher.finish())
    }

    fn name(&self) -> &'static str {
        "SipHash13"
    }
}
