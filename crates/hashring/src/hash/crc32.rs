//! CRC-32 hashing.

use super::HashAlgorithm;

/// CRC-32 (IEEE) checksum of the label, one position per call.
#[derive(Clone, Copy, Debug, Default)]
pub struct Crc32;

impl HashAlgorithm for Crc32 {
    fn derive(&self, label: &[u8]) -> Vec<u32> {
        vec![crc32fast::hash(label)]
    }

    fn name(&self) -> &'static str {
        "Crc32"
    }
}
