//! Ketama hashing (MD5, four positions per digest).

use md5::{Digest, Md5};

use super::{le_words, HashAlgorithm};

/// MD5-based ketama hash, compatible with libmemcached and spymemcached.
///
/// Each 16-byte digest yields four positions, so a node with 160 replicas
/// costs 40 digests.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ketama;

impl HashAlgorithm for Ketama {
    fn derive(&self, label: &[u8]) -> Vec<u32> {
        le_words(&Md5::digest(label))
    }

    fn name(&self) -> &'static str {
        "Ketama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(
            Ketama.derive(b""),
            vec![0xd98c_1dd4, 0x04b2_008f, 0x9809_80e9, 0x7e42_f8ec]
        );
    }
}
