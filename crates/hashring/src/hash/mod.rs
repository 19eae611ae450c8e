//! Hash algorithms that turn labels into ring positions.
//!
//! An algorithm may derive several positions from one digest (ketama takes
//! four out of every MD5), which lets placement amortize hashing across
//! replicas.

mod blake3;
mod crc32;
mod fnv;
mod ketama;
mod siphash;
mod xxh3;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use self::blake3::Blake3;
pub use self::crc32::Crc32;
pub use self::fnv::Fnv1a64;
pub use self::ketama::Ketama;
pub use self::siphash::SipHash13;
pub use self::xxh3::Xxh3;

/// Maps a byte label to one or more 32-bit ring positions.
///
/// Implementations are pure: identical input always yields identical output.
pub trait HashAlgorithm: Send + Sync + 'static {
    /// Derives the positions for `label`, in replica order.
    fn derive(&self, label: &[u8]) -> Vec<u32>;

    /// Position of a lookup key: the first derived position, or 0 when the
    /// algorithm derives nothing for `key`.
    fn position(&self, key: &[u8]) -> u32 {
        self.derive(key).first().copied().unwrap_or(0)
    }

    /// Name of the algorithm (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Named hash algorithms, for configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HashAlgorithmKind {
    #[default]
    Ketama,
    Crc32,
    Fnv1a64,
    SipHash13,
    Xxh3,
    Blake3,
}

impl HashAlgorithmKind {
    /// Instantiates the algorithm.
    pub fn algorithm(self) -> Arc<dyn HashAlgorithm> {
        match self {
            HashAlgorithmKind::Ketama => Arc::new(Ketama),
            HashAlgorithmKind::Crc32 => Arc::new(Crc32),
            HashAlgorithmKind::Fnv1a64 => Arc::new(Fnv1a64),
            HashAlgorithmKind::SipHash13 => Arc::new(SipHash13),
            HashAlgorithmKind::Xxh3 => Arc::new(Xxh3),
            HashAlgorithmKind::Blake3 => Arc::new(Blake3),
        }
    }
}

/// Splits a 64-bit digest into two positions, high word first.
fn split_u64(digest: u64) -> Vec<u32> {
    vec![(digest >> 32) as u32, digest as u32]
}

/// Reads consecutive little-endian words out of a digest.
fn le_words(digest: &[u8]) -> Vec<u32> {
    digest
        .chunks_exact(4)
        .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
        .collect()
}
