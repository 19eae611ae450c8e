//! Plain ring configuration.

use serde::{Deserialize, Serialize};

use crate::formatter::KeyFormat;
use crate::hash::HashAlgorithmKind;
use crate::ring::DEFAULT_REPLICAS;

/// Serializable ring settings, applied with
/// [`RingBuilder::from_config`](crate::RingBuilder::from_config).
///
/// Missing fields take their defaults:
///
/// ```rust
/// use hashring::{HashAlgorithmKind, RingConfig};
///
/// let config: RingConfig = serde_json::from_str(r#"{ "hash_algorithm": "xxh3" }"#).unwrap();
/// assert_eq!(config.replicas_per_node, 160);
/// assert_eq!(config.hash_algorithm, HashAlgorithmKind::Xxh3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    pub replicas_per_node: usize,
    pub weighted: bool,
    pub hash_algorithm: HashAlgorithmKind,
    pub key_format: KeyFormat,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            replicas_per_node: DEFAULT_REPLICAS,
            weighted: false,
            hash_algorithm: HashAlgorithmKind::default(),
            key_format: KeyFormat::default(),
        }
    }
}
