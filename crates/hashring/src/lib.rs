//! Consistent hash ring (node locator).
//!
//! This crate maps arbitrary keys onto a changing set of nodes (cache shards,
//! backends) so that adding or removing a node only remaps the keys next to
//! that node's positions:
//! - Hash algorithms turning labels into 32-bit ring positions
//! - Node key formatters rendering `(node, replica)` labels
//! - Uniform and weight-proportional virtual node placement
//! - Lookup with wraparound and clockwise traversal of distinct nodes
//!
//! ```rust
//! use hashring::HashRing;
//!
//! let mut ring = HashRing::new();
//! ring.add_nodes(["cache-a:11211", "cache-b:11211", "cache-c:11211"]);
//!
//! let owner = ring.get("user:42").unwrap();
//! assert_eq!(ring.iter_from("user:42").next(), Some(owner));
//! assert_eq!(ring.iter_from("user:42").count(), 3);
//! ```

pub mod config;
pub mod error;
pub mod formatter;
pub mod hash;
mod node;
pub mod ring;
pub mod vnode;

pub use config::RingConfig;
pub use error::{Error, Result};
pub use formatter::{FnFormatter, KeyFormat, KetamaNodeKeyFormatter, NodeKeyFormatter};
pub use hash::{HashAlgorithm, HashAlgorithmKind};
pub use ring::{HashRing, Iter, RingBuilder, DEFAULT_REPLICAS};
pub use vnode::VirtualNode;
