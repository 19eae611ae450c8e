//! Node key formatters.
//!
//! A formatter renders `(node, replica index)` into the byte label that the
//! hash algorithm turns into ring positions. The replica-0 label doubles as the
//! node's identity on the ring.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Memcached port that libmemcached leaves out of its ketama labels.
const DEFAULT_MEMCACHED_PORT_SUFFIX: &str = ":11211";

/// Renders the label hashed for one replica of a node.
///
/// Implementations must be deterministic: the same node and replica index
/// always produce the same bytes.
pub trait NodeKeyFormatter<N>: Send + Sync {
    /// Returns the label for `replica` of `node`.
    fn format(&self, node: &N, replica: usize) -> Vec<u8>;
}

/// Label layout used by the ketama-compatible clients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyFormat {
    /// `"{node}-{replica}"`, as spymemcached renders socket addresses.
    #[default]
    SpyMemcached,
    /// Like `SpyMemcached`, but a trailing `:11211` is dropped first.
    LibMemcached,
}

/// Formatter for any `Display` node, following the ketama label conventions.
#[derive(Clone, Copy, Debug, Default)]
pub struct KetamaNodeKeyFormatter {
    format: KeyFormat,
}

impl KetamaNodeKeyFormatter {
    pub fn new(format: KeyFormat) -> Self {
        Self { format }
    }

    pub fn key_format(&self) -> KeyFormat {
        self.format
    }
}

impl<N: Display> NodeKeyFormatter<N> for KetamaNodeKeyFormatter {
    fn format(&self, node: &N, replica: usize) -> Vec<u8> {
        let node = node.to_string();
        let node = match self.format {
            KeyFormat::SpyMemcached => node.as_str(),
            KeyFormat::LibMemcached => node
                .strip_suffix(DEFAULT_MEMCACHED_PORT_SUFFIX)
                .unwrap_or(&node),
        };
        format!("{node}-{replica}").into_bytes()
    }
}

/// Adapts a closure into a [`NodeKeyFormatter`].
///
/// Useful when the node type has no `Display`, or when its natural rendering
/// is too strict or too loose to serve as ring identity.
#[derive(Clone, Copy)]
pub struct FnFormatter<F>(F);

impl<F> FnFormatter<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> fmt::Debug for FnFormatter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnFormatter")
    }
}

impl<N, F> NodeKeyFormatter<N> for FnFormatter<F>
where
    F: Fn(&N, usize) -> Vec<u8> + Send + Sync + 'static,
{
    fn format(&self, node: &N, replica: usize) -> Vec<u8> {
        (self.0)(node, replica)
    }
}
