//! Canonical node identity.
//!
//! The ring never compares nodes with their own `Eq`. Two nodes are the same
//! member iff the formatter renders the same label for replica 0, and that
//! label is what the ring keys its tables on.

use std::fmt;
use std::sync::Arc;

use crate::formatter::NodeKeyFormatter;

/// Replica-0 label of a node, shared between the member table and every
/// virtual position the node owns.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeKey(Arc<[u8]>);

impl NodeKey {
    pub(crate) fn of<N>(formatter: &dyn NodeKeyFormatter<N>, node: &N) -> Self {
        NodeKey(formatter.format(node, 0).into())
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeKey({self})")
    }
}
