//! Error types for the hash ring.

/// Result type alias for the hash ring.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring a hash ring.
///
/// Ring operations themselves never fail: lookups on an empty ring return
/// `None` and placement absorbs hash collisions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The builder was given a configuration the ring cannot honor.
    #[error("invalid ring configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Error::InvalidConfig(reason.into())
    }
}
