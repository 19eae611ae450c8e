//! Replication strategies for consistent hashing.
//!
//! A replication strategy picks which nodes hold the copies of a key:
//! - How many replicas to create
//! - Where to place them on the ring

pub mod strategy;

pub use strategy::{ReplicationStrategy, SimpleStrategy};
