//! Route store subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher
//!     → RouteStore::get(raw_path)
//!     → redis.rs (HGET against the route-table hash) or memory.rs (tests)
//!     → Some(bytes) | None | StoreError
//! ```
//!
//! # Design Decisions
//! - The store is a read-only lookup capability; the router never writes
//! - One process-wide connection handle, lazily established, shared across
//!   concurrent dispatches without locking (the manager multiplexes)
//! - Absent key is `Ok(None)`, a distinct non-error outcome

pub mod memory;
pub mod redis;

pub use self::memory::MemoryRouteStore;
pub use self::redis::RedisRouteStore;

use async_trait::async_trait;
use thiserror::Error;

/// Failure against the route store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection failed: {0}")]
    Connection(String),

    #[error("store query failed: {0}")]
    Query(String),
}

/// Lookup capability the dispatcher needs from the route store.
#[async_trait]
pub trait RouteStore: Send + Sync {
    /// Fetch the raw value stored at `key`, or `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
}
