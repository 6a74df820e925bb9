//! Durable key-value substrate behind the store.
//!
//! The store touches durability at exactly two points: one load per
//! activation and one whole-snapshot flush per mutation. The substrate is
//! trusted to make each `store` call atomic and durable on its own; the
//! store performs no retries.

mod file;
mod memory;

pub use file::FileSubstrate;
pub use memory::MemorySubstrate;

use crate::core::Result;
use crate::model::StoreSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait DurableSubstrate: Send + Sync {
    /// Read the last flushed snapshot, or `None` on first-ever activation.
    async fn load(&self) -> Result<Option<StoreSnapshot>>;

    /// Atomically replace the stored snapshot with `snapshot`.
    async fn store(&self, snapshot: &StoreSnapshot) -> Result<()>;
}
