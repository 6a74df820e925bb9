use crate::core::{Result, StoreError};
use crate::model::StoreSnapshot;
use crate::substrate::DurableSubstrate;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory substrate for tests and ephemeral stores. Cloning shares the
/// backing slot, so a test can keep a handle to inspect what was flushed or
/// to flip the write-failure switch.
#[derive(Clone, Default)]
pub struct MemorySubstrate {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    snapshot: Option<StoreSnapshot>,
    store_count: usize,
    fail_writes: bool,
}

impl MemorySubstrate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a snapshot, as if a previous activation had flushed it.
    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        let substrate = Self::new();
        substrate.locked().snapshot = Some(snapshot);
        substrate
    }

    /// Make every subsequent `store` call fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.locked().fail_writes = fail;
    }

    /// The last successfully flushed snapshot, if any.
    pub fn flushed(&self) -> Option<StoreSnapshot> {
        self.locked().snapshot.clone()
    }

    /// Number of successful flushes.
    pub fn store_count(&self) -> usize {
        self.locked().store_count
    }

    fn locked(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DurableSubstrate for MemorySubstrate {
    async fn load(&self) -> Result<Option<StoreSnapshot>> {
        Ok(self.locked().snapshot.clone())
    }

    async fn store(&self, snapshot: &StoreSnapshot) -> Result<()> {
        let mut inner = self.locked();
        if inner.fail_writes {
            return Err(StoreError::Storage("simulated write failure".to_string()));
        }
        inner.snapshot = Some(snapshot.clone());
        inner.store_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clone_shares_backing_slot() {
        let substrate = MemorySubstrate::new();
        let observer = substrate.clone();

        substrate.store(&StoreSnapshot::new()).await.unwrap();
        assert_eq!(observer.store_count(), 1);
        assert!(observer.flushed().is_some());
    }

    #[tokio::test]
    async fn test_fail_writes_switch() {
        let substrate = MemorySubstrate::new();
        substrate.set_fail_writes(true);
        let err = substrate.store(&StoreSnapshot::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert!(substrate.flushed().is_none());

        substrate.set_fail_writes(false);
        substrate.store(&StoreSnapshot::new()).await.unwrap();
        assert_eq!(substrate.store_count(), 1);
    }
}
