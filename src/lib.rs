// ============================================================================
// AcadiaDB Library
// ============================================================================
//
// In-memory learning-management record store. One long-lived store owns
// every table; operations are serialized behind a single coarse lock, apply
// their change in memory, and flush the whole snapshot to a durable
// substrate before returning. There are no partial writes at the storage
// layer and no per-table locks.

pub mod core;
pub mod model;
pub mod store;
pub mod substrate;

// Re-export main types for convenience
pub use crate::core::{Result, StoreError};
pub use crate::model::*;
pub use crate::store::{LmsStore, StoreHandle, predict};
pub use crate::substrate::{DurableSubstrate, FileSubstrate, MemorySubstrate};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_store_seeds_admin() {
        let store = StoreHandle::in_memory();
        let admin = store.get_settings_user().await.unwrap().unwrap();
        assert_eq!(admin.id, "user-1");
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.password, None);

        // The seeded credential works for login.
        let logged_in = store.login_user("admin@zavia.ai", "password123").await.unwrap();
        assert_eq!(logged_in.id, "user-1");
    }

    #[tokio::test]
    async fn test_handle_clones_share_one_store() {
        let store = StoreHandle::in_memory();
        let clone = store.clone();
        store
            .add_course(NewCourse {
                id: Some("ZAI-100".to_string()),
                title: "Robotics".to_string(),
                instructor_id: "instr-1".to_string(),
            })
            .await
            .unwrap();
        let seen = clone.get_course("ZAI-100").await.unwrap();
        assert!(seen.is_some());
    }
}
