//! The chat-session registry.
//!
//! An independent table in the same snapshot bag, following the same
//! load-mutate-flush discipline as the LMS tables but with its own
//! lifecycle: sessions come and go without touching any other entity.

use chrono::Utc;
use uuid::Uuid;

use crate::core::Result;
use crate::model::SessionInfo;
use crate::store::LmsStore;

impl LmsStore {
    /// Register a session under the supplied id (generated when absent).
    /// Re-adding an existing id overwrites it, resetting both stamps.
    pub async fn add_session(
        &mut self,
        session_id: Option<String>,
        title: Option<String>,
    ) -> Result<SessionInfo> {
        self.ensure_loaded().await?;
        let now = Utc::now();
        let session = SessionInfo {
            id: session_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: title.unwrap_or_else(|| format!("Chat {}", now.format("%-m/%-d/%Y"))),
            created_at: now.timestamp_millis(),
            last_active: now.timestamp_millis(),
        };
        self.sessions.insert(session.id.clone(), session.clone());
        self.persist().await?;
        Ok(session)
    }

    /// Returns whether anything was removed; only then is a flush owed.
    pub async fn remove_session(&mut self, session_id: &str) -> Result<bool> {
        self.ensure_loaded().await?;
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            self.persist().await?;
        }
        Ok(removed)
    }

    /// Bump the activity stamp. A missing session is a quiet no-op.
    pub async fn touch_session(&mut self, session_id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        if let Some(session) = self.sessions.get_mut(session_id) {
            session.last_active = Utc::now().timestamp_millis();
            self.persist().await?;
        }
        Ok(())
    }

    pub async fn rename_session(&mut self, session_id: &str, title: &str) -> Result<bool> {
        self.ensure_loaded().await?;
        match self.sessions.get_mut(session_id) {
            Some(session) => {
                session.title = title.to_string();
                self.persist().await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn get_session(&mut self, session_id: &str) -> Result<Option<SessionInfo>> {
        self.ensure_loaded().await?;
        Ok(self.sessions.get(session_id).cloned())
    }

    /// Most recently active first.
    pub async fn list_sessions(&mut self) -> Result<Vec<SessionInfo>> {
        self.ensure_loaded().await?;
        let mut sessions: Vec<SessionInfo> = self.sessions.values().cloned().collect();
        sessions.sort_by(|a, b| b.last_active.cmp(&a.last_active));
        Ok(sessions)
    }

    pub async fn session_count(&mut self) -> Result<usize> {
        self.ensure_loaded().await?;
        Ok(self.sessions.len())
    }

    /// Drop every session; returns how many were removed.
    pub async fn clear_sessions(&mut self) -> Result<usize> {
        self.ensure_loaded().await?;
        let count = self.sessions.len();
        self.sessions.clear();
        self.persist().await?;
        Ok(count)
    }
}
