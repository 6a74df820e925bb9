//! The typed, versioned persistence unit.
//!
//! Every mutating operation flushes one of these as a whole; the substrate
//! never sees partial-field updates. One field per table keeps the layout
//! explicit and lets the format evolve behind the version number instead of
//! drifting shape silently.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::entities::{
    CalendarEvent, Course, CourseContent, CourseModule, Enrollment, Idea, Instructor, Note,
    SessionInfo, Student, StudentProgress, SubTopic, Transaction, User,
};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub version: u32,
    pub sessions: BTreeMap<String, SessionInfo>,
    pub users: BTreeMap<String, User>,
    pub courses: BTreeMap<String, Course>,
    pub students: BTreeMap<String, Student>,
    pub instructors: BTreeMap<String, Instructor>,
    pub settings_user: Option<User>,
    pub events: BTreeMap<String, CalendarEvent>,
    pub modules: BTreeMap<String, CourseModule>,
    pub sub_topics: BTreeMap<String, SubTopic>,
    pub enrollments: BTreeMap<String, Enrollment>,
    pub transactions: BTreeMap<String, Transaction>,
    pub ideas: BTreeMap<String, Idea>,
    pub course_contents: BTreeMap<String, CourseContent>,
    pub student_progress: BTreeMap<String, StudentProgress>,
    pub notes: BTreeMap<String, Note>,
}

impl StoreSnapshot {
    pub fn new() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            sessions: BTreeMap::new(),
            users: BTreeMap::new(),
            courses: BTreeMap::new(),
            students: BTreeMap::new(),
            instructors: BTreeMap::new(),
            settings_user: None,
            events: BTreeMap::new(),
            modules: BTreeMap::new(),
            sub_topics: BTreeMap::new(),
            enrollments: BTreeMap::new(),
            transactions: BTreeMap::new(),
            ideas: BTreeMap::new(),
            course_contents: BTreeMap::new(),
            student_progress: BTreeMap::new(),
            notes: BTreeMap::new(),
        }
    }

    /// Total number of records across all tables.
    pub fn record_count(&self) -> usize {
        self.sessions.len()
            + self.users.len()
            + self.courses.len()
            + self.students.len()
            + self.instructors.len()
            + self.events.len()
            + self.modules.len()
            + self.sub_topics.len()
            + self.enrollments.len()
            + self.transactions.len()
            + self.ideas.len()
            + self.course_contents.len()
            + self.student_progress.len()
            + self.notes.len()
    }
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_snapshot_is_empty_and_versioned() {
        let snapshot = StoreSnapshot::new();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.record_count(), 0);
        assert!(snapshot.settings_user.is_none());
    }

    #[test]
    fn test_snapshot_messagepack_round_trip() {
        let mut snapshot = StoreSnapshot::new();
        snapshot.sessions.insert(
            "sess-1".to_string(),
            SessionInfo {
                id: "sess-1".to_string(),
                title: "Chat 3/1/2024".to_string(),
                created_at: 1_709_251_200_000,
                last_active: 1_709_251_200_000,
            },
        );
        let bytes = rmp_serde::to_vec(&snapshot).unwrap();
        let decoded: StoreSnapshot = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(decoded, snapshot);
    }
}
