//! Entity records held by the store.
//!
//! Field names serialize in camelCase so snapshots and any JSON facade keep
//! the wire shape the dashboard already understands. Update operations take
//! the `*Patch` structs below: `None` preserves the stored value, `Some`
//! overwrites it (shallow merge).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Instructor,
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseStatus {
    #[serde(rename = "On Track")]
    OnTrack,
    #[serde(rename = "At Risk")]
    AtRisk,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    StudentPayment,
    InstructorPayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Paid,
    Pending,
    Failed,
}

/// Account record. Students and instructors additionally have a mirrored
/// row in their own table under the same id; see the people operations for
/// the dual-write discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_meet_id: Option<String>,
}

impl User {
    /// Copy with the credential stripped, for returning to callers.
    pub fn redacted(&self) -> User {
        User {
            password: None,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub created_at: String,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_meet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
}

/// `enrolled` is a denormalized counter kept in lockstep with the
/// enrollment table. `progress` and `status` are externally set, never
/// derived here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub instructor_id: String,
    pub progress: f64,
    pub status: CourseStatus,
    pub next_class: String,
    pub enrolled: u32,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub courses_enrolled: u32,
    pub overall_progress: f64,
    pub join_date: String,
    pub created_at: String,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_meet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTopic {
    pub id: String,
    pub module_id: String,
    pub title: String,
    pub description: String,
}

/// Join row between a student and a course; its existence is the sole
/// source of truth for membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub enrollment_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseContent {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub content_type: ContentKind,
    pub content: String,
}

/// `author_name` is captured at write time and not repaired if the author
/// is later renamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub student_id: String,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    pub created_at: String,
}

/// Same write-time snapshot policy for `student_name` / `student_avatar_url`
/// as [`Note::author_name`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub student_avatar_url: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<String>,
    pub amount: f64,
    pub status: TransactionStatus,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub course_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_google_meet_id: Option<String>,
}

/// Chat session metadata. Activity stamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: String,
    pub title: String,
    pub created_at: i64,
    pub last_active: i64,
}

/// Per-student progress: course id mapped to the set of completed sub-topic
/// ids. Mutated only through the idempotent toggle.
pub type StudentProgress = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCompletion {
    pub completed: usize,
    pub total: usize,
}

/// Course-wide completion: sub-topic id mapped to completed/total counts
/// over currently enrolled students. Recomputed fresh on every call.
pub type CourseProgress = BTreeMap<String, TopicCompletion>;

// ============================================================================
// Derived read models
// ============================================================================

/// Course with its owning instructor embedded, the shape course reads
/// return to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseWithInstructor {
    #[serde(flatten)]
    pub course: Course,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<Instructor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingTopic {
    pub course_id: String,
    pub course_title: String,
    pub module_id: String,
    pub module_title: String,
    pub topic_id: String,
    pub topic_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub total_students: usize,
    pub active_courses: usize,
    pub completion_rate: f64,
    pub average_engagement: f64,
    pub student_engagement: Vec<NamedValue>,
    pub course_popularity: Vec<NamedValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPath {
    pub title: String,
    pub description: String,
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiPrediction {
    pub student_id: String,
    pub predicted_grade: String,
    pub confidence: f64,
    pub career_paths: Vec<CareerPath>,
}

/// Record plus its generated login password. The password is surfaced
/// exactly once here and never stored on the record itself.
#[derive(Debug, Clone)]
pub struct Provisioned<T> {
    pub record: T,
    pub initial_password: String,
}

// ============================================================================
// Creation inputs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewCourse {
    /// Caller-supplied id; checked for uniqueness. Generated when absent.
    pub id: Option<String>,
    pub title: String,
    pub instructor_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub gender: Gender,
    pub join_date: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub google_meet_id: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInstructor {
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub gender: Gender,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub google_meet_id: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub registration_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewModule {
    pub title: String,
    pub description: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubTopic {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContent {
    pub title: String,
    pub content_type: ContentKind,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub student_id: String,
    pub author_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIdea {
    pub student_id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub instructor_name: Option<String>,
    #[serde(default)]
    pub instructor_id: Option<String>,
    pub amount: f64,
    pub status: TransactionStatus,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub start: String,
    pub end: String,
    pub course_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructor_id: Option<String>,
    #[serde(default)]
    pub instructor_google_meet_id: Option<String>,
}

// ============================================================================
// Update patches (shallow merge: None preserves, Some overwrites)
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub progress: Option<f64>,
    pub status: Option<CourseStatus>,
    pub next_class: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub gender: Option<Gender>,
    pub overall_progress: Option<f64>,
    pub join_date: Option<String>,
    pub phone: Option<String>,
    pub google_meet_id: Option<String>,
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstructorPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub google_meet_id: Option<String>,
    pub profile_picture_url: Option<String>,
}

/// Settings-page patch for the current user; avatar is not editable there.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_picture_url: Option<String>,
    pub phone: Option<String>,
    pub google_meet_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModulePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubTopicPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub content_type: Option<ContentKind>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionPatch {
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub student_name: Option<String>,
    pub student_id: Option<String>,
    pub course_name: Option<String>,
    pub course_id: Option<String>,
    pub instructor_name: Option<String>,
    pub instructor_id: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<TransactionStatus>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub course_id: Option<String>,
    pub description: Option<String>,
    pub instructor_id: Option<String>,
    pub instructor_google_meet_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entities_serialize_camel_case() {
        let course = Course {
            id: "ZAI-001".to_string(),
            title: "Intro to AI".to_string(),
            description: None,
            instructor_id: "instr-1".to_string(),
            progress: 0.0,
            status: CourseStatus::OnTrack,
            next_class: "Not scheduled".to_string(),
            enrolled: 0,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        };
        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(json["instructorId"], "instr-1");
        assert_eq!(json["nextClass"], "Not scheduled");
        assert_eq!(json["status"], "On Track");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_transaction_kind_wire_names() {
        let tx = Transaction {
            id: "tx-1".to_string(),
            kind: TransactionKind::StudentPayment,
            student_name: Some("Charlie Brown".to_string()),
            student_id: Some("S001".to_string()),
            course_name: None,
            course_id: None,
            instructor_name: None,
            instructor_id: None,
            amount: 250.0,
            status: TransactionStatus::Paid,
            date: "2024-03-01T00:00:00+00:00".to_string(),
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "student_payment");
        assert_eq!(json["status"], "Paid");
    }

    #[test]
    fn test_user_redaction_strips_password() {
        let user = User {
            id: "user-1".to_string(),
            name: "Admin".to_string(),
            email: "admin@zavia.ai".to_string(),
            avatar_url: "https://i.pravatar.cc/150?u=a042581f4e29026704d".to_string(),
            role: Role::Admin,
            password: Some("password123".to_string()),
            profile_picture_url: None,
            phone: None,
            google_meet_id: None,
        };
        let public = user.redacted();
        assert_eq!(public.password, None);
        assert_eq!(public.email, user.email);
        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_patch_deserializes_with_missing_fields() {
        let patch: CoursePatch = serde_json::from_str(r#"{"title":"Renamed"}"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some("Renamed"));
        assert!(patch.description.is_none());
        assert!(patch.status.is_none());
    }
}
