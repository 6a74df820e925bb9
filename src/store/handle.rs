//! Serialized access to the store.

use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::Result;
use crate::model::{
    AiPrediction, AnalyticsData, CalendarEvent, ContentPatch, Course, CourseContent,
    CourseModule, CoursePatch, CourseProgress, CourseWithInstructor, Enrollment, EventPatch,
    Idea, Instructor, InstructorPatch, ModulePatch, NewContent, NewCourse, NewEvent, NewIdea,
    NewInstructor, NewModule, NewNote, NewStudent, NewSubTopic, NewTransaction, NewUser, Note,
    Provisioned, SessionInfo, Student, StudentPatch, StudentProgress, SubTopic, SubTopicPatch,
    Transaction, TransactionPatch, UpcomingTopic, User, UserPatch,
};
use crate::store::LmsStore;
use crate::substrate::{DurableSubstrate, FileSubstrate, MemorySubstrate};

/// Cloneable handle running the store as a single logical actor.
///
/// Every clone shares one [`LmsStore`] behind a coarse async mutex; the
/// tokio mutex queues waiters in arrival order, so operations are strictly
/// serialized and each one observes a fully consistent table set. There are
/// no per-table locks, matching the store's single-writer design.
///
/// # Examples
///
/// ```
/// use acadiadb::{NewCourse, StoreHandle};
///
/// # tokio_test::block_on(async {
/// let store = StoreHandle::in_memory();
/// let course = store
///     .add_course(NewCourse {
///         id: None,
///         title: "Intro to AI".to_string(),
///         instructor_id: "instr-1".to_string(),
///     })
///     .await
///     .unwrap();
/// assert_eq!(course.id, "ZAI-001");
/// # });
/// ```
#[derive(Clone)]
pub struct StoreHandle {
    store: Arc<Mutex<LmsStore>>,
}

impl StoreHandle {
    pub fn new(substrate: Box<dyn DurableSubstrate>) -> Self {
        Self {
            store: Arc::new(Mutex::new(LmsStore::new(substrate))),
        }
    }

    /// Store backed by a snapshot file at `snapshot_path`.
    pub fn open<P: AsRef<Path>>(snapshot_path: P) -> Self {
        Self::new(Box::new(FileSubstrate::new(snapshot_path)))
    }

    /// Ephemeral store for tests and demos.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemorySubstrate::new()))
    }

    // ========================================================================
    // Courses
    // ========================================================================

    pub async fn add_course(&self, new: NewCourse) -> Result<Course> {
        self.store.lock().await.add_course(new).await
    }

    pub async fn update_course(&self, course_id: &str, patch: CoursePatch) -> Result<Course> {
        self.store.lock().await.update_course(course_id, patch).await
    }

    pub async fn delete_course(&self, course_id: &str) -> Result<()> {
        self.store.lock().await.delete_course(course_id).await
    }

    pub async fn get_course(&self, course_id: &str) -> Result<Option<CourseWithInstructor>> {
        self.store.lock().await.get_course(course_id).await
    }

    pub async fn list_courses(&self) -> Result<Vec<CourseWithInstructor>> {
        self.store.lock().await.list_courses().await
    }

    pub async fn list_courses_for_instructor(
        &self,
        instructor_id: &str,
    ) -> Result<Vec<CourseWithInstructor>> {
        self.store
            .lock()
            .await
            .list_courses_for_instructor(instructor_id)
            .await
    }

    pub async fn list_courses_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<CourseWithInstructor>> {
        self.store
            .lock()
            .await
            .list_courses_for_student(student_id)
            .await
    }

    // ========================================================================
    // Curriculum
    // ========================================================================

    pub async fn add_module(&self, course_id: &str, new: NewModule) -> Result<CourseModule> {
        self.store.lock().await.add_module(course_id, new).await
    }

    pub async fn update_module(&self, module_id: &str, patch: ModulePatch) -> Result<CourseModule> {
        self.store.lock().await.update_module(module_id, patch).await
    }

    pub async fn delete_module(&self, module_id: &str) -> Result<()> {
        self.store.lock().await.delete_module(module_id).await
    }

    pub async fn list_modules_for_course(&self, course_id: &str) -> Result<Vec<CourseModule>> {
        self.store.lock().await.list_modules_for_course(course_id).await
    }

    pub async fn add_sub_topic(&self, module_id: &str, new: NewSubTopic) -> Result<SubTopic> {
        self.store.lock().await.add_sub_topic(module_id, new).await
    }

    pub async fn update_sub_topic(
        &self,
        sub_topic_id: &str,
        patch: SubTopicPatch,
    ) -> Result<SubTopic> {
        self.store
            .lock()
            .await
            .update_sub_topic(sub_topic_id, patch)
            .await
    }

    pub async fn delete_sub_topic(&self, sub_topic_id: &str) -> Result<()> {
        self.store.lock().await.delete_sub_topic(sub_topic_id).await
    }

    pub async fn list_sub_topics_for_module(&self, module_id: &str) -> Result<Vec<SubTopic>> {
        self.store
            .lock()
            .await
            .list_sub_topics_for_module(module_id)
            .await
    }

    pub async fn add_course_content(
        &self,
        course_id: &str,
        new: NewContent,
    ) -> Result<CourseContent> {
        self.store.lock().await.add_course_content(course_id, new).await
    }

    pub async fn update_course_content(
        &self,
        content_id: &str,
        patch: ContentPatch,
    ) -> Result<CourseContent> {
        self.store
            .lock()
            .await
            .update_course_content(content_id, patch)
            .await
    }

    pub async fn delete_course_content(&self, content_id: &str) -> Result<()> {
        self.store.lock().await.delete_course_content(content_id).await
    }

    pub async fn list_course_content(&self, course_id: &str) -> Result<Vec<CourseContent>> {
        self.store.lock().await.list_course_content(course_id).await
    }

    // ========================================================================
    // People
    // ========================================================================

    pub async fn add_student(&self, new: NewStudent) -> Result<Provisioned<Student>> {
        self.store.lock().await.add_student(new).await
    }

    pub async fn update_student(&self, student_id: &str, patch: StudentPatch) -> Result<Student> {
        self.store.lock().await.update_student(student_id, patch).await
    }

    pub async fn delete_student(&self, student_id: &str) -> Result<()> {
        self.store.lock().await.delete_student(student_id).await
    }

    pub async fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
        self.store.lock().await.get_student(student_id).await
    }

    pub async fn list_students(&self) -> Result<Vec<Student>> {
        self.store.lock().await.list_students().await
    }

    pub async fn list_students_for_course(&self, course_id: &str) -> Result<Vec<Student>> {
        self.store.lock().await.list_students_for_course(course_id).await
    }

    pub async fn list_students_for_instructor(
        &self,
        instructor_id: &str,
    ) -> Result<Vec<Student>> {
        self.store
            .lock()
            .await
            .list_students_for_instructor(instructor_id)
            .await
    }

    pub async fn add_instructor(&self, new: NewInstructor) -> Result<Provisioned<Instructor>> {
        self.store.lock().await.add_instructor(new).await
    }

    pub async fn update_instructor(
        &self,
        instructor_id: &str,
        patch: InstructorPatch,
    ) -> Result<Instructor> {
        self.store
            .lock()
            .await
            .update_instructor(instructor_id, patch)
            .await
    }

    pub async fn delete_instructor(&self, instructor_id: &str) -> Result<()> {
        self.store.lock().await.delete_instructor(instructor_id).await
    }

    pub async fn list_instructors(&self) -> Result<Vec<Instructor>> {
        self.store.lock().await.list_instructors().await
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    pub async fn register_user(&self, new: NewUser) -> Result<User> {
        self.store.lock().await.register_user(new).await
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<User> {
        self.store.lock().await.login_user(email, password).await
    }

    pub async fn get_settings_user(&self) -> Result<Option<User>> {
        self.store.lock().await.get_settings_user().await
    }

    pub async fn update_settings_user(&self, patch: UserPatch) -> Result<Option<User>> {
        self.store.lock().await.update_settings_user(patch).await
    }

    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        self.store
            .lock()
            .await
            .change_password(user_id, current_password, new_password)
            .await
    }

    pub async fn admin_reset_password(&self, user_id: &str, new_password: &str) -> Result<()> {
        self.store
            .lock()
            .await
            .admin_reset_password(user_id, new_password)
            .await
    }

    // ========================================================================
    // Enrollment
    // ========================================================================

    pub async fn enroll_student(&self, course_id: &str, student_id: &str) -> Result<Enrollment> {
        self.store.lock().await.enroll_student(course_id, student_id).await
    }

    pub async fn unenroll_student(&self, course_id: &str, student_id: &str) -> Result<()> {
        self.store
            .lock()
            .await
            .unenroll_student(course_id, student_id)
            .await
    }

    // ========================================================================
    // Progress
    // ========================================================================

    pub async fn get_student_progress(&self, student_id: &str) -> Result<StudentProgress> {
        self.store.lock().await.get_student_progress(student_id).await
    }

    pub async fn update_sub_topic_progress(
        &self,
        student_id: &str,
        course_id: &str,
        sub_topic_id: &str,
        completed: bool,
    ) -> Result<StudentProgress> {
        self.store
            .lock()
            .await
            .update_sub_topic_progress(student_id, course_id, sub_topic_id, completed)
            .await
    }

    pub async fn get_course_progress(&self, course_id: &str) -> Result<CourseProgress> {
        self.store.lock().await.get_course_progress(course_id).await
    }

    pub async fn list_upcoming_topics(&self, user_id: &str) -> Result<Vec<UpcomingTopic>> {
        self.store.lock().await.list_upcoming_topics(user_id).await
    }

    // ========================================================================
    // Collaboration
    // ========================================================================

    pub async fn list_notes_for_student(&self, student_id: &str) -> Result<Vec<Note>> {
        self.store.lock().await.list_notes_for_student(student_id).await
    }

    pub async fn add_note(&self, new: NewNote) -> Result<Note> {
        self.store.lock().await.add_note(new).await
    }

    pub async fn delete_note(&self, note_id: &str) -> Result<()> {
        self.store.lock().await.delete_note(note_id).await
    }

    pub async fn list_ideas(&self) -> Result<Vec<Idea>> {
        self.store.lock().await.list_ideas().await
    }

    pub async fn add_idea(&self, new: NewIdea) -> Result<Idea> {
        self.store.lock().await.add_idea(new).await
    }

    pub async fn delete_idea(&self, idea_id: &str) -> Result<()> {
        self.store.lock().await.delete_idea(idea_id).await
    }

    // ========================================================================
    // Finance
    // ========================================================================

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.store.lock().await.list_transactions().await
    }

    pub async fn add_transaction(&self, new: NewTransaction) -> Result<Transaction> {
        self.store.lock().await.add_transaction(new).await
    }

    pub async fn update_transaction(
        &self,
        transaction_id: &str,
        patch: TransactionPatch,
    ) -> Result<Transaction> {
        self.store
            .lock()
            .await
            .update_transaction(transaction_id, patch)
            .await
    }

    pub async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        self.store.lock().await.delete_transaction(transaction_id).await
    }

    // ========================================================================
    // Calendar
    // ========================================================================

    pub async fn list_events(&self) -> Result<Vec<CalendarEvent>> {
        self.store.lock().await.list_events().await
    }

    pub async fn add_event(&self, new: NewEvent) -> Result<CalendarEvent> {
        self.store.lock().await.add_event(new).await
    }

    pub async fn update_event(&self, event_id: &str, patch: EventPatch) -> Result<CalendarEvent> {
        self.store.lock().await.update_event(event_id, patch).await
    }

    pub async fn delete_event(&self, event_id: &str) -> Result<()> {
        self.store.lock().await.delete_event(event_id).await
    }

    // ========================================================================
    // Derived reads
    // ========================================================================

    pub async fn get_analytics(&self) -> Result<AnalyticsData> {
        self.store.lock().await.get_analytics().await
    }

    pub async fn get_ai_prediction(&self, student_id: &str) -> Result<AiPrediction> {
        self.store.lock().await.get_ai_prediction(student_id).await
    }

    // ========================================================================
    // Session registry
    // ========================================================================

    pub async fn add_session(
        &self,
        session_id: Option<String>,
        title: Option<String>,
    ) -> Result<SessionInfo> {
        self.store.lock().await.add_session(session_id, title).await
    }

    pub async fn remove_session(&self, session_id: &str) -> Result<bool> {
        self.store.lock().await.remove_session(session_id).await
    }

    pub async fn touch_session(&self, session_id: &str) -> Result<()> {
        self.store.lock().await.touch_session(session_id).await
    }

    pub async fn rename_session(&self, session_id: &str, title: &str) -> Result<bool> {
        self.store.lock().await.rename_session(session_id, title).await
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Option<SessionInfo>> {
        self.store.lock().await.get_session(session_id).await
    }

    pub async fn list_sessions(&self) -> Result<Vec<SessionInfo>> {
        self.store.lock().await.list_sessions().await
    }

    pub async fn session_count(&self) -> Result<usize> {
        self.store.lock().await.session_count().await
    }

    pub async fn clear_sessions(&self) -> Result<usize> {
        self.store.lock().await.clear_sessions().await
    }
}
