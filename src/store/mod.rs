//! The record store actor.
//!
//! [`LmsStore`] owns every table outright; nothing else reads or writes
//! them. Operations follow one discipline: ensure the tables are loaded,
//! apply the in-memory change, flush the whole snapshot, return the result
//! or a typed failure. The struct itself is not synchronized: wrap it in a
//! [`StoreHandle`] to serialize access, or hold it by exclusive reference
//! in an embedding of your own.

mod accounts;
mod analytics;
mod collab;
mod courses;
mod curriculum;
mod enrollment;
mod events;
mod finance;
mod handle;
mod people;
mod prediction;
mod progress;
mod sessions;

pub use handle::StoreHandle;
pub use prediction::{CAREER_CATALOG, CareerSeed, predict};

use std::collections::BTreeMap;

use crate::core::Result;
use crate::model::{
    CalendarEvent, Course, CourseContent, CourseModule, Enrollment, Idea, Instructor, Note, Role,
    SessionInfo, StoreSnapshot, Student, StudentProgress, SubTopic, Transaction, User,
};
use crate::substrate::DurableSubstrate;

pub struct LmsStore {
    substrate: Box<dyn DurableSubstrate>,
    loaded: bool,
    pub(crate) sessions: BTreeMap<String, SessionInfo>,
    pub(crate) users: BTreeMap<String, User>,
    pub(crate) courses: BTreeMap<String, Course>,
    pub(crate) students: BTreeMap<String, Student>,
    pub(crate) instructors: BTreeMap<String, Instructor>,
    pub(crate) settings_user: Option<User>,
    pub(crate) events: BTreeMap<String, CalendarEvent>,
    pub(crate) modules: BTreeMap<String, CourseModule>,
    pub(crate) sub_topics: BTreeMap<String, SubTopic>,
    pub(crate) enrollments: BTreeMap<String, Enrollment>,
    pub(crate) transactions: BTreeMap<String, Transaction>,
    pub(crate) ideas: BTreeMap<String, Idea>,
    pub(crate) course_contents: BTreeMap<String, CourseContent>,
    pub(crate) student_progress: BTreeMap<String, StudentProgress>,
    pub(crate) notes: BTreeMap<String, Note>,
}

impl LmsStore {
    pub fn new(substrate: Box<dyn DurableSubstrate>) -> Self {
        Self {
            substrate,
            loaded: false,
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

    /// Populate the tables from the substrate, once per activation.
    ///
    /// A store with an empty user table after load is considered freshly
    /// provisioned and gets the seed administrator. The guard is the
    /// emptiness check itself, so deleting every user resurrects the admin
    /// on the next activation; see DESIGN.md.
    pub(crate) async fn ensure_loaded(&mut self) -> Result<()> {
        if self.loaded {
            return Ok(());
        }
        // Install unconditionally: a reload after a failed flush must clear
        // the uncommitted in-memory change, not merge over it.
        match self.substrate.load().await? {
            Some(snapshot) => {
                log::debug!("loaded snapshot with {} records", snapshot.record_count());
                self.install(snapshot);
            }
            None => self.install(StoreSnapshot::new()),
        }
        if self.users.is_empty() {
            self.seed();
        }
        self.loaded = true;
        Ok(())
    }

    /// One-time provisioning: the fixed administrator account, also set as
    /// the settings user.
    fn seed(&mut self) {
        let admin = User {
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
        log::info!("empty user table, seeding administrator {}", admin.id);
        self.settings_user = Some(admin.clone());
        self.users.insert(admin.id.clone(), admin);
    }

    fn install(&mut self, snapshot: StoreSnapshot) {
        self.sessions = snapshot.sessions;
        self.users = snapshot.users;
        self.courses = snapshot.courses;
        self.students = snapshot.students;
        self.instructors = snapshot.instructors;
        self.settings_user = snapshot.settings_user;
        self.events = snapshot.events;
        self.modules = snapshot.modules;
        self.sub_topics = snapshot.sub_topics;
        self.enrollments = snapshot.enrollments;
        self.transactions = snapshot.transactions;
        self.ideas = snapshot.ideas;
        self.course_contents = snapshot.course_contents;
        self.student_progress = snapshot.student_progress;
        self.notes = snapshot.notes;
    }

    pub(crate) fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            version: crate::model::SNAPSHOT_VERSION,
            sessions: self.sessions.clone(),
            users: self.users.clone(),
            courses: self.courses.clone(),
            students: self.students.clone(),
            instructors: self.instructors.clone(),
            settings_user: self.settings_user.clone(),
            events: self.events.clone(),
            modules: self.modules.clone(),
            sub_topics: self.sub_topics.clone(),
            enrollments: self.enrollments.clone(),
            transactions: self.transactions.clone(),
            ideas: self.ideas.clone(),
            course_contents: self.course_contents.clone(),
            student_progress: self.student_progress.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Flush the whole snapshot. Every mutating operation calls this last;
    /// if the flush fails the operation fails, and the loaded flag is
    /// dropped so the next operation reloads the last durable snapshot
    /// instead of serving the uncommitted in-memory change.
    pub(crate) async fn persist(&mut self) -> Result<()> {
        if let Err(err) = self.substrate.store(&self.snapshot()).await {
            log::warn!("snapshot flush failed, discarding in-memory state: {err}");
            self.loaded = false;
            return Err(err);
        }
        Ok(())
    }
}
