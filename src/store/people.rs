//! Students and instructors, and the user-mirroring discipline.
//!
//! A student or instructor created here also gets a login: a `User` row
//! under the same id, carrying a generated password that is returned once
//! and never stored on the management record. Profile updates flow through
//! [`LmsStore::repair_mirrors`], the single place the denormalized
//! user/student/instructor triad is kept in sync.

use chrono::Utc;
use rand::Rng;
use std::collections::BTreeSet;

use crate::core::{Result, StoreError, ids};
use crate::model::{
    Instructor, InstructorPatch, NewInstructor, NewStudent, Provisioned, Role, Student,
    StudentPatch, User, UserPatch,
};
use crate::store::LmsStore;

const PASSWORD_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const PASSWORD_LEN: usize = 8;

/// `prefix-xxxxxxxx`, lowercase base-36 suffix.
fn generated_password(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..PASSWORD_LEN)
        .map(|_| PASSWORD_CHARSET[rng.gen_range(0..PASSWORD_CHARSET.len())] as char)
        .collect();
    format!("{prefix}-{suffix}")
}

/// The profile fields shared by the user/student/instructor triad.
#[derive(Debug, Clone, Default)]
pub(crate) struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub profile_picture_url: Option<String>,
    pub phone: Option<String>,
    pub google_meet_id: Option<String>,
}

impl From<&StudentPatch> for ProfilePatch {
    fn from(patch: &StudentPatch) -> Self {
        Self {
            name: patch.name.clone(),
            email: patch.email.clone(),
            avatar_url: patch.avatar_url.clone(),
            profile_picture_url: patch.profile_picture_url.clone(),
            phone: patch.phone.clone(),
            google_meet_id: patch.google_meet_id.clone(),
        }
    }
}

impl From<&InstructorPatch> for ProfilePatch {
    fn from(patch: &InstructorPatch) -> Self {
        Self {
            name: patch.name.clone(),
            email: patch.email.clone(),
            avatar_url: patch.avatar_url.clone(),
            profile_picture_url: patch.profile_picture_url.clone(),
            phone: patch.phone.clone(),
            google_meet_id: patch.google_meet_id.clone(),
        }
    }
}

impl From<&UserPatch> for ProfilePatch {
    fn from(patch: &UserPatch) -> Self {
        Self {
            name: patch.name.clone(),
            email: patch.email.clone(),
            avatar_url: None,
            profile_picture_url: patch.profile_picture_url.clone(),
            phone: patch.phone.clone(),
            google_meet_id: patch.google_meet_id.clone(),
        }
    }
}

impl ProfilePatch {
    fn apply_to_user(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(avatar_url) = &self.avatar_url {
            user.avatar_url = avatar_url.clone();
        }
        if let Some(url) = &self.profile_picture_url {
            user.profile_picture_url = Some(url.clone());
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(meet) = &self.google_meet_id {
            user.google_meet_id = Some(meet.clone());
        }
    }

    fn apply_to_student(&self, student: &mut Student) {
        if let Some(name) = &self.name {
            student.name = name.clone();
        }
        if let Some(email) = &self.email {
            student.email = email.clone();
        }
        if let Some(avatar_url) = &self.avatar_url {
            student.avatar_url = avatar_url.clone();
        }
        if let Some(url) = &self.profile_picture_url {
            student.profile_picture_url = Some(url.clone());
        }
        if let Some(phone) = &self.phone {
            student.phone = Some(phone.clone());
        }
        if let Some(meet) = &self.google_meet_id {
            student.google_meet_id = Some(meet.clone());
        }
    }

    fn apply_to_instructor(&self, instructor: &mut Instructor) {
        if let Some(name) = &self.name {
            instructor.name = name.clone();
        }
        if let Some(email) = &self.email {
            instructor.email = email.clone();
        }
        if let Some(avatar_url) = &self.avatar_url {
            instructor.avatar_url = avatar_url.clone();
        }
        if let Some(url) = &self.profile_picture_url {
            instructor.profile_picture_url = Some(url.clone());
        }
        if let Some(phone) = &self.phone {
            instructor.phone = Some(phone.clone());
        }
        if let Some(meet) = &self.google_meet_id {
            instructor.google_meet_id = Some(meet.clone());
        }
    }
}

impl LmsStore {
    /// Apply shared profile fields to every record of the triad holding
    /// this id, the settings user included. Callers persist afterwards.
    pub(crate) fn repair_mirrors(&mut self, id: &str, patch: &ProfilePatch) {
        if let Some(user) = self.users.get_mut(id) {
            patch.apply_to_user(user);
        }
        if let Some(student) = self.students.get_mut(id) {
            patch.apply_to_student(student);
        }
        if let Some(instructor) = self.instructors.get_mut(id) {
            patch.apply_to_instructor(instructor);
        }
        if let Some(user) = self.settings_user.as_mut()
            && user.id == id
        {
            patch.apply_to_user(user);
        }
    }

    // ========================================================================
    // Students
    // ========================================================================

    pub async fn add_student(&mut self, new: NewStudent) -> Result<Provisioned<Student>> {
        self.ensure_loaded().await?;
        let initial_password = generated_password("student");
        let student = Student {
            id: ids::padded_id(&self.students, "S", 3),
            name: new.name,
            email: new.email,
            avatar_url: new.avatar_url,
            courses_enrolled: 0,
            overall_progress: 0.0,
            join_date: new.join_date,
            created_at: Utc::now().to_rfc3339(),
            gender: new.gender,
            phone: new.phone,
            google_meet_id: new.google_meet_id,
            profile_picture_url: new.profile_picture_url,
        };
        let user = User {
            id: student.id.clone(),
            name: student.name.clone(),
            email: student.email.clone(),
            avatar_url: student.avatar_url.clone(),
            role: Role::Student,
            password: Some(initial_password.clone()),
            profile_picture_url: student.profile_picture_url.clone(),
            phone: student.phone.clone(),
            google_meet_id: student.google_meet_id.clone(),
        };
        self.students.insert(student.id.clone(), student.clone());
        self.users.insert(user.id.clone(), user);
        self.persist().await?;
        Ok(Provisioned {
            record: student,
            initial_password,
        })
    }

    pub async fn update_student(
        &mut self,
        student_id: &str,
        patch: StudentPatch,
    ) -> Result<Student> {
        self.ensure_loaded().await?;
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| StoreError::NotFound("Student not found".to_string()))?;
        if let Some(gender) = patch.gender {
            student.gender = gender;
        }
        if let Some(overall_progress) = patch.overall_progress {
            student.overall_progress = overall_progress;
        }
        if let Some(join_date) = &patch.join_date {
            student.join_date = join_date.clone();
        }
        self.repair_mirrors(student_id, &ProfilePatch::from(&patch));
        let updated = self.students[student_id].clone();
        self.persist().await?;
        Ok(updated)
    }

    /// Remove the student record. The mirrored user (and its login) is
    /// intentionally left in place, unlike instructor deletion; see
    /// DESIGN.md.
    pub async fn delete_student(&mut self, student_id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        if self.students.remove(student_id).is_none() {
            return Err(StoreError::NotFound("Student not found".to_string()));
        }
        self.persist().await?;
        Ok(())
    }

    pub async fn get_student(&mut self, student_id: &str) -> Result<Option<Student>> {
        self.ensure_loaded().await?;
        Ok(self.students.get(student_id).cloned())
    }

    pub async fn list_students(&mut self) -> Result<Vec<Student>> {
        self.ensure_loaded().await?;
        Ok(self.students.values().cloned().collect())
    }

    pub async fn list_students_for_course(&mut self, course_id: &str) -> Result<Vec<Student>> {
        self.ensure_loaded().await?;
        Ok(self
            .enrollments
            .values()
            .filter(|e| e.course_id == course_id)
            .filter_map(|e| self.students.get(&e.student_id))
            .cloned()
            .collect())
    }

    /// Every student enrolled in any of the instructor's courses, once.
    pub async fn list_students_for_instructor(
        &mut self,
        instructor_id: &str,
    ) -> Result<Vec<Student>> {
        self.ensure_loaded().await?;
        let course_ids: BTreeSet<&str> = self
            .courses
            .values()
            .filter(|c| c.instructor_id == instructor_id)
            .map(|c| c.id.as_str())
            .collect();
        let student_ids: BTreeSet<&str> = self
            .enrollments
            .values()
            .filter(|e| course_ids.contains(e.course_id.as_str()))
            .map(|e| e.student_id.as_str())
            .collect();
        Ok(student_ids
            .iter()
            .filter_map(|id| self.students.get(*id))
            .cloned()
            .collect())
    }

    // ========================================================================
    // Instructors
    // ========================================================================

    pub async fn add_instructor(&mut self, new: NewInstructor) -> Result<Provisioned<Instructor>> {
        self.ensure_loaded().await?;
        let initial_password = generated_password("instr");
        let instructor = Instructor {
            id: ids::serial_id(&self.instructors, "instr-"),
            name: new.name,
            email: new.email,
            avatar_url: new.avatar_url,
            created_at: Utc::now().to_rfc3339(),
            gender: new.gender,
            phone: new.phone,
            google_meet_id: new.google_meet_id,
            profile_picture_url: new.profile_picture_url,
        };
        let user = User {
            id: instructor.id.clone(),
            name: instructor.name.clone(),
            email: instructor.email.clone(),
            avatar_url: instructor.avatar_url.clone(),
            role: Role::Instructor,
            password: Some(initial_password.clone()),
            profile_picture_url: instructor.profile_picture_url.clone(),
            phone: instructor.phone.clone(),
            google_meet_id: instructor.google_meet_id.clone(),
        };
        self.instructors
            .insert(instructor.id.clone(), instructor.clone());
        self.users.insert(user.id.clone(), user);
        self.persist().await?;
        Ok(Provisioned {
            record: instructor,
            initial_password,
        })
    }

    pub async fn update_instructor(
        &mut self,
        instructor_id: &str,
        patch: InstructorPatch,
    ) -> Result<Instructor> {
        self.ensure_loaded().await?;
        let instructor = self
            .instructors
            .get_mut(instructor_id)
            .ok_or_else(|| StoreError::NotFound("Instructor not found".to_string()))?;
        if let Some(gender) = patch.gender {
            instructor.gender = gender;
        }
        self.repair_mirrors(instructor_id, &ProfilePatch::from(&patch));
        let updated = self.instructors[instructor_id].clone();
        self.persist().await?;
        Ok(updated)
    }

    /// Remove the instructor and the mirrored user in one operation.
    pub async fn delete_instructor(&mut self, instructor_id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        if self.instructors.remove(instructor_id).is_none() {
            return Err(StoreError::NotFound("Instructor not found".to_string()));
        }
        self.users.remove(instructor_id);
        self.persist().await?;
        Ok(())
    }

    pub async fn list_instructors(&mut self) -> Result<Vec<Instructor>> {
        self.ensure_loaded().await?;
        Ok(self.instructors.values().cloned().collect())
    }
}
