//! Enrollment and the counter invariant.
//!
//! The enrollment table is the source of truth for membership;
//! `Course.enrolled` and `Student.courses_enrolled` are denormalized
//! counters that must move in the same operation as the row itself, before
//! the flush. Counters never go below zero.

use chrono::Utc;

use crate::core::{Result, StoreError, ids};
use crate::model::Enrollment;
use crate::store::LmsStore;

impl LmsStore {
    pub async fn enroll_student(
        &mut self,
        course_id: &str,
        student_id: &str,
    ) -> Result<Enrollment> {
        self.ensure_loaded().await?;
        if !self.courses.contains_key(course_id) || !self.students.contains_key(student_id) {
            return Err(StoreError::NotFound(
                "Course or Student not found".to_string(),
            ));
        }
        if self
            .enrollments
            .values()
            .any(|e| e.course_id == course_id && e.student_id == student_id)
        {
            return Err(StoreError::Conflict("Student already enrolled".to_string()));
        }
        let enrollment = Enrollment {
            id: ids::padded_id(&self.enrollments, "E", 3),
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            enrollment_date: Utc::now().to_rfc3339(),
        };
        self.enrollments
            .insert(enrollment.id.clone(), enrollment.clone());
        if let Some(course) = self.courses.get_mut(course_id) {
            course.enrolled += 1;
        }
        if let Some(student) = self.students.get_mut(student_id) {
            student.courses_enrolled += 1;
        }
        self.persist().await?;
        Ok(enrollment)
    }

    pub async fn unenroll_student(&mut self, course_id: &str, student_id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        if !self.courses.contains_key(course_id) || !self.students.contains_key(student_id) {
            return Err(StoreError::NotFound(
                "Course or Student not found".to_string(),
            ));
        }
        let enrollment_id = self
            .enrollments
            .values()
            .find(|e| e.course_id == course_id && e.student_id == student_id)
            .map(|e| e.id.clone())
            .ok_or_else(|| StoreError::NotFound("Enrollment not found".to_string()))?;
        self.enrollments.remove(&enrollment_id);
        if let Some(course) = self.courses.get_mut(course_id) {
            course.enrolled = course.enrolled.saturating_sub(1);
        }
        if let Some(student) = self.students.get_mut(student_id) {
            student.courses_enrolled = student.courses_enrolled.saturating_sub(1);
        }
        self.persist().await?;
        Ok(())
    }
}
