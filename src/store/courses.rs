//! Course operations, including the deletion cascade.

use chrono::Utc;

use crate::core::{Result, StoreError, ids};
use crate::model::{Course, CoursePatch, CourseStatus, CourseWithInstructor, NewCourse};
use crate::store::LmsStore;

impl LmsStore {
    /// Create a course. A caller-supplied id is honored but must be unused;
    /// otherwise ids are minted as `ZAI-NNN`.
    pub async fn add_course(&mut self, new: NewCourse) -> Result<Course> {
        self.ensure_loaded().await?;
        let id = match new.id {
            Some(id) => {
                if self.courses.contains_key(&id) {
                    return Err(StoreError::Conflict("Course ID already in use.".to_string()));
                }
                id
            }
            None => ids::padded_id(&self.courses, "ZAI-", 3),
        };
        let course = Course {
            id,
            title: new.title,
            description: None,
            instructor_id: new.instructor_id,
            progress: 0.0,
            status: CourseStatus::OnTrack,
            next_class: "Not scheduled".to_string(),
            enrolled: 0,
            created_at: Utc::now().to_rfc3339(),
        };
        self.courses.insert(course.id.clone(), course.clone());
        self.persist().await?;
        Ok(course)
    }

    pub async fn update_course(&mut self, course_id: &str, patch: CoursePatch) -> Result<Course> {
        self.ensure_loaded().await?;
        let course = self
            .courses
            .get_mut(course_id)
            .ok_or_else(|| StoreError::NotFound("Course not found".to_string()))?;
        if let Some(title) = patch.title {
            course.title = title;
        }
        if let Some(description) = patch.description {
            course.description = Some(description);
        }
        if let Some(progress) = patch.progress {
            course.progress = progress;
        }
        if let Some(status) = patch.status {
            course.status = status;
        }
        if let Some(next_class) = patch.next_class {
            course.next_class = next_class;
        }
        let updated = course.clone();
        self.persist().await?;
        Ok(updated)
    }

    /// Delete a course and repair what refers to it: modules go, enrollments
    /// go with the affected students' counters decremented (floored at
    /// zero). Sub-topics and course contents under the removed modules are
    /// deliberately left behind; see DESIGN.md.
    pub async fn delete_course(&mut self, course_id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        if self.courses.remove(course_id).is_none() {
            return Err(StoreError::NotFound("Course not found".to_string()));
        }
        self.modules.retain(|_, module| module.course_id != course_id);

        let doomed: Vec<String> = self
            .enrollments
            .iter()
            .filter(|(_, e)| e.course_id == course_id)
            .map(|(id, _)| id.clone())
            .collect();
        for enrollment_id in doomed {
            if let Some(enrollment) = self.enrollments.remove(&enrollment_id)
                && let Some(student) = self.students.get_mut(&enrollment.student_id)
            {
                student.courses_enrolled = student.courses_enrolled.saturating_sub(1);
            }
        }
        self.persist().await?;
        Ok(())
    }

    pub async fn get_course(&mut self, course_id: &str) -> Result<Option<CourseWithInstructor>> {
        self.ensure_loaded().await?;
        Ok(self
            .courses
            .get(course_id)
            .map(|course| self.with_instructor(course)))
    }

    pub async fn list_courses(&mut self) -> Result<Vec<CourseWithInstructor>> {
        self.ensure_loaded().await?;
        Ok(self
            .courses
            .values()
            .map(|course| self.with_instructor(course))
            .collect())
    }

    pub async fn list_courses_for_instructor(
        &mut self,
        instructor_id: &str,
    ) -> Result<Vec<CourseWithInstructor>> {
        self.ensure_loaded().await?;
        Ok(self
            .courses
            .values()
            .filter(|course| course.instructor_id == instructor_id)
            .map(|course| self.with_instructor(course))
            .collect())
    }

    pub async fn list_courses_for_student(
        &mut self,
        student_id: &str,
    ) -> Result<Vec<CourseWithInstructor>> {
        self.ensure_loaded().await?;
        Ok(self
            .enrollments
            .values()
            .filter(|e| e.student_id == student_id)
            .filter_map(|e| self.courses.get(&e.course_id))
            .map(|course| self.with_instructor(course))
            .collect())
    }

    /// Embed the owning instructor, the derived display field course reads
    /// carry.
    fn with_instructor(&self, course: &Course) -> CourseWithInstructor {
        CourseWithInstructor {
            course: course.clone(),
            instructor: self.instructors.get(&course.instructor_id).cloned(),
        }
    }
}
