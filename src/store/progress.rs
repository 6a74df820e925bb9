//! Per-student progress and the derived progress reads.

use std::collections::BTreeSet;

use crate::core::Result;
use crate::model::{CourseProgress, Role, StudentProgress, TopicCompletion, UpcomingTopic};
use crate::store::LmsStore;

impl LmsStore {
    pub async fn get_student_progress(&mut self, student_id: &str) -> Result<StudentProgress> {
        self.ensure_loaded().await?;
        Ok(self
            .student_progress
            .get(student_id)
            .cloned()
            .unwrap_or_default())
    }

    /// Idempotent set-membership toggle. No existence validation against
    /// the course or sub-topic tables; toggling off an absent topic is a
    /// no-op. Returns the student's full progress map.
    pub async fn update_sub_topic_progress(
        &mut self,
        student_id: &str,
        course_id: &str,
        sub_topic_id: &str,
        completed: bool,
    ) -> Result<StudentProgress> {
        self.ensure_loaded().await?;
        let progress = self
            .student_progress
            .entry(student_id.to_string())
            .or_default();
        let topics = progress.entry(course_id.to_string()).or_default();
        if completed {
            topics.insert(sub_topic_id.to_string());
        } else {
            topics.remove(sub_topic_id);
        }
        let updated = progress.clone();
        self.persist().await?;
        Ok(updated)
    }

    /// For every sub-topic under every module of the course: how many of
    /// the currently enrolled students have completed it, out of how many.
    /// Recomputed fresh on every call; progress moves between calls.
    pub async fn get_course_progress(&mut self, course_id: &str) -> Result<CourseProgress> {
        self.ensure_loaded().await?;
        let enrolled: Vec<&str> = self
            .enrollments
            .values()
            .filter(|e| e.course_id == course_id)
            .map(|e| e.student_id.as_str())
            .collect();
        let total = enrolled.len();

        let mut course_progress = CourseProgress::new();
        for module in self.modules.values().filter(|m| m.course_id == course_id) {
            for sub_topic in self
                .sub_topics
                .values()
                .filter(|st| st.module_id == module.id)
            {
                let completed = enrolled
                    .iter()
                    .filter(|student_id| {
                        self.student_progress
                            .get(**student_id)
                            .and_then(|p| p.get(course_id))
                            .is_some_and(|topics| topics.contains(&sub_topic.id))
                    })
                    .count();
                course_progress.insert(sub_topic.id.clone(), TopicCompletion { completed, total });
            }
        }
        Ok(course_progress)
    }

    /// The next topic per enrolled course: scanning modules in stored
    /// order, the first incomplete sub-topic of the first module that has
    /// one wins, then the scan moves to the next course. Non-students get
    /// an empty list.
    pub async fn list_upcoming_topics(&mut self, user_id: &str) -> Result<Vec<UpcomingTopic>> {
        self.ensure_loaded().await?;
        let is_student = self
            .users
            .get(user_id)
            .is_some_and(|u| u.role == Role::Student);
        if !is_student {
            return Ok(Vec::new());
        }

        let empty_progress = StudentProgress::new();
        let no_topics = BTreeSet::new();
        let progress = self
            .student_progress
            .get(user_id)
            .unwrap_or(&empty_progress);
        let mut upcoming = Vec::new();

        for enrollment in self
            .enrollments
            .values()
            .filter(|e| e.student_id == user_id)
        {
            let Some(course) = self.courses.get(&enrollment.course_id) else {
                continue;
            };
            let completed = progress.get(&course.id).unwrap_or(&no_topics);
            'modules: for module in self.modules.values().filter(|m| m.course_id == course.id) {
                for sub_topic in self
                    .sub_topics
                    .values()
                    .filter(|st| st.module_id == module.id)
                {
                    if !completed.contains(&sub_topic.id) {
                        upcoming.push(UpcomingTopic {
                            course_id: course.id.clone(),
                            course_title: course.title.clone(),
                            module_id: module.id.clone(),
                            module_title: module.title.clone(),
                            topic_id: sub_topic.id.clone(),
                            topic_title: sub_topic.title.clone(),
                        });
                        break 'modules;
                    }
                }
            }
        }
        Ok(upcoming)
    }
}
