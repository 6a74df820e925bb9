//! Dashboard aggregation, computed fresh from the current tables on every
//! call.

use std::cmp::Ordering;

use crate::core::Result;
use crate::model::{AnalyticsData, NamedValue};
use crate::store::LmsStore;

/// Engagement has no backing signal yet; the dashboard shows a fixed
/// figure.
const AVERAGE_ENGAGEMENT: f64 = 7.2;

impl LmsStore {
    pub async fn get_analytics(&mut self) -> Result<AnalyticsData> {
        self.ensure_loaded().await?;
        let total_students = self.students.len();
        let active_courses = self.courses.len();

        let completion_rate = if self.courses.is_empty() {
            0.0
        } else {
            let sum: f64 = self.courses.values().map(|c| c.progress).sum();
            (sum / self.courses.len() as f64 * 10.0).round() / 10.0
        };

        let mut by_enrollment: Vec<_> = self.courses.values().collect();
        by_enrollment.sort_by(|a, b| b.enrolled.cmp(&a.enrolled));
        let course_popularity = by_enrollment
            .iter()
            .take(5)
            .map(|c| NamedValue {
                name: c.title.clone(),
                value: f64::from(c.enrolled),
            })
            .collect();

        let mut by_progress: Vec<_> = self.students.values().collect();
        by_progress.sort_by(|a, b| {
            b.overall_progress
                .partial_cmp(&a.overall_progress)
                .unwrap_or(Ordering::Equal)
        });
        let student_engagement = by_progress
            .iter()
            .take(5)
            .map(|s| NamedValue {
                name: s.name.clone(),
                value: s.overall_progress,
            })
            .collect();

        Ok(AnalyticsData {
            total_students,
            active_courses,
            completion_rate,
            average_engagement: AVERAGE_ENGAGEMENT,
            student_engagement,
            course_popularity,
        })
    }
}
