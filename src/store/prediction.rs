//! Grade prediction and career-path suggestion.
//!
//! A stateless derived read: nothing here is persisted. The career ordering
//! is a deterministic function of the student id, so repeated calls for the
//! same student always suggest the same paths in the same order; only the
//! confidence figure is drawn fresh, inside its documented band.

use rand::Rng;

use crate::core::{Result, StoreError};
use crate::model::{AiPrediction, CareerPath, Student};
use crate::store::LmsStore;

const GRADE_BANDS: [&str; 8] = ["A+", "A", "A-", "B+", "B", "B-", "C+", "C"];

pub struct CareerSeed {
    pub title: &'static str,
    pub description: &'static str,
}

pub const CAREER_CATALOG: [CareerSeed; 5] = [
    CareerSeed {
        title: "AI/ML Engineer",
        description: "Designs and develops machine learning and deep learning systems.",
    },
    CareerSeed {
        title: "Data Scientist",
        description: "Analyzes and interprets complex data to help organizations make better decisions.",
    },
    CareerSeed {
        title: "Robotics Engineer",
        description: "Builds and tests robots, and develops applications for them.",
    },
    CareerSeed {
        title: "NLP Scientist",
        description: "Specializes in the interaction between computers and human language.",
    },
    CareerSeed {
        title: "Computer Vision Engineer",
        description: "Develops algorithms to help computers understand and interpret visual information.",
    },
];

/// Weighted score: progress carries 0.7, enrollment breadth (capped at five
/// courses) carries 0.3. The score picks a band from the top of the grade
/// scale down.
fn predicted_grade(student: &Student) -> &'static str {
    let progress_factor = student.overall_progress / 100.0;
    let courses_factor = (f64::from(student.courses_enrolled) / 5.0).min(1.0);
    let base_score = progress_factor * 0.7 + courses_factor * 0.3;
    let index = ((base_score * (GRADE_BANDS.len() - 1) as f64).floor() as usize)
        .min(GRADE_BANDS.len() - 1);
    GRADE_BANDS[GRADE_BANDS.len() - 1 - index]
}

/// Ordering key: the student id's character codes folded with the first
/// character of the path title, reduced mod 100. Stable sort keeps catalog
/// order on ties.
fn shuffle_key(student_id: &str, title: &str) -> u32 {
    let first = title.chars().next().map(|c| c as u32).unwrap_or(0);
    student_id.chars().map(|c| c as u32 + first).sum::<u32>() % 100
}

fn ranked_career_paths(student_id: &str) -> Vec<CareerPath> {
    let mut seeds: Vec<&CareerSeed> = CAREER_CATALOG.iter().collect();
    seeds.sort_by_key(|seed| shuffle_key(student_id, seed.title));
    seeds
        .into_iter()
        .take(3)
        .enumerate()
        .map(|(index, seed)| CareerPath {
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            relevance: 0.9 - index as f64 * 0.15,
        })
        .collect()
}

/// Pure prediction over a student record.
pub fn predict(student: &Student) -> AiPrediction {
    AiPrediction {
        student_id: student.id.clone(),
        predicted_grade: predicted_grade(student).to_string(),
        confidence: rand::thread_rng().gen_range(0.85..0.99),
        career_paths: ranked_career_paths(&student.id),
    }
}

impl LmsStore {
    pub async fn get_ai_prediction(&mut self, student_id: &str) -> Result<AiPrediction> {
        self.ensure_loaded().await?;
        let student = self
            .students
            .get(student_id)
            .ok_or_else(|| StoreError::NotFound("Student not found".to_string()))?;
        Ok(predict(student))
    }
}
