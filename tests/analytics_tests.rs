//! Analytics aggregation and the grade/career prediction.
//!
//! Run with: cargo test --test analytics_tests

use acadiadb::{
    CoursePatch, Gender, NewCourse, NewStudent, StoreError, StoreHandle, StudentPatch,
};

async fn seed_course(store: &StoreHandle, title: &str, progress: f64) -> String {
    let course = store
        .add_course(NewCourse {
            id: None,
            title: title.to_string(),
            instructor_id: "instr-1".to_string(),
        })
        .await
        .unwrap();
    store
        .update_course(
            &course.id,
            CoursePatch {
                progress: Some(progress),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    course.id
}

async fn seed_student(store: &StoreHandle, name: &str, overall_progress: f64) -> String {
    let student = store
        .add_student(NewStudent {
            name: name.to_string(),
            email: format!("{}@acadia.edu", name.to_lowercase().replace(' ', ".")),
            avatar_url: "https://i.pravatar.cc/150?u=x".to_string(),
            gender: Gender::Female,
            join_date: "2024-01-01T00:00:00+00:00".to_string(),
            phone: None,
            google_meet_id: None,
            profile_picture_url: None,
        })
        .await
        .unwrap()
        .record;
    store
        .update_student(
            &student.id,
            StudentPatch {
                overall_progress: Some(overall_progress),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    student.id
}

#[tokio::test]
async fn test_analytics_on_an_empty_store() {
    let store = StoreHandle::in_memory();
    let analytics = store.get_analytics().await.unwrap();
    assert_eq!(analytics.total_students, 0);
    assert_eq!(analytics.active_courses, 0);
    assert_eq!(analytics.completion_rate, 0.0);
    assert!(analytics.course_popularity.is_empty());
    assert!(analytics.student_engagement.is_empty());
}

#[tokio::test]
async fn test_completion_rate_is_the_mean_course_progress_to_one_decimal() {
    let store = StoreHandle::in_memory();
    seed_course(&store, "AI", 10.0).await;
    seed_course(&store, "Robotics", 20.0).await;
    seed_course(&store, "Vision", 25.0).await;

    let analytics = store.get_analytics().await.unwrap();
    assert_eq!(analytics.active_courses, 3);
    // (10 + 20 + 25) / 3 = 18.333… rounds to 18.3.
    assert_eq!(analytics.completion_rate, 18.3);
    assert_eq!(analytics.average_engagement, 7.2);
}

#[tokio::test]
async fn test_top_five_lists_are_ranked_and_capped() {
    let store = StoreHandle::in_memory();
    for (i, title) in ["A", "B", "C", "D", "E", "F"].iter().enumerate() {
        seed_course(&store, title, 0.0).await;
        seed_student(&store, &format!("Student {title}"), i as f64 * 10.0).await;
    }

    // Course k gets k + 1 students, so "F" ends up the most enrolled.
    let courses = store.list_courses().await.unwrap();
    let students = store.list_students().await.unwrap();
    for (k, course) in courses.iter().enumerate() {
        for student in students.iter().take(k + 1) {
            store
                .enroll_student(&course.course.id, &student.id)
                .await
                .unwrap();
        }
    }

    let analytics = store.get_analytics().await.unwrap();
    assert_eq!(analytics.course_popularity.len(), 5);
    assert_eq!(analytics.course_popularity[0].name, "F");
    assert_eq!(analytics.course_popularity[0].value, 6.0);
    assert_eq!(analytics.course_popularity[4].name, "B");

    assert_eq!(analytics.student_engagement.len(), 5);
    assert_eq!(analytics.student_engagement[0].name, "Student F");
    assert_eq!(analytics.student_engagement[0].value, 50.0);
}

#[tokio::test]
async fn test_prediction_career_order_is_stable_and_confidence_bounded() {
    let store = StoreHandle::in_memory();
    let student = seed_student(&store, "Charlie Brown", 80.0).await;

    let first = store.get_ai_prediction(&student).await.unwrap();
    let second = store.get_ai_prediction(&student).await.unwrap();

    let titles = |p: &acadiadb::AiPrediction| {
        p.career_paths
            .iter()
            .map(|c| c.title.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(titles(&first), titles(&second));
    assert_eq!(first.predicted_grade, second.predicted_grade);
    for prediction in [&first, &second] {
        assert!(prediction.confidence >= 0.85);
        assert!(prediction.confidence < 0.99);
        assert_eq!(prediction.career_paths.len(), 3);
    }
}

#[tokio::test]
async fn test_prediction_for_missing_student_is_not_found() {
    let store = StoreHandle::in_memory();
    let err = store.get_ai_prediction("S404").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}
