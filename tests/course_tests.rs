//! Course CRUD, identifier discipline, and the deletion cascade.
//!
//! Run with: cargo test --test course_tests

use acadiadb::{
    ContentKind, CoursePatch, CourseStatus, Gender, NewContent, NewCourse, NewInstructor,
    NewModule, NewStudent, NewSubTopic, StoreError, StoreHandle,
};

async fn seed_instructor(store: &StoreHandle) -> String {
    store
        .add_instructor(NewInstructor {
            name: "Ghaarib Khurshid".to_string(),
            email: "ghaarib.k@zavia.ai".to_string(),
            avatar_url: "https://i.pravatar.cc/150?u=instr-1".to_string(),
            gender: Gender::Male,
            phone: None,
            google_meet_id: None,
            profile_picture_url: None,
        })
        .await
        .unwrap()
        .record
        .id
}

#[tokio::test]
async fn test_generated_course_ids_are_sequential() {
    let store = StoreHandle::in_memory();
    let instructor = seed_instructor(&store).await;

    for expected in ["ZAI-001", "ZAI-002", "ZAI-003"] {
        let course = store
            .add_course(NewCourse {
                id: None,
                title: "Intro to AI".to_string(),
                instructor_id: instructor.clone(),
            })
            .await
            .unwrap();
        assert_eq!(course.id, expected);
    }
}

#[tokio::test]
async fn test_new_course_gets_documented_defaults() {
    let store = StoreHandle::in_memory();
    let instructor = seed_instructor(&store).await;
    let course = store
        .add_course(NewCourse {
            id: None,
            title: "Intro to AI".to_string(),
            instructor_id: instructor,
        })
        .await
        .unwrap();
    assert_eq!(course.enrolled, 0);
    assert_eq!(course.progress, 0.0);
    assert_eq!(course.status, CourseStatus::OnTrack);
    assert_eq!(course.next_class, "Not scheduled");
    assert!(course.description.is_none());
}

#[tokio::test]
async fn test_duplicate_course_id_is_rejected_without_mutation() {
    let store = StoreHandle::in_memory();
    let instructor = seed_instructor(&store).await;
    let original = store
        .add_course(NewCourse {
            id: Some("ZAI-001".to_string()),
            title: "Intro to AI".to_string(),
            instructor_id: instructor.clone(),
        })
        .await
        .unwrap();

    let err = store
        .add_course(NewCourse {
            id: Some("ZAI-001".to_string()),
            title: "Impostor".to_string(),
            instructor_id: instructor,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    let courses = store.list_courses().await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].course.title, original.title);
}

#[tokio::test]
async fn test_update_merges_only_supplied_fields() {
    let store = StoreHandle::in_memory();
    let instructor = seed_instructor(&store).await;
    let course = store
        .add_course(NewCourse {
            id: None,
            title: "Intro to AI".to_string(),
            instructor_id: instructor,
        })
        .await
        .unwrap();

    store
        .update_course(
            &course.id,
            CoursePatch {
                description: Some("Foundations of modern AI".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // A later title-only patch must leave the description untouched; an
    // explicit empty string must overwrite.
    let updated = store
        .update_course(
            &course.id,
            CoursePatch {
                title: Some("AI Foundations".to_string()),
                next_class: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "AI Foundations");
    assert_eq!(updated.description.as_deref(), Some("Foundations of modern AI"));
    assert_eq!(updated.next_class, "");
}

#[tokio::test]
async fn test_update_missing_course_is_not_found() {
    let store = StoreHandle::in_memory();
    let err = store
        .update_course("ZAI-404", CoursePatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn test_course_reads_embed_the_owning_instructor() {
    let store = StoreHandle::in_memory();
    let instructor = seed_instructor(&store).await;
    let course = store
        .add_course(NewCourse {
            id: None,
            title: "Intro to AI".to_string(),
            instructor_id: instructor.clone(),
        })
        .await
        .unwrap();

    let fetched = store.get_course(&course.id).await.unwrap().unwrap();
    assert_eq!(fetched.instructor.as_ref().unwrap().id, instructor);
    assert_eq!(fetched.instructor.as_ref().unwrap().name, "Ghaarib Khurshid");

    let listed = store.list_courses_for_instructor(&instructor).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].instructor.is_some());
}

/// Deleting a course removes the course, its modules, and its enrollments
/// (repairing student counters) — but leaves sub-topics and contents of the
/// removed modules orphaned. The orphans are documented current behavior,
/// asserted here on purpose rather than "fixed".
#[tokio::test]
async fn test_delete_cascade_and_its_documented_orphans() {
    let store = StoreHandle::in_memory();
    let instructor = seed_instructor(&store).await;
    let course = store
        .add_course(NewCourse {
            id: Some("ZAI-001".to_string()),
            title: "Intro to AI".to_string(),
            instructor_id: instructor,
        })
        .await
        .unwrap();
    let module = store
        .add_module(
            &course.id,
            NewModule {
                title: "Foundations".to_string(),
                description: "Week one".to_string(),
                content: String::new(),
            },
        )
        .await
        .unwrap();
    store
        .add_sub_topic(
            &module.id,
            NewSubTopic {
                title: "History of AI".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();
    store
        .add_course_content(
            &course.id,
            NewContent {
                title: "Syllabus".to_string(),
                content_type: ContentKind::Text,
                content: "Welcome".to_string(),
            },
        )
        .await
        .unwrap();
    let student = store
        .add_student(NewStudent {
            name: "Charlie Brown".to_string(),
            email: "charlie.b@acadia.edu".to_string(),
            avatar_url: "https://i.pravatar.cc/150?u=a042581f4e29026701d".to_string(),
            gender: Gender::Male,
            join_date: "2024-01-01T00:00:00+00:00".to_string(),
            phone: None,
            google_meet_id: None,
            profile_picture_url: None,
        })
        .await
        .unwrap()
        .record;
    store.enroll_student(&course.id, &student.id).await.unwrap();

    store.delete_course(&course.id).await.unwrap();

    assert!(store.get_course(&course.id).await.unwrap().is_none());
    assert!(
        store
            .list_modules_for_course(&course.id)
            .await
            .unwrap()
            .is_empty()
    );
    let student_after = store.get_student(&student.id).await.unwrap().unwrap();
    assert_eq!(student_after.courses_enrolled, 0);
    assert!(
        store
            .list_courses_for_student(&student.id)
            .await
            .unwrap()
            .is_empty()
    );

    // Known inconsistency: sub-topics and contents survive their course.
    let orphaned_topics = store.list_sub_topics_for_module(&module.id).await.unwrap();
    assert_eq!(orphaned_topics.len(), 1);
    let orphaned_contents = store.list_course_content(&course.id).await.unwrap();
    assert_eq!(orphaned_contents.len(), 1);
}

#[tokio::test]
async fn test_delete_missing_course_is_not_found() {
    let store = StoreHandle::in_memory();
    let err = store.delete_course("ZAI-404").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}
