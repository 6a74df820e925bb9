//! End-to-end walkthrough: provision people and a course, enroll, record
//! progress, then reopen the snapshot as if the actor had restarted.
//!
//! Run with:
//!   cargo run --example persistence_demo

use acadiadb::{
    Gender, NewCourse, NewInstructor, NewModule, NewStudent, NewSubTopic, StoreHandle,
};
use anyhow::Result;
use chrono::Utc;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== AcadiaDB Persistence Demo ===\n");

    let suffix = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_millis() * 1_000_000);
    let snapshot_path = std::env::temp_dir().join(format!("acadiadb_demo_{suffix}.snapshot"));

    println!("1) Boot #1: provision and mutate");
    {
        let store = StoreHandle::open(&snapshot_path);

        let instructor = store
            .add_instructor(NewInstructor {
                name: "Ghaarib Khurshid".to_string(),
                email: "ghaarib.k@zavia.ai".to_string(),
                avatar_url: "https://i.pravatar.cc/150?u=instr-1".to_string(),
                gender: Gender::Male,
                phone: None,
                google_meet_id: None,
                profile_picture_url: None,
            })
            .await?;
        println!(
            "   instructor {} (one-time password: {})",
            instructor.record.id, instructor.initial_password
        );

        let student = store
            .add_student(NewStudent {
                name: "Charlie Brown".to_string(),
                email: "charlie.b@acadia.edu".to_string(),
                avatar_url: "https://i.pravatar.cc/150?u=a042581f4e29026701d".to_string(),
                gender: Gender::Male,
                join_date: Utc::now().to_rfc3339(),
                phone: None,
                google_meet_id: None,
                profile_picture_url: None,
            })
            .await?;

        let course = store
            .add_course(NewCourse {
                id: None,
                title: "Intro to AI".to_string(),
                instructor_id: instructor.record.id.clone(),
            })
            .await?;
        let module = store
            .add_module(
                &course.id,
                NewModule {
                    title: "Foundations".to_string(),
                    description: "Week one".to_string(),
                    content: String::new(),
                },
            )
            .await?;
        let topic = store
            .add_sub_topic(
                &module.id,
                NewSubTopic {
                    title: "History of AI".to_string(),
                    description: String::new(),
                },
            )
            .await?;

        store.enroll_student(&course.id, &student.record.id).await?;
        store
            .update_sub_topic_progress(&student.record.id, &course.id, &topic.id, true)
            .await?;
        println!("   course {} with one enrolled student", course.id);
    }

    println!("\n2) Boot #2: reopen the snapshot and inspect");
    let store = StoreHandle::open(&snapshot_path);
    let courses = store.list_courses().await?;
    for view in &courses {
        println!(
            "   {} '{}' enrolled={} instructor={}",
            view.course.id,
            view.course.title,
            view.course.enrolled,
            view.instructor
                .as_ref()
                .map(|i| i.name.as_str())
                .unwrap_or("<none>")
        );
        let progress = store.get_course_progress(&view.course.id).await?;
        println!(
            "   course progress: {}",
            serde_json::to_string_pretty(&progress)?
        );
    }

    let analytics = store.get_analytics().await?;
    println!("\n3) Analytics: {}", serde_json::to_string_pretty(&analytics)?);

    std::fs::remove_file(&snapshot_path).ok();
    Ok(())
}
