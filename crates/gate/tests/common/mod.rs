#![allow(dead_code)]

use chrono::{NaiveTime, Utc};
use classgate_core::models::{
    enrollment::{Caller, Enrollment},
    schedule::Schedule,
    teacher::TeacherAssignment,
};
use classgate_db::mock::InMemoryStore;
use classgate_gate::{config::GateConfig, AdmissionGate};
use std::sync::Arc;
use uuid::Uuid;

pub const BATCH: &str = "2025-A";
pub const SUBJECT: &str = "Physics";

pub struct Classroom {
    pub store: Arc<InMemoryStore>,
    pub gate: Arc<AdmissionGate>,
    pub schedule: Schedule,
    pub teacher: Caller,
    pub student: Caller,
    pub enrollment: Enrollment,
}

pub fn caller(name: &str) -> Caller {
    Caller {
        user_id: Uuid::new_v4(),
        display_name: name.to_string(),
    }
}

pub fn schedule() -> Schedule {
    Schedule {
        id: Uuid::new_v4(),
        batch: BATCH.to_string(),
        subject: SUBJECT.to_string(),
        date: None,
        day_of_week: Some(2),
        start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        reminder_time: NaiveTime::from_hms_opt(9, 45, 0),
        meeting_link: None,
        reminder_sent_date: None,
        created_at: Utc::now(),
    }
}

pub fn assignment(user: &Caller, batches: &[&str], subjects: &[&str]) -> TeacherAssignment {
    TeacherAssignment {
        id: Uuid::new_v4(),
        user_id: user.user_id,
        full_name: user.display_name.clone(),
        email: "rao@example.org".to_string(),
        batches: batches.iter().map(|b| b.to_string()).collect(),
        subjects: subjects.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn gate_config() -> GateConfig {
    GateConfig {
        video_base_url: "https://meet.example.org".to_string(),
        ..GateConfig::default()
    }
}

/// A store holding one weekly Physics class, its teacher and one enrolled student.
pub async fn classroom() -> Classroom {
    let store = Arc::new(InMemoryStore::new());
    let schedule = schedule();
    let teacher = caller("Dr. Rao");
    let student = caller("Asha");
    let enrollment = Enrollment {
        id: Uuid::new_v4(),
        user_id: student.user_id,
        batch: BATCH.to_string(),
        subject: SUBJECT.to_string(),
    };

    store.insert_schedule(schedule.clone()).await;
    store.insert_teacher(assignment(&teacher, &[BATCH], &[SUBJECT])).await;
    store.insert_enrollment(enrollment.clone()).await;

    let gate = Arc::new(AdmissionGate::new(store.clone(), gate_config()));

    Classroom {
        store,
        gate,
        schedule,
        teacher,
        student,
        enrollment,
    }
}
