#![allow(dead_code)]

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use chrono::{NaiveTime, Utc};
use classgate_api::{
    middleware::auth::{USER_ID_HEADER, USER_NAME_HEADER},
    router, ApiState,
};
use classgate_core::{
    models::{
        enrollment::{Caller, Enrollment},
        schedule::Schedule,
        teacher::TeacherAssignment,
    },
    notification::{GroupDirectory, Mailer},
};
use classgate_db::mock::InMemoryStore;
use classgate_gate::{config::GateConfig, AdmissionGate};
use classgate_scheduler::{config::SchedulerConfig, Scheduler};
use std::sync::Arc;
use uuid::Uuid;

pub const BATCH: &str = "2025-A";
pub const SUBJECT: &str = "Physics";

pub struct TestContext {
    pub server: TestServer,
    pub store: Arc<InMemoryStore>,
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

fn build_state(
    store: Arc<InMemoryStore>,
    providers: Option<(Arc<dyn Mailer>, Arc<dyn GroupDirectory>)>,
) -> Arc<ApiState> {
    let gate = Arc::new(AdmissionGate::new(
        store.clone(),
        GateConfig {
            video_base_url: "https://meet.example.org".to_string(),
            ..GateConfig::default()
        },
    ));
    let scheduler = providers.map(|(mailer, groups)| {
        Arc::new(Scheduler::new(
            store.clone(),
            mailer,
            groups,
            SchedulerConfig::default(),
        ))
    });

    Arc::new(ApiState {
        gate,
        schedules: store.clone(),
        recordings: store,
        scheduler,
    })
}

/// One weekly Physics class with its teacher and an enrolled student.
/// `providers` wires up the scheduler; without them the scheduler
/// functions report missing configuration.
pub async fn context(providers: Option<(Arc<dyn Mailer>, Arc<dyn GroupDirectory>)>) -> TestContext {
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
    store
        .insert_teacher(TeacherAssignment {
            id: Uuid::new_v4(),
            user_id: teacher.user_id,
            full_name: teacher.display_name.clone(),
            email: "rao@example.org".to_string(),
            batches: vec![BATCH.to_string()],
            subjects: vec![SUBJECT.to_string()],
        })
        .await;
    store.insert_enrollment(enrollment.clone()).await;

    let server = TestServer::new(router(build_state(store.clone(), providers))).unwrap();

    TestContext {
        server,
        store,
        schedule,
        teacher,
        student,
        enrollment,
    }
}

/// Attaches the identity headers the auth proxy would set.
pub fn signed_in(request: TestRequest, caller: &Caller) -> TestRequest {
    request
        .add_header(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_str(&caller.user_id.to_string()).unwrap(),
        )
        .add_header(
            HeaderName::from_static(USER_NAME_HEADER),
            HeaderValue::from_str(&caller.display_name).unwrap(),
        )
}
