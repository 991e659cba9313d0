mod common;

use classgate_core::{
    link::AdmissionLink,
    models::{
        attendance::{NewAttendance, ParticipantRole},
        enrollment::Enrollment,
    },
    repository::AttendanceRepository,
};
use classgate_db::mock::MockStore;
use classgate_gate::{AdmissionGate, GateState};
use common::{caller, classroom, gate_config, Classroom, BATCH, SUBJECT};
use pretty_assertions::assert_eq;
use std::{sync::Arc, time::Duration};
use uuid::Uuid;
use tokio::time::{sleep, Instant};

fn student_link(room: &Classroom) -> AdmissionLink {
    AdmissionLink::Student {
        enrollment_id: room.enrollment.id,
        schedule_id: None,
    }
}

async fn teacher_joins(room: &Classroom) {
    room.store
        .upsert_attendance(&NewAttendance {
            user_id: room.teacher.user_id,
            display_name: room.teacher.display_name.clone(),
            role: ParticipantRole::Teacher,
            schedule_id: Some(room.schedule.id),
            batch: BATCH.to_string(),
            subject: SUBJECT.to_string(),
            class_date: room.gate.today(),
        })
        .await
        .unwrap();
}

async fn student_records(room: &Classroom) -> usize {
    room.store
        .attendance()
        .await
        .iter()
        .filter(|a| a.role == ParticipantRole::Student)
        .count()
}

#[tokio::test(start_paused = true)]
async fn test_student_is_admitted_on_the_poll_after_teacher_arrives() {
    let room = classroom().await;
    let session = room.gate.start(room.student.clone(), student_link(&room));

    let mut states = session.subscribe();
    states
        .wait_for(|s| *s == GateState::WaitingForTeacher)
        .await
        .unwrap();
    let waiting_since = Instant::now();
    teacher_joins(&room).await;

    let state = session.wait().await;

    assert!(matches!(state, GateState::Redirecting { .. }), "{state:?}");
    assert_eq!(waiting_since.elapsed(), Duration::from_secs(5));
    assert_eq!(student_records(&room).await, 1);
    assert_eq!(room.store.attendance_writes().await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_present_teacher_admits_without_polling() {
    let room = classroom().await;
    teacher_joins(&room).await;
    let started = Instant::now();

    let session = room.gate.start(room.student.clone(), student_link(&room));
    let state = session.wait().await;

    let GateState::Redirecting { handoff } = state else {
        panic!("student should be redirected, got {state:?}");
    };
    assert_eq!(handoff.role, ParticipantRole::Student);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_student_keeps_waiting_without_a_teacher() {
    let room = classroom().await;
    let session = room.gate.start(room.student.clone(), student_link(&room));

    sleep(Duration::from_secs(60 * 60)).await;

    assert_eq!(session.state(), GateState::WaitingForTeacher);
    assert!(!session.is_finished());
    assert_eq!(student_records(&room).await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_the_poll() {
    let room = classroom().await;
    let session = room.gate.start(room.student.clone(), student_link(&room));
    session
        .subscribe()
        .wait_for(|s| *s == GateState::WaitingForTeacher)
        .await
        .unwrap();

    session.cancel();
    sleep(Duration::from_secs(1)).await;
    teacher_joins(&room).await;
    sleep(Duration::from_secs(30)).await;

    assert!(session.is_finished());
    assert_eq!(session.wait().await, GateState::WaitingForTeacher);
    assert_eq!(student_records(&room).await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_the_session_cancels_it() {
    let room = classroom().await;
    let session = room.gate.start(room.student.clone(), student_link(&room));
    let mut states = session.subscribe();
    states
        .wait_for(|s| *s == GateState::WaitingForTeacher)
        .await
        .unwrap();

    drop(session);
    teacher_joins(&room).await;

    // The flow ends without publishing anything further
    assert!(states.changed().await.is_err());
    assert_eq!(*states.borrow(), GateState::WaitingForTeacher);
    assert_eq!(student_records(&room).await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_denied_session_ends_in_error() {
    let room = classroom().await;
    let intruder = caller("Ravi");

    let session = room.gate.start(intruder, student_link(&room));
    let state = session.wait().await;

    assert_eq!(
        state,
        GateState::Error {
            reason: "This class link belongs to another student".to_string()
        }
    );
    sleep(Duration::from_secs(10)).await;
    assert!(session.is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_teacher_session_redirects_immediately() {
    let room = classroom().await;
    let link = AdmissionLink::Teacher {
        schedule_id: room.schedule.id,
    };

    let session = room.gate.start(room.teacher.clone(), link);
    let state = session.wait().await;

    assert!(matches!(state, GateState::Redirecting { .. }), "{state:?}");
    assert_eq!(room.store.attendance().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_presence_check_still_shows_waiting() {
    let student = caller("Asha");
    let enrollment = Enrollment {
        id: Uuid::new_v4(),
        user_id: student.user_id,
        batch: BATCH.to_string(),
        subject: SUBJECT.to_string(),
    };

    let mut store = MockStore::new();
    let found = enrollment.clone();
    store
        .expect_find_enrollment_by_id()
        .returning(move |_| Ok(Some(found.clone())));
    store
        .expect_find_attendance()
        .returning(|_| Err(eyre::eyre!("statement timeout")));
    store.expect_upsert_attendance().never();
    let gate = Arc::new(AdmissionGate::new(Arc::new(store), gate_config()));

    let session = gate.start(
        student,
        AdmissionLink::Student {
            enrollment_id: enrollment.id,
            schedule_id: None,
        },
    );
    session
        .subscribe()
        .wait_for(|s| *s == GateState::WaitingForTeacher)
        .await
        .unwrap();

    sleep(Duration::from_secs(30)).await;
    assert_eq!(session.state(), GateState::WaitingForTeacher);
    assert!(!session.is_finished());
}
