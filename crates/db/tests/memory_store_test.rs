use chrono::{NaiveDate, NaiveTime};
use classgate_core::{
    models::{
        attendance::{AttendanceQuery, NewAttendance, ParticipantRole},
        recording::CreateRecordingRequest,
        schedule::{CreateScheduleRequest, RescheduleRequest},
    },
    repository::{AttendanceRepository, RecordingRepository, ScheduleRepository},
};
use classgate_db::mock::InMemoryStore;
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
}

fn join(user_id: Uuid, role: ParticipantRole, schedule_id: Option<Uuid>) -> NewAttendance {
    NewAttendance {
        user_id,
        display_name: "Asha".to_string(),
        role,
        schedule_id,
        batch: "2025-A".to_string(),
        subject: "Physics".to_string(),
        class_date: today(),
    }
}

#[tokio::test]
async fn test_upsert_is_keyed_by_user_schedule_and_day() {
    let store = InMemoryStore::new();
    let user = Uuid::new_v4();
    let schedule = Some(Uuid::new_v4());

    let first = store.upsert_attendance(&join(user, ParticipantRole::Student, schedule)).await.unwrap();
    let second = store.upsert_attendance(&join(user, ParticipantRole::Student, schedule)).await.unwrap();
    store.upsert_attendance(&join(user, ParticipantRole::Student, None)).await.unwrap();
    store.upsert_attendance(&join(user, ParticipantRole::Student, None)).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(store.attendance().await.len(), 2);
    assert_eq!(store.attendance_writes().await, 4);
}

#[tokio::test]
async fn test_presence_query_narrows_by_schedule_only_when_given() {
    let store = InMemoryStore::new();
    let schedule = Uuid::new_v4();
    store
        .upsert_attendance(&join(Uuid::new_v4(), ParticipantRole::Teacher, Some(schedule)))
        .await
        .unwrap();

    let mut query = AttendanceQuery {
        batch: "2025-A".to_string(),
        subject: Some("Physics".to_string()),
        class_date: today(),
        role: ParticipantRole::Teacher,
        schedule_id: None,
    };
    assert_eq!(store.find_attendance(&query).await.unwrap().len(), 1);

    query.subject = Some("Chemistry".to_string());
    assert!(store.find_attendance(&query).await.unwrap().is_empty());

    query.subject = None;
    assert_eq!(store.find_attendance(&query).await.unwrap().len(), 1);

    query.schedule_id = Some(Uuid::new_v4());
    assert!(store.find_attendance(&query).await.unwrap().is_empty());

    query.schedule_id = Some(schedule);
    query.role = ParticipantRole::Student;
    assert!(store.find_attendance(&query).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reschedule_clears_reminder_marker() {
    let store = InMemoryStore::new();
    let schedule = store
        .create_schedule(&CreateScheduleRequest {
            batch: " 2025-A ".to_string(),
            subject: "Physics".to_string(),
            date: None,
            day_of_week: Some(2),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            reminder_time: NaiveTime::from_hms_opt(9, 45, 0),
            meeting_link: None,
        })
        .await
        .unwrap();
    assert_eq!(schedule.batch, "2025-A");

    store.mark_reminder_sent(schedule.id, today()).await.unwrap();
    assert_eq!(store.schedule(schedule.id).await.unwrap().reminder_sent_date, Some(today()));

    let moved = store
        .reschedule(
            schedule.id,
            &RescheduleRequest {
                date: NaiveDate::from_ymd_opt(2025, 6, 4),
                day_of_week: None,
                start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            },
        )
        .await
        .unwrap()
        .expect("schedule exists");
    assert_eq!(moved.reminder_sent_date, None);
    assert_eq!(moved.date, NaiveDate::from_ymd_opt(2025, 6, 4));

    assert!(store.reschedule(Uuid::new_v4(), &RescheduleRequest {
        date: None,
        day_of_week: Some(1),
        start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
    }).await.unwrap().is_none());
}

#[tokio::test]
async fn test_recording_flag_is_sticky() {
    let store = InMemoryStore::new();
    let recording = store
        .create_recording(&CreateRecordingRequest {
            batch: "2025-A".to_string(),
            subject: "Physics".to_string(),
            title: "Kinematics".to_string(),
            recording_date: today(),
            url: None,
        })
        .await
        .unwrap();

    assert_eq!(store.list_unannounced_recordings(today()).await.unwrap().len(), 1);
    store.mark_recording_email_sent(recording.id).await.unwrap();
    assert!(store.list_unannounced_recordings(today()).await.unwrap().is_empty());
    assert!(store.recording(recording.id).await.unwrap().email_sent);
}
