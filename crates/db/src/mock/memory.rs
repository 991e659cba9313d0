use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use classgate_core::{
    models::{
        attendance::{Attendance, AttendanceQuery, NewAttendance},
        enrollment::Enrollment,
        recording::{CreateRecordingRequest, Recording},
        schedule::{CreateScheduleRequest, RescheduleRequest, Schedule},
        teacher::TeacherAssignment,
    },
    repository::{
        AttendanceRepository, EnrollmentRepository, RecordingRepository, ScheduleRepository,
        TeacherRepository,
    },
};
use eyre::Result;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    schedules: Vec<Schedule>,
    enrollments: Vec<Enrollment>,
    teachers: Vec<TeacherAssignment>,
    attendance: Vec<Attendance>,
    recordings: Vec<Recording>,
    attendance_writes: usize,
}

/// Store kept entirely in memory, with the same upsert and idempotence
/// semantics as the PostgreSQL store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_schedule(&self, schedule: Schedule) {
        self.tables.write().await.schedules.push(schedule);
    }

    pub async fn insert_enrollment(&self, enrollment: Enrollment) {
        self.tables.write().await.enrollments.push(enrollment);
    }

    pub async fn insert_teacher(&self, teacher: TeacherAssignment) {
        self.tables.write().await.teachers.push(teacher);
    }

    pub async fn insert_recording(&self, recording: Recording) {
        self.tables.write().await.recordings.push(recording);
    }

    pub async fn schedule(&self, id: Uuid) -> Option<Schedule> {
        self.tables.read().await.schedules.iter().find(|s| s.id == id).cloned()
    }

    pub async fn recording(&self, id: Uuid) -> Option<Recording> {
        self.tables.read().await.recordings.iter().find(|r| r.id == id).cloned()
    }

    pub async fn attendance(&self) -> Vec<Attendance> {
        self.tables.read().await.attendance.clone()
    }

    /// Number of upsert calls, including ones that hit an existing row.
    pub async fn attendance_writes(&self) -> usize {
        self.tables.read().await.attendance_writes
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryStore {
    async fn find_schedule_by_id(&self, id: Uuid) -> Result<Option<Schedule>> {
        Ok(self.schedule(id).await)
    }

    async fn list_schedules_with_reminder(&self) -> Result<Vec<Schedule>> {
        let tables = self.tables.read().await;
        Ok(tables
            .schedules
            .iter()
            .filter(|s| s.reminder_time.is_some())
            .cloned()
            .collect())
    }

    async fn list_schedules_for_class(&self, batch: &str, subject: &str) -> Result<Vec<Schedule>> {
        let tables = self.tables.read().await;
        let mut schedules: Vec<Schedule> = tables
            .schedules
            .iter()
            .filter(|s| s.batch == batch && s.subject == subject)
            .cloned()
            .collect();
        schedules.sort_by_key(|s| s.end_time);
        Ok(schedules)
    }

    async fn create_schedule(&self, request: &CreateScheduleRequest) -> Result<Schedule> {
        let schedule = Schedule {
            id: Uuid::new_v4(),
            batch: request.batch.trim().to_string(),
            subject: request.subject.trim().to_string(),
            date: request.date,
            day_of_week: request.day_of_week,
            start_time: request.start_time,
            end_time: request.end_time,
            reminder_time: request.reminder_time,
            meeting_link: request.meeting_link.clone(),
            reminder_sent_date: None,
            created_at: Utc::now(),
        };
        self.tables.write().await.schedules.push(schedule.clone());
        Ok(schedule)
    }

    async fn reschedule(&self, id: Uuid, request: &RescheduleRequest) -> Result<Option<Schedule>> {
        let mut tables = self.tables.write().await;
        let Some(schedule) = tables.schedules.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        schedule.date = request.date;
        schedule.day_of_week = request.day_of_week;
        schedule.start_time = request.start_time;
        schedule.end_time = request.end_time;
        schedule.reminder_sent_date = None;
        Ok(Some(schedule.clone()))
    }

    async fn mark_reminder_sent(&self, id: Uuid, date: NaiveDate) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(schedule) = tables.schedules.iter_mut().find(|s| s.id == id) {
            schedule.reminder_sent_date = Some(date);
        }
        Ok(())
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryStore {
    async fn find_attendance(&self, query: &AttendanceQuery) -> Result<Vec<Attendance>> {
        let tables = self.tables.read().await;
        Ok(tables
            .attendance
            .iter()
            .filter(|record| query.matches(record))
            .cloned()
            .collect())
    }

    async fn upsert_attendance(&self, record: &NewAttendance) -> Result<Attendance> {
        let mut tables = self.tables.write().await;
        tables.attendance_writes += 1;

        let existing = tables.attendance.iter_mut().find(|a| {
            a.user_id == record.user_id
                && a.schedule_id == record.schedule_id
                && a.class_date == record.class_date
        });
        if let Some(existing) = existing {
            existing.display_name = record.display_name.clone();
            existing.joined_at = Utc::now();
            return Ok(existing.clone());
        }

        let attendance = Attendance {
            id: Uuid::new_v4(),
            user_id: record.user_id,
            display_name: record.display_name.clone(),
            role: record.role,
            schedule_id: record.schedule_id,
            batch: record.batch.clone(),
            subject: record.subject.clone(),
            class_date: record.class_date,
            joined_at: Utc::now(),
        };
        tables.attendance.push(attendance.clone());
        Ok(attendance)
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn find_enrollment_by_id(&self, id: Uuid) -> Result<Option<Enrollment>> {
        let tables = self.tables.read().await;
        Ok(tables.enrollments.iter().find(|e| e.id == id).cloned())
    }
}

#[async_trait]
impl TeacherRepository for InMemoryStore {
    async fn find_teacher_by_user_id(&self, user_id: Uuid) -> Result<Option<TeacherAssignment>> {
        let tables = self.tables.read().await;
        Ok(tables.teachers.iter().find(|t| t.user_id == user_id).cloned())
    }

    async fn list_teachers(&self) -> Result<Vec<TeacherAssignment>> {
        Ok(self.tables.read().await.teachers.clone())
    }
}

#[async_trait]
impl RecordingRepository for InMemoryStore {
    async fn create_recording(&self, request: &CreateRecordingRequest) -> Result<Recording> {
        let recording = Recording {
            id: Uuid::new_v4(),
            batch: request.batch.trim().to_string(),
            subject: request.subject.trim().to_string(),
            title: request.title.clone(),
            recording_date: request.recording_date,
            url: request.url.clone(),
            email_sent: false,
            created_at: Utc::now(),
        };
        self.tables.write().await.recordings.push(recording.clone());
        Ok(recording)
    }

    async fn list_unannounced_recordings(&self, date: NaiveDate) -> Result<Vec<Recording>> {
        let tables = self.tables.read().await;
        Ok(tables
            .recordings
            .iter()
            .filter(|r| r.recording_date == date && !r.email_sent)
            .cloned()
            .collect())
    }

    async fn mark_recording_email_sent(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(recording) = tables.recordings.iter_mut().find(|r| r.id == id) {
            recording.email_sent = true;
        }
        Ok(())
    }
}
