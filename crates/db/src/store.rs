//! PostgreSQL-backed implementation of the repository traits.

use async_trait::async_trait;
use chrono::NaiveDate;
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
use uuid::Uuid;

use crate::{repositories, DbPool};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ScheduleRepository for PgStore {
    async fn find_schedule_by_id(&self, id: Uuid) -> Result<Option<Schedule>> {
        let row = repositories::schedule::get_schedule_by_id(&self.pool, id).await?;
        Ok(row.map(Schedule::from))
    }

    async fn list_schedules_with_reminder(&self) -> Result<Vec<Schedule>> {
        let rows = repositories::schedule::get_schedules_with_reminder(&self.pool).await?;
        Ok(rows.into_iter().map(Schedule::from).collect())
    }

    async fn list_schedules_for_class(&self, batch: &str, subject: &str) -> Result<Vec<Schedule>> {
        let rows = repositories::schedule::get_schedules_for_class(&self.pool, batch, subject).await?;
        Ok(rows.into_iter().map(Schedule::from).collect())
    }

    async fn create_schedule(&self, request: &CreateScheduleRequest) -> Result<Schedule> {
        let row = repositories::schedule::create_schedule(&self.pool, request).await?;
        Ok(row.into())
    }

    async fn reschedule(&self, id: Uuid, request: &RescheduleRequest) -> Result<Option<Schedule>> {
        let row = repositories::schedule::reschedule(&self.pool, id, request).await?;
        Ok(row.map(Schedule::from))
    }

    async fn mark_reminder_sent(&self, id: Uuid, date: NaiveDate) -> Result<()> {
        repositories::schedule::mark_reminder_sent(&self.pool, id, date).await
    }
}

#[async_trait]
impl AttendanceRepository for PgStore {
    async fn find_attendance(&self, query: &AttendanceQuery) -> Result<Vec<Attendance>> {
        repositories::attendance::find_attendance(&self.pool, query)
            .await?
            .into_iter()
            .map(Attendance::try_from)
            .collect()
    }

    async fn upsert_attendance(&self, record: &NewAttendance) -> Result<Attendance> {
        let row = repositories::attendance::upsert_attendance(&self.pool, record).await?;
        Attendance::try_from(row)
    }
}

#[async_trait]
impl EnrollmentRepository for PgStore {
    async fn find_enrollment_by_id(&self, id: Uuid) -> Result<Option<Enrollment>> {
        let row = repositories::enrollment::get_enrollment_by_id(&self.pool, id).await?;
        Ok(row.map(Enrollment::from))
    }
}

#[async_trait]
impl TeacherRepository for PgStore {
    async fn find_teacher_by_user_id(&self, user_id: Uuid) -> Result<Option<TeacherAssignment>> {
        let row = repositories::teacher::get_teacher_by_user_id(&self.pool, user_id).await?;
        Ok(row.map(TeacherAssignment::from))
    }

    async fn list_teachers(&self) -> Result<Vec<TeacherAssignment>> {
        let rows = repositories::teacher::get_teachers(&self.pool).await?;
        Ok(rows.into_iter().map(TeacherAssignment::from).collect())
    }
}

#[async_trait]
impl RecordingRepository for PgStore {
    async fn create_recording(&self, request: &CreateRecordingRequest) -> Result<Recording> {
        let row = repositories::recording::create_recording(&self.pool, request).await?;
        Ok(row.into())
    }

    async fn list_unannounced_recordings(&self, date: NaiveDate) -> Result<Vec<Recording>> {
        let rows = repositories::recording::get_unannounced_recordings(&self.pool, date).await?;
        Ok(rows.into_iter().map(Recording::from).collect())
    }

    async fn mark_recording_email_sent(&self, id: Uuid) -> Result<()> {
        repositories::recording::mark_email_sent(&self.pool, id).await
    }
}
