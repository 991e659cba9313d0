//! Narrow storage interfaces.
//!
//! Each trait exposes exactly the lookups the gate and the scheduler need,
//! so both can be exercised against an in-memory store.

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use uuid::Uuid;

use crate::models::{
    attendance::{Attendance, AttendanceQuery, NewAttendance},
    enrollment::Enrollment,
    recording::{CreateRecordingRequest, Recording},
    schedule::{CreateScheduleRequest, RescheduleRequest, Schedule},
    teacher::TeacherAssignment,
};

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn find_schedule_by_id(&self, id: Uuid) -> Result<Option<Schedule>>;

    async fn list_schedules_with_reminder(&self) -> Result<Vec<Schedule>>;

    async fn list_schedules_for_class(&self, batch: &str, subject: &str) -> Result<Vec<Schedule>>;

    async fn create_schedule(&self, request: &CreateScheduleRequest) -> Result<Schedule>;

    /// Rewrites the timing fields and clears the reminder marker.
    async fn reschedule(&self, id: Uuid, request: &RescheduleRequest) -> Result<Option<Schedule>>;

    async fn mark_reminder_sent(&self, id: Uuid, date: NaiveDate) -> Result<()>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn find_attendance(&self, query: &AttendanceQuery) -> Result<Vec<Attendance>>;

    /// Insert-or-update keyed by `(user_id, schedule_id, class_date)`.
    async fn upsert_attendance(&self, record: &NewAttendance) -> Result<Attendance>;
}

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn find_enrollment_by_id(&self, id: Uuid) -> Result<Option<Enrollment>>;
}

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn find_teacher_by_user_id(&self, user_id: Uuid) -> Result<Option<TeacherAssignment>>;

    async fn list_teachers(&self) -> Result<Vec<TeacherAssignment>>;
}

#[async_trait]
pub trait RecordingRepository: Send + Sync {
    async fn create_recording(&self, request: &CreateRecordingRequest) -> Result<Recording>;

    async fn list_unannounced_recordings(&self, date: NaiveDate) -> Result<Vec<Recording>>;

    async fn mark_recording_email_sent(&self, id: Uuid) -> Result<()>;
}

/// Everything the admission gate reads and writes.
pub trait AdmissionStore:
    ScheduleRepository + AttendanceRepository + EnrollmentRepository + TeacherRepository
{
}

impl<T> AdmissionStore for T where
    T: ScheduleRepository + AttendanceRepository + EnrollmentRepository + TeacherRepository
{
}

/// Everything the reminder scheduler reads and writes.
pub trait SchedulerStore: ScheduleRepository + TeacherRepository + RecordingRepository {}

impl<T> SchedulerStore for T where T: ScheduleRepository + TeacherRepository + RecordingRepository {}
