use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use classgate_core::models::{
    attendance::{Attendance, ParticipantRole},
    enrollment::Enrollment,
    recording::Recording,
    schedule::Schedule,
    teacher::TeacherAssignment,
};
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: Uuid,
    pub batch: String,
    pub subject: String,
    pub date: Option<NaiveDate>,
    pub day_of_week: Option<i16>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reminder_time: Option<NaiveTime>,
    pub meeting_link: Option<String>,
    pub reminder_sent_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<DbSchedule> for Schedule {
    fn from(row: DbSchedule) -> Self {
        Schedule {
            id: row.id,
            batch: row.batch,
            subject: row.subject,
            date: row.date,
            day_of_week: row.day_of_week,
            start_time: row.start_time,
            end_time: row.end_time,
            reminder_time: row.reminder_time,
            meeting_link: row.meeting_link,
            reminder_sent_date: row.reminder_sent_date,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAttendance {
    pub id: Uuid,
    pub user_id: Uuid,
    pub display_name: String,
    pub role: String,
    pub schedule_id: Option<Uuid>,
    pub batch: String,
    pub subject: String,
    pub class_date: NaiveDate,
    pub joined_at: DateTime<Utc>,
}

impl TryFrom<DbAttendance> for Attendance {
    type Error = eyre::Report;

    fn try_from(row: DbAttendance) -> Result<Self> {
        let role = ParticipantRole::parse(&row.role)
            .ok_or_else(|| eyre!("Unknown attendance role {:?} on record {}", row.role, row.id))?;
        Ok(Attendance {
            id: row.id,
            user_id: row.user_id,
            display_name: row.display_name,
            role,
            schedule_id: row.schedule_id,
            batch: row.batch,
            subject: row.subject,
            class_date: row.class_date,
            joined_at: row.joined_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEnrollment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub batch: String,
    pub subject: String,
}

impl From<DbEnrollment> for Enrollment {
    fn from(row: DbEnrollment) -> Self {
        Enrollment {
            id: row.id,
            user_id: row.user_id,
            batch: row.batch,
            subject: row.subject,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTeacher {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub batches: Vec<String>,
    pub subjects: Vec<String>,
}

impl From<DbTeacher> for TeacherAssignment {
    fn from(row: DbTeacher) -> Self {
        TeacherAssignment {
            id: row.id,
            user_id: row.user_id,
            full_name: row.full_name,
            email: row.email,
            batches: row.batches,
            subjects: row.subjects,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRecording {
    pub id: Uuid,
    pub batch: String,
    pub subject: String,
    pub title: String,
    pub recording_date: NaiveDate,
    pub url: Option<String>,
    pub email_sent: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbRecording> for Recording {
    fn from(row: DbRecording) -> Self {
        Recording {
            id: row.id,
            batch: row.batch,
            subject: row.subject,
            title: row.title,
            recording_date: row.recording_date,
            url: row.url,
            email_sent: row.email_sent,
            created_at: row.created_at,
        }
    }
}
