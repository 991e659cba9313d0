use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Teacher,
    Student,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Teacher => "teacher",
            ParticipantRole::Student => "student",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "teacher" => Some(ParticipantRole::Teacher),
            "student" => Some(ParticipantRole::Student),
            _ => None,
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One participant's join event for one class occurrence. Unique per
/// `(user_id, schedule_id, class_date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: Uuid,
    pub user_id: Uuid,
    pub display_name: String,
    pub role: ParticipantRole,
    pub schedule_id: Option<Uuid>,
    pub batch: String,
    pub subject: String,
    pub class_date: NaiveDate,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub user_id: Uuid,
    pub display_name: String,
    pub role: ParticipantRole,
    pub schedule_id: Option<Uuid>,
    pub batch: String,
    pub subject: String,
    pub class_date: NaiveDate,
}

/// Presence filter. `subject` and `schedule_id` narrow the match only when
/// set; callers that match subjects loosely leave `subject` empty and filter
/// the records themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceQuery {
    pub batch: String,
    pub subject: Option<String>,
    pub class_date: NaiveDate,
    pub role: ParticipantRole,
    pub schedule_id: Option<Uuid>,
}

impl AttendanceQuery {
    pub fn matches(&self, record: &Attendance) -> bool {
        record.batch == self.batch
            && self
                .subject
                .as_ref()
                .is_none_or(|subject| record.subject == *subject)
            && record.class_date == self.class_date
            && record.role == self.role
            && self
                .schedule_id
                .is_none_or(|id| record.schedule_id == Some(id))
    }
}
