use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One class slot. A schedule with `date` set is a single occurrence; one
/// with only `day_of_week` set (0 = Sunday) recurs weekly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub batch: String,
    pub subject: String,
    pub date: Option<NaiveDate>,
    pub day_of_week: Option<i16>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reminder_time: Option<NaiveTime>,
    pub meeting_link: Option<String>,
}

/// An approved schedule-change request. Only the timing fields move; the
/// class identity (batch, subject) stays put.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleRequest {
    pub date: Option<NaiveDate>,
    pub day_of_week: Option<i16>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl CreateScheduleRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.batch.trim().is_empty() || self.subject.trim().is_empty() {
            return Err("batch and subject are required".to_string());
        }
        validate_timing(self.date, self.day_of_week, self.start_time, self.end_time)
    }
}

impl RescheduleRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_timing(self.date, self.day_of_week, self.start_time, self.end_time)
    }
}

fn validate_timing(
    date: Option<NaiveDate>,
    day_of_week: Option<i16>,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<(), String> {
    if date.is_none() && day_of_week.is_none() {
        return Err("either date or day_of_week must be set".to_string());
    }
    if let Some(day) = day_of_week {
        if !(0..=6).contains(&day) {
            return Err(format!("day_of_week must be between 0 and 6, got {day}"));
        }
    }
    if end_time <= start_time {
        return Err("end_time must be after start_time".to_string());
    }
    Ok(())
}
