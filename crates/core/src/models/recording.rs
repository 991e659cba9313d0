use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    pub id: Uuid,
    pub batch: String,
    pub subject: String,
    pub title: String,
    pub recording_date: NaiveDate,
    pub url: Option<String>,
    pub email_sent: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordingRequest {
    pub batch: String,
    pub subject: String,
    pub title: String,
    pub recording_date: NaiveDate,
    pub url: Option<String>,
}
