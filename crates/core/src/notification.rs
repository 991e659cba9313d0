//! Outbound notification emails and the providers that deliver them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ClassResult;
use crate::models::{recording::Recording, schedule::Schedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Announcement,
    Recording,
    Note,
    Dpp,
    Chat,
    Reminder,
}

impl NotificationKind {
    fn label(&self) -> &'static str {
        match self {
            NotificationKind::Announcement => "New Announcement",
            NotificationKind::Recording => "New Recording Available",
            NotificationKind::Note => "New Notes Uploaded",
            NotificationKind::Dpp => "New DPP (Daily Practice Problems)",
            NotificationKind::Chat => "New Message",
            NotificationKind::Reminder => "Class Reminder",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotificationKind::Announcement => "announcement",
            NotificationKind::Recording => "recording",
            NotificationKind::Note => "note",
            NotificationKind::Dpp => "dpp",
            NotificationKind::Chat => "chat",
            NotificationKind::Reminder => "reminder",
        };
        f.write_str(name)
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "announcement" => Ok(NotificationKind::Announcement),
            "recording" => Ok(NotificationKind::Recording),
            "note" => Ok(NotificationKind::Note),
            "dpp" => Ok(NotificationKind::Dpp),
            "chat" => Ok(NotificationKind::Chat),
            "reminder" => Ok(NotificationKind::Reminder),
            other => Err(format!("unknown notification kind: {other}")),
        }
    }
}

/// `[batch] Label: title`
pub fn subject_line(kind: NotificationKind, batch: &str, title: &str) -> String {
    format!("[{}] {}: {}", batch.trim(), kind.label(), title.trim())
}

/// Who a reminder body is written for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    Group,
    Teacher { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
}

impl OutgoingEmail {
    pub fn to_one(address: &str, subject: String, text: String) -> Self {
        Self {
            to: vec![address.to_string()],
            subject,
            text,
        }
    }
}

fn time_range(schedule: &Schedule) -> String {
    format!(
        "{} - {}",
        schedule.start_time.format("%H:%M"),
        schedule.end_time.format("%H:%M")
    )
}

pub fn reminder_email(address: &str, audience: &Audience, schedule: &Schedule) -> OutgoingEmail {
    let subject = subject_line(
        NotificationKind::Reminder,
        &schedule.batch,
        &format!("{} at {}", schedule.subject, schedule.start_time.format("%H:%M")),
    );
    let greeting = match audience {
        Audience::Group => "Hello students,".to_string(),
        Audience::Teacher { name } => format!("Hello {name},"),
    };
    let action = match audience {
        Audience::Group => "Please join on time from your dashboard.",
        Audience::Teacher { .. } => {
            "Please open the class from your teacher dashboard so students can be admitted."
        }
    };
    let mut text = format!(
        "{greeting}\n\nThis is a reminder for your upcoming class.\n\nSubject: {}\nBatch: {}\nTime: {}\n",
        schedule.subject,
        schedule.batch,
        time_range(schedule)
    );
    if let Some(link) = &schedule.meeting_link {
        text.push_str(&format!("Link: {link}\n"));
    }
    text.push_str(&format!("\n{action}\n"));
    OutgoingEmail::to_one(address, subject, text)
}

pub fn recording_email(address: &str, recording: &Recording, schedule: &Schedule) -> OutgoingEmail {
    let subject = subject_line(NotificationKind::Recording, &recording.batch, &recording.title);
    let mut text = format!(
        "Hello students,\n\nThe recording of today's class is now available.\n\nSubject: {}\nBatch: {}\nClass time: {}\nTitle: {}\n",
        recording.subject,
        recording.batch,
        time_range(schedule),
        recording.title
    );
    if let Some(url) = &recording.url {
        text.push_str(&format!("Watch: {url}\n"));
    }
    OutgoingEmail::to_one(address, subject, text)
}

pub fn class_notification_email(
    address: &str,
    kind: NotificationKind,
    batch: &str,
    subject: &str,
    title: &str,
    body: Option<&str>,
) -> OutgoingEmail {
    let mut text = format!("Hello students,\n\n{title}\n\nSubject: {subject}\nBatch: {batch}\n");
    if let Some(body) = body.filter(|b| !b.trim().is_empty()) {
        text.push_str(&format!("\n{}\n", body.trim()));
    }
    OutgoingEmail::to_one(address, subject_line(kind, batch, title), text)
}

/// Transactional mail delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> ClassResult<()>;
}

/// Resolves the mailing list for a class. `Ok(None)` means the class has no
/// list; errors are provider failures.
#[async_trait]
pub trait GroupDirectory: Send + Sync {
    async fn find_group(&self, batch: &str, subject: &str) -> ClassResult<Option<String>>;
}
