#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use classgate_core::{
    errors::{ClassError, ClassResult},
    models::{recording::Recording, schedule::Schedule, teacher::TeacherAssignment},
    notification::{GroupDirectory, Mailer, OutgoingEmail},
};
use classgate_db::mock::InMemoryStore;
use classgate_scheduler::{config::SchedulerConfig, Scheduler};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const BATCH: &str = "2025-A";
pub const SUBJECT: &str = "Physics";
pub const GROUP: &str = "2025-a-physics@lists.example.org";

/// Records every email and fails for the configured recipients.
#[derive(Default)]
pub struct Outbox {
    sent: Mutex<Vec<OutgoingEmail>>,
    failing: Mutex<Vec<String>>,
}

impl Outbox {
    pub fn fail_for(&self, address: &str) {
        self.failing.lock().unwrap().push(address.to_string());
    }

    pub fn recover(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn recipients(&self) -> Vec<String> {
        self.sent().into_iter().flat_map(|email| email.to).collect()
    }
}

#[async_trait]
impl Mailer for Outbox {
    async fn send(&self, email: &OutgoingEmail) -> ClassResult<()> {
        let failing = self.failing.lock().unwrap();
        if email.to.iter().any(|to| failing.contains(to)) {
            return Err(ClassError::Provider("mailbox unavailable".to_string()));
        }
        drop(failing);
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Fixed batch/subject → list mapping.
#[derive(Default)]
pub struct Lists {
    groups: HashMap<(String, String), String>,
}

impl Lists {
    pub fn with(batch: &str, subject: &str, address: &str) -> Self {
        let mut groups = HashMap::new();
        groups.insert((batch.to_string(), subject.to_string()), address.to_string());
        Self { groups }
    }
}

#[async_trait]
impl GroupDirectory for Lists {
    async fn find_group(&self, batch: &str, subject: &str) -> ClassResult<Option<String>> {
        Ok(self
            .groups
            .get(&(batch.to_string(), subject.to_string()))
            .cloned())
    }
}

/// 2025-06-03 is a Tuesday.
pub fn tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
}

/// The instant at which the clock in Kolkata reads `date h:m:s`.
pub fn ist(date: NaiveDate, h: u32, m: u32, s: u32) -> DateTime<Utc> {
    chrono_tz::Asia::Kolkata
        .from_local_datetime(&date.and_hms_opt(h, m, s).unwrap())
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

/// Weekly Tuesday Physics, 10:00 to 11:00, reminder at 09:45.
pub fn weekly_physics() -> Schedule {
    Schedule {
        id: Uuid::new_v4(),
        batch: BATCH.to_string(),
        subject: SUBJECT.to_string(),
        date: None,
        day_of_week: Some(2),
        start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        reminder_time: NaiveTime::from_hms_opt(9, 45, 0),
        meeting_link: Some("https://meet.example.org/classgate-2025-a-physics".to_string()),
        reminder_sent_date: None,
        created_at: Utc::now(),
    }
}

pub fn teacher(name: &str, email: &str, batches: &[&str], subjects: &[&str]) -> TeacherAssignment {
    TeacherAssignment {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        full_name: name.to_string(),
        email: email.to_string(),
        batches: batches.iter().map(|b| b.to_string()).collect(),
        subjects: subjects.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn recording(date: NaiveDate) -> Recording {
    Recording {
        id: Uuid::new_v4(),
        batch: BATCH.to_string(),
        subject: SUBJECT.to_string(),
        title: "Kinematics, part 2".to_string(),
        recording_date: date,
        url: Some("https://videos.example.org/kinematics-2".to_string()),
        email_sent: false,
        created_at: Utc::now(),
    }
}

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub outbox: Arc<Outbox>,
    pub scheduler: Scheduler,
}

pub fn harness(lists: Lists) -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let outbox = Arc::new(Outbox::default());
    let scheduler = Scheduler::new(
        store.clone(),
        outbox.clone(),
        Arc::new(lists),
        SchedulerConfig::default(),
    );
    Harness {
        store,
        outbox,
        scheduler,
    }
}

/// Weekly Physics with its list and one assigned teacher.
pub async fn physics_class() -> (Harness, Schedule) {
    let harness = harness(Lists::with(BATCH, SUBJECT, GROUP));
    let schedule = weekly_physics();
    harness.store.insert_schedule(schedule.clone()).await;
    harness
        .store
        .insert_teacher(teacher("Dr. Rao", "rao@example.org", &[BATCH], &[SUBJECT]))
        .await;
    (harness, schedule)
}
