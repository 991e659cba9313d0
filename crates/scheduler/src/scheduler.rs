use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use classgate_core::{
    errors::{ClassError, ClassResult},
    models::{
        recording::Recording,
        scan::{DeliveryStatus, ScanResponse, ScanResult},
        schedule::Schedule,
        teacher::TeacherAssignment,
    },
    notification::{
        class_notification_email, recording_email, reminder_email, Audience, GroupDirectory,
        Mailer, NotificationKind,
    },
    repository::SchedulerStore,
    subjects::SubjectMatcher,
    timing::{applies_on, civil_now, has_ended, within_tolerance},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::SchedulerConfig;

/// A one-off notification to a class mailing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassNotification {
    pub kind: NotificationKind,
    pub batch: String,
    pub subject: String,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl ClassNotification {
    pub fn validate(&self) -> Result<(), String> {
        if self.batch.trim().is_empty() {
            return Err("batch is required".to_string());
        }
        if self.subject.trim().is_empty() {
            return Err("subject is required".to_string());
        }
        if self.title.trim().is_empty() {
            return Err("title is required".to_string());
        }
        Ok(())
    }
}

pub struct Scheduler {
    store: Arc<dyn SchedulerStore>,
    mailer: Arc<dyn Mailer>,
    groups: Arc<dyn GroupDirectory>,
    config: SchedulerConfig,
    matcher: SubjectMatcher,
}

impl Scheduler {
    pub fn new(
        store: Arc<dyn SchedulerStore>,
        mailer: Arc<dyn Mailer>,
        groups: Arc<dyn GroupDirectory>,
        config: SchedulerConfig,
    ) -> Self {
        let matcher = SubjectMatcher::new(config.subject_normalization);
        Self {
            store,
            mailer,
            groups,
            config,
            matcher,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Both passes against the wall clock.
    pub async fn run(&self) -> ClassResult<ScanResponse> {
        self.run_at(Utc::now()).await
    }

    /// Both passes in one invocation. A pass that cannot load its work is
    /// reported as an `error:` result and does not stop the other one.
    pub async fn run_at(&self, instant: DateTime<Utc>) -> ClassResult<ScanResponse> {
        let mut results = Vec::new();
        for (pass, outcome) in [
            ("reminder", self.run_reminders_at(instant).await),
            ("recording", self.run_recordings_at(instant).await),
        ] {
            match outcome {
                Ok(response) => results.extend(response.results),
                Err(e) => {
                    error!("The {} pass failed: {:?}", pass, e);
                    results.push(ScanResult::new(
                        "",
                        "",
                        DeliveryStatus::Error(format!("{} pass failed: {}", pass, e.reason())),
                    ));
                }
            }
        }
        Ok(ScanResponse::new(results))
    }

    /// Reminder pass. Only a failure to load schedules or teachers fails the
    /// whole pass; everything per schedule ends up in the results.
    pub async fn run_reminders_at(&self, instant: DateTime<Utc>) -> ClassResult<ScanResponse> {
        let now = civil_now(self.config.timezone, instant);
        let today = now.date_naive();
        let clock = now.time();

        let schedules = self.store.list_schedules_with_reminder().await?;
        let due: Vec<Schedule> = schedules
            .into_iter()
            .filter(|schedule| self.reminder_due(schedule, today, clock))
            .collect();

        if due.is_empty() {
            debug!("No reminders due at {}", now.format("%Y-%m-%d %H:%M:%S"));
            return Ok(ScanResponse::new(Vec::new()));
        }

        let teachers = self.store.list_teachers().await?;
        let mut results = Vec::new();

        for schedule in &due {
            info!(
                "Sending reminder for {} {} ({})",
                schedule.batch, schedule.subject, schedule.id
            );
            results.extend(self.send_reminder(schedule, &teachers).await);

            // Stamped whatever the outcome, so a failing send is not retried
            // by the next invocation within the tolerance window.
            if let Err(e) = self.store.mark_reminder_sent(schedule.id, today).await {
                error!("Failed to stamp reminder for schedule {}: {:?}", schedule.id, e);
                results.push(ScanResult::new(
                    &schedule.batch,
                    &schedule.subject,
                    DeliveryStatus::Error(format!("failed to record reminder: {}", e)),
                ));
            }
        }

        Ok(ScanResponse::new(results))
    }

    fn reminder_due(&self, schedule: &Schedule, today: NaiveDate, clock: NaiveTime) -> bool {
        let Some(reminder_time) = schedule.reminder_time else {
            return false;
        };
        if !applies_on(schedule, today) {
            return false;
        }
        if schedule.reminder_sent_date == Some(today) {
            debug!("Reminder for {} already sent today", schedule.id);
            return false;
        }
        within_tolerance(reminder_time, clock, self.config.reminder_tolerance_minutes)
    }

    async fn send_reminder(
        &self,
        schedule: &Schedule,
        teachers: &[TeacherAssignment],
    ) -> Vec<ScanResult> {
        let mut results = Vec::new();
        let record = |status| ScanResult::new(&schedule.batch, &schedule.subject, status);

        let group_status = match self.groups.find_group(&schedule.batch, &schedule.subject).await {
            Ok(Some(address)) => {
                let email = reminder_email(&address, &Audience::Group, schedule);
                match self.mailer.send(&email).await {
                    Ok(()) => DeliveryStatus::SentToGroup,
                    Err(e) => {
                        warn!("Reminder to {} failed: {}", address, e);
                        DeliveryStatus::GroupError(e.reason())
                    }
                }
            }
            Ok(None) => {
                warn!("No mailing list for {} {}", schedule.batch, schedule.subject);
                DeliveryStatus::NoGroupFound
            }
            Err(e) => {
                warn!("Group lookup for {} {} failed: {}", schedule.batch, schedule.subject, e);
                DeliveryStatus::GroupError(e.reason())
            }
        };
        results.push(record(group_status));

        let assigned = teachers.iter().filter(|teacher| {
            teacher.teaches_batch(&schedule.batch)
                && self.matcher.covers(&teacher.subjects, &schedule.subject)
        });
        for teacher in assigned {
            let audience = Audience::Teacher {
                name: teacher.full_name.clone(),
            };
            let email = reminder_email(&teacher.email, &audience, schedule);
            let status = match self.mailer.send(&email).await {
                Ok(()) => DeliveryStatus::SentToTeacher(teacher.email.clone()),
                Err(e) => {
                    warn!("Reminder to teacher {} failed: {}", teacher.email, e);
                    DeliveryStatus::Error(format!("{}: {}", teacher.email, e.reason()))
                }
            };
            results.push(record(status));
        }

        results
    }

    /// Recording-ready pass: announces today's recordings once their class
    /// has ended. The sent flag is only set after a successful send.
    pub async fn run_recordings_at(&self, instant: DateTime<Utc>) -> ClassResult<ScanResponse> {
        let now = civil_now(self.config.timezone, instant);
        let today = now.date_naive();
        let clock = now.time();

        let recordings = self.store.list_unannounced_recordings(today).await?;
        let mut results = Vec::with_capacity(recordings.len());

        for recording in &recordings {
            let status = self.announce_recording(recording, today, clock).await;
            results.push(ScanResult::new(&recording.batch, &recording.subject, status));
        }

        Ok(ScanResponse::new(results))
    }

    async fn announce_recording(
        &self,
        recording: &Recording,
        today: NaiveDate,
        clock: NaiveTime,
    ) -> DeliveryStatus {
        let schedules = match self
            .store
            .list_schedules_for_class(&recording.batch, &recording.subject)
            .await
        {
            Ok(schedules) => schedules,
            Err(e) => {
                error!("Failed to load schedules for recording {}: {:?}", recording.id, e);
                return DeliveryStatus::Error(e.to_string());
            }
        };

        let Some(schedule) = schedules
            .iter()
            .find(|schedule| applies_on(schedule, today) && has_ended(schedule, clock))
        else {
            debug!("Class for recording {} has not ended yet", recording.id);
            return DeliveryStatus::ClassNotEndedYet;
        };

        let address = match self.groups.find_group(&recording.batch, &recording.subject).await {
            Ok(Some(address)) => address,
            Ok(None) => return DeliveryStatus::NoGroupFound,
            Err(e) => return DeliveryStatus::GroupError(e.reason()),
        };

        let email = recording_email(&address, recording, schedule);
        if let Err(e) = self.mailer.send(&email).await {
            warn!("Recording email for {} failed: {}", recording.id, e);
            return DeliveryStatus::Error(e.reason());
        }

        match self.store.mark_recording_email_sent(recording.id).await {
            Ok(()) => {
                info!("Announced recording {} to {}", recording.id, address);
                DeliveryStatus::Sent
            }
            Err(e) => {
                error!("Failed to flag recording {} as sent: {:?}", recording.id, e);
                DeliveryStatus::Error(format!("failed to record delivery: {}", e))
            }
        }
    }

    /// Sends a templated notification to the class mailing list.
    pub async fn notify_class(&self, notification: &ClassNotification) -> ClassResult<ScanResponse> {
        notification.validate().map_err(ClassError::Validation)?;

        let batch = notification.batch.trim();
        let subject = notification.subject.trim();
        let status = match self.groups.find_group(batch, subject).await {
            Ok(Some(address)) => {
                let email = class_notification_email(
                    &address,
                    notification.kind,
                    batch,
                    subject,
                    &notification.title,
                    notification.body.as_deref(),
                );
                match self.mailer.send(&email).await {
                    Ok(()) => DeliveryStatus::Sent,
                    Err(e) => DeliveryStatus::Error(e.reason()),
                }
            }
            Ok(None) => DeliveryStatus::NoGroupFound,
            Err(e) => DeliveryStatus::GroupError(e.reason()),
        };

        info!("{} notification for {} {}: {}", notification.kind, batch, subject, status);
        Ok(ScanResponse::new(vec![ScanResult::new(batch, subject, status)]))
    }
}
