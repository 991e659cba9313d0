use chrono::{NaiveDate, Utc};
use classgate_core::{
    errors::{ClassError, ClassResult},
    link::AdmissionLink,
    models::{
        attendance::{AttendanceQuery, NewAttendance, ParticipantRole},
        enrollment::Caller,
    },
    repository::AdmissionStore,
    room::RoomHandoff,
    subjects::SubjectMatcher,
    timing::civil_now,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{config::GateConfig, session::AdmissionSession};

/// Where a participant currently stands. `Redirecting` and `Error` are
/// terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GateState {
    Verifying,
    WaitingForTeacher,
    Redirecting { handoff: RoomHandoff },
    Error { reason: String },
}

impl GateState {
    pub fn from_error(err: &ClassError) -> Self {
        GateState::Error {
            reason: err.reason(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GateState::Redirecting { .. } | GateState::Error { .. })
    }
}

/// A verified admission: who is joining which class, in what role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub role: ParticipantRole,
    pub batch: String,
    pub subject: String,
    pub schedule_id: Option<Uuid>,
}

pub struct AdmissionGate {
    store: Arc<dyn AdmissionStore>,
    config: GateConfig,
    matcher: SubjectMatcher,
}

impl AdmissionGate {
    pub fn new(store: Arc<dyn AdmissionStore>, config: GateConfig) -> Self {
        let matcher = SubjectMatcher::new(config.subject_normalization);
        Self {
            store,
            config,
            matcher,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Today's date in the configured civil timezone.
    pub fn today(&self) -> NaiveDate {
        civil_now(self.config.timezone, Utc::now()).date_naive()
    }

    /// Checks the link against the caller's identity. Every failure,
    /// including a failed lookup, comes back as `AccessDenied`.
    pub async fn verify(&self, caller: &Caller, link: &AdmissionLink) -> ClassResult<Ticket> {
        let result = match link {
            AdmissionLink::Teacher { schedule_id } => self.verify_teacher(caller, *schedule_id).await,
            AdmissionLink::Student {
                enrollment_id,
                schedule_id,
            } => self.verify_student(caller, *enrollment_id, *schedule_id).await,
        };

        result.map_err(|err| match err {
            ClassError::AccessDenied(_) => err,
            other => {
                error!("Admission lookup failed for user {}: {}", caller.user_id, other);
                ClassError::AccessDenied("Unable to verify access to this class".to_string())
            }
        })
    }

    async fn verify_teacher(&self, caller: &Caller, schedule_id: Uuid) -> ClassResult<Ticket> {
        let schedule = self
            .store
            .find_schedule_by_id(schedule_id)
            .await?
            .ok_or_else(|| ClassError::AccessDenied("Class schedule not found".to_string()))?;

        let teacher = self
            .store
            .find_teacher_by_user_id(caller.user_id)
            .await?
            .ok_or_else(|| {
                ClassError::AccessDenied("You are not registered as a teacher".to_string())
            })?;

        if !teacher.teaches_batch(&schedule.batch) {
            return Err(ClassError::AccessDenied(format!(
                "You are not assigned to batch {}",
                schedule.batch
            )));
        }
        if !self.matcher.covers(&teacher.subjects, &schedule.subject) {
            return Err(ClassError::AccessDenied(format!(
                "You are not assigned to teach {}",
                schedule.subject
            )));
        }

        Ok(Ticket {
            role: ParticipantRole::Teacher,
            batch: schedule.batch.trim().to_string(),
            subject: schedule.subject,
            schedule_id: Some(schedule.id),
        })
    }

    async fn verify_student(
        &self,
        caller: &Caller,
        enrollment_id: Uuid,
        schedule_id: Option<Uuid>,
    ) -> ClassResult<Ticket> {
        let enrollment = self
            .store
            .find_enrollment_by_id(enrollment_id)
            .await?
            .ok_or_else(|| ClassError::AccessDenied("Enrollment not found".to_string()))?;

        if enrollment.user_id != caller.user_id {
            warn!(
                "User {} tried to use enrollment {} owned by {}",
                caller.user_id, enrollment.id, enrollment.user_id
            );
            return Err(ClassError::AccessDenied(
                "This class link belongs to another student".to_string(),
            ));
        }

        Ok(Ticket {
            role: ParticipantRole::Student,
            batch: enrollment.batch.trim().to_string(),
            subject: enrollment.subject,
            schedule_id,
        })
    }

    /// Whether a teacher has joined this class today. Subjects are compared
    /// with the same matcher that admits teachers, so an enrollment spelled
    /// differently from the schedule still finds its teacher.
    pub async fn teacher_present(&self, ticket: &Ticket, today: NaiveDate) -> ClassResult<bool> {
        let query = AttendanceQuery {
            batch: ticket.batch.clone(),
            subject: None,
            class_date: today,
            role: ParticipantRole::Teacher,
            schedule_id: ticket.schedule_id,
        };
        let present = self
            .store
            .find_attendance(&query)
            .await?
            .iter()
            .filter(|record| self.matcher.subjects_match(&record.subject, &ticket.subject))
            .count();
        debug!(
            "Presence check for {}/{} on {}: {} teacher record(s)",
            ticket.batch, ticket.subject, today, present
        );
        Ok(present > 0)
    }

    /// Records the caller's attendance and builds the room handoff.
    pub async fn admit(
        &self,
        caller: &Caller,
        ticket: &Ticket,
        today: NaiveDate,
    ) -> ClassResult<RoomHandoff> {
        self.store
            .upsert_attendance(&NewAttendance {
                user_id: caller.user_id,
                display_name: caller.display_name.clone(),
                role: ticket.role,
                schedule_id: ticket.schedule_id,
                batch: ticket.batch.clone(),
                subject: ticket.subject.clone(),
                class_date: today,
            })
            .await?;

        info!(
            "Admitted {} {} to {}/{}",
            ticket.role, caller.user_id, ticket.batch, ticket.subject
        );

        Ok(RoomHandoff::new(
            &self.config.video_base_url,
            &ticket.batch,
            &ticket.subject,
            ticket.role,
            &caller.display_name,
        ))
    }

    /// One verify-and-check round with no waiting. A student whose teacher
    /// is absent gets `WaitingForTeacher` and is expected to ask again.
    pub async fn step(&self, caller: &Caller, link: &AdmissionLink) -> GateState {
        let ticket = match self.verify(caller, link).await {
            Ok(ticket) => ticket,
            Err(err) => return GateState::from_error(&err),
        };
        let today = self.today();

        if ticket.role == ParticipantRole::Student {
            match self.teacher_present(&ticket, today).await {
                Ok(true) => {}
                Ok(false) => return GateState::WaitingForTeacher,
                Err(err) => {
                    warn!("Presence check failed: {}", err);
                    return GateState::WaitingForTeacher;
                }
            }
        }

        match self.admit(caller, &ticket, today).await {
            Ok(handoff) => GateState::Redirecting { handoff },
            Err(err) => GateState::from_error(&err),
        }
    }

    /// Runs the full admission flow in the background, polling for the
    /// teacher until admitted, denied, or cancelled.
    pub fn start(self: &Arc<Self>, caller: Caller, link: AdmissionLink) -> AdmissionSession {
        AdmissionSession::spawn(Arc::clone(self), caller, link)
    }
}
