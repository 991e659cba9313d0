//! Class-session links.
//!
//! `/class-session/{enrollmentId}` admits a student and
//! `/class-session/teacher-access?scheduleId={id}` admits a teacher. The ids
//! are plain record keys, not capabilities: the gate re-derives every
//! permission from the caller's identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ClassError, ClassResult};

/// Path segment that marks a teacher link in place of an enrollment id.
pub const TEACHER_ACCESS: &str = "teacher-access";

const PATH_PREFIX: &str = "/class-session/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdmissionLink {
    Student {
        enrollment_id: Uuid,
        schedule_id: Option<Uuid>,
    },
    Teacher {
        schedule_id: Uuid,
    },
}

impl AdmissionLink {
    /// Builds a link from its path segment and optional `scheduleId` query value.
    pub fn from_parts(link_id: &str, schedule_id: Option<&str>) -> ClassResult<Self> {
        let schedule_id = schedule_id
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_id(raw, "schedule"))
            .transpose()?;

        if link_id == TEACHER_ACCESS {
            let schedule_id = schedule_id.ok_or_else(|| {
                ClassError::AccessDenied("Teacher link is missing its schedule".to_string())
            })?;
            return Ok(AdmissionLink::Teacher { schedule_id });
        }

        Ok(AdmissionLink::Student {
            enrollment_id: parse_id(link_id, "enrollment")?,
            schedule_id,
        })
    }

    /// Parses a full or relative link, e.g.
    /// `https://portal.example/class-session/teacher-access?scheduleId=…`.
    pub fn parse(link: &str) -> ClassResult<Self> {
        let link = link.trim();
        let tail = match link.find(PATH_PREFIX) {
            Some(pos) => &link[pos + PATH_PREFIX.len()..],
            None => link,
        };
        let tail = tail.split('#').next().unwrap_or_default();
        let (path, query) = tail.split_once('?').unwrap_or((tail, ""));
        let schedule_id = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "scheduleId")
            .map(|(_, value)| value);

        Self::from_parts(path.trim_end_matches('/'), schedule_id)
    }

    pub fn schedule_id(&self) -> Option<Uuid> {
        match self {
            AdmissionLink::Student { schedule_id, .. } => *schedule_id,
            AdmissionLink::Teacher { schedule_id } => Some(*schedule_id),
        }
    }

    pub fn path(&self) -> String {
        match self {
            AdmissionLink::Student {
                enrollment_id,
                schedule_id: Some(schedule_id),
            } => format!("{PATH_PREFIX}{enrollment_id}?scheduleId={schedule_id}"),
            AdmissionLink::Student { enrollment_id, .. } => format!("{PATH_PREFIX}{enrollment_id}"),
            AdmissionLink::Teacher { schedule_id } => {
                format!("{PATH_PREFIX}{TEACHER_ACCESS}?scheduleId={schedule_id}")
            }
        }
    }
}

fn parse_id(raw: &str, what: &str) -> ClassResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ClassError::AccessDenied(format!("Invalid {what} link")))
}
