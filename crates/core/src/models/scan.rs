use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Outcome of one delivery attempt inside a scheduler scan. Serialized as
/// the flat status strings the scheduler functions have always returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    SentToGroup,
    SentToTeacher(String),
    GroupError(String),
    ClassNotEndedYet,
    NoGroupFound,
    Sent,
    Error(String),
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryStatus::SentToGroup => f.write_str("sent_to_group"),
            DeliveryStatus::SentToTeacher(email) => write!(f, "sent_to_teacher:{email}"),
            DeliveryStatus::GroupError(msg) => write!(f, "group_error:{msg}"),
            DeliveryStatus::ClassNotEndedYet => f.write_str("class_not_ended_yet"),
            DeliveryStatus::NoGroupFound => f.write_str("no_group_found"),
            DeliveryStatus::Sent => f.write_str("sent"),
            DeliveryStatus::Error(msg) => write!(f, "error:{msg}"),
        }
    }
}

impl DeliveryStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sent_to_group" => return Some(DeliveryStatus::SentToGroup),
            "class_not_ended_yet" => return Some(DeliveryStatus::ClassNotEndedYet),
            "no_group_found" => return Some(DeliveryStatus::NoGroupFound),
            "sent" => return Some(DeliveryStatus::Sent),
            _ => {}
        }
        let (tag, rest) = value.split_once(':')?;
        match tag {
            "sent_to_teacher" => Some(DeliveryStatus::SentToTeacher(rest.to_string())),
            "group_error" => Some(DeliveryStatus::GroupError(rest.to_string())),
            "error" => Some(DeliveryStatus::Error(rest.to_string())),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, DeliveryStatus::GroupError(_) | DeliveryStatus::Error(_))
    }
}

impl Serialize for DeliveryStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DeliveryStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DeliveryStatus::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown delivery status: {raw}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub batch: String,
    pub subject: String,
    pub status: DeliveryStatus,
}

impl ScanResult {
    pub fn new(batch: &str, subject: &str, status: DeliveryStatus) -> Self {
        Self {
            batch: batch.to_string(),
            subject: subject.to_string(),
            status,
        }
    }
}

/// Envelope returned by every scheduler invocation. `success` stays true
/// when individual items fail; their failures live in `results`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub success: bool,
    pub results: Vec<ScanResult>,
}

impl ScanResponse {
    pub fn new(results: Vec<ScanResult>) -> Self {
        Self {
            success: true,
            results,
        }
    }
}
