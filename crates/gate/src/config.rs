use chrono_tz::Tz;
use classgate_core::{
    subjects::SubjectNormalization,
    timing::{parse_timezone, DEFAULT_TIMEZONE},
};
use eyre::{eyre, Result, WrapErr};
use std::{env, time::Duration};

/// Configuration for the admission gate.
///
/// Environment variables:
///
/// - `VIDEO_BASE_URL`: video service the room handoff points at (default: "https://meet.jit.si")
/// - `PRESENCE_POLL_SECONDS`: delay between teacher presence checks (default: 5)
/// - `CLASS_TIMEZONE`: IANA zone that defines "today" (default: "Asia/Kolkata")
/// - `SUBJECT_NORMALIZATION`: `exact`, `case_insensitive` or `alphanumeric` (default)
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub video_base_url: String,
    pub poll_interval: Duration,
    pub timezone: Tz,
    pub subject_normalization: SubjectNormalization,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            video_base_url: "https://meet.jit.si".to_string(),
            poll_interval: Duration::from_secs(5),
            timezone: DEFAULT_TIMEZONE,
            subject_normalization: SubjectNormalization::default(),
        }
    }
}

impl GateConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let video_base_url = env::var("VIDEO_BASE_URL").unwrap_or(defaults.video_base_url);

        let poll_interval = match env::var("PRESENCE_POLL_SECONDS") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .wrap_err("Invalid PRESENCE_POLL_SECONDS value")?,
            ),
            Err(_) => defaults.poll_interval,
        };
        if poll_interval.is_zero() {
            return Err(eyre!("PRESENCE_POLL_SECONDS must be greater than zero"));
        }

        let timezone = match env::var("CLASS_TIMEZONE") {
            Ok(raw) => parse_timezone(&raw).map_err(|e| eyre!("Invalid CLASS_TIMEZONE: {}", e))?,
            Err(_) => defaults.timezone,
        };

        let subject_normalization = match env::var("SUBJECT_NORMALIZATION") {
            Ok(raw) => raw.parse().map_err(|e: String| eyre!(e))?,
            Err(_) => defaults.subject_normalization,
        };

        Ok(Self {
            video_base_url,
            poll_interval,
            timezone,
            subject_normalization,
        })
    }
}
