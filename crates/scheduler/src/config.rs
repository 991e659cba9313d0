use chrono_tz::Tz;
use classgate_core::{
    subjects::SubjectNormalization,
    timing::{parse_timezone, DEFAULT_TIMEZONE},
};
use eyre::{eyre, Result, WrapErr};
use std::env;

/// Scan behaviour.
///
/// - `CLASS_TIMEZONE`: IANA zone for "today" and clock comparisons (default: "Asia/Kolkata")
/// - `REMINDER_TOLERANCE_MINUTES`: how far "now" may be from a reminder time (default: 1)
/// - `SUBJECT_NORMALIZATION`: how teacher subjects are matched (default: alphanumeric)
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub timezone: Tz,
    pub reminder_tolerance_minutes: i64,
    pub subject_normalization: SubjectNormalization,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            reminder_tolerance_minutes: 1,
            subject_normalization: SubjectNormalization::default(),
        }
    }
}

impl SchedulerConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let timezone = match env::var("CLASS_TIMEZONE") {
            Ok(raw) => parse_timezone(&raw).map_err(|e| eyre!("Invalid CLASS_TIMEZONE: {}", e))?,
            Err(_) => defaults.timezone,
        };

        let reminder_tolerance_minutes = match env::var("REMINDER_TOLERANCE_MINUTES") {
            Ok(raw) => raw
                .parse::<i64>()
                .wrap_err("Invalid REMINDER_TOLERANCE_MINUTES value")?
                .max(0),
            Err(_) => defaults.reminder_tolerance_minutes,
        };

        let subject_normalization = match env::var("SUBJECT_NORMALIZATION") {
            Ok(raw) => raw.parse().map_err(|e: String| eyre!(e))?,
            Err(_) => defaults.subject_normalization,
        };

        Ok(Self {
            timezone,
            reminder_tolerance_minutes,
            subject_normalization,
        })
    }
}

/// Transactional mail provider credentials.
///
/// - `MAIL_API_KEY`: bearer key for the provider (required)
/// - `MAIL_FROM`: sender address (required)
/// - `MAIL_API_URL`: send endpoint (default: "https://api.resend.com/emails")
/// - `MAIL_TIMEOUT_SECONDS`: per-request timeout (default: 15)
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from_address: String,
    pub timeout_seconds: u64,
}

impl MailConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("MAIL_API_KEY").wrap_err("MAIL_API_KEY environment variable must be set")?;
        let from_address = env::var("MAIL_FROM").wrap_err("MAIL_FROM environment variable must be set")?;
        let api_url = env::var("MAIL_API_URL").unwrap_or_else(|_| "https://api.resend.com/emails".to_string());
        let timeout_seconds = env::var("MAIL_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "15".to_string())
            .parse()
            .unwrap_or(15);

        Ok(Self {
            api_url,
            api_key,
            from_address,
            timeout_seconds,
        })
    }
}

/// Google Workspace group directory.
///
/// - `GROUP_DOMAIN`: domain of the class mailing lists (required)
/// - `GROUP_DIRECTORY_TOKEN`: OAuth access token for the Admin Directory API;
///   when unset, derived addresses are used without checking they exist
/// - `GROUP_DIRECTORY_URL`: API base (default: "https://admin.googleapis.com")
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub api_base: String,
    pub access_token: Option<String>,
    pub group_domain: String,
}

impl DirectoryConfig {
    pub fn from_env() -> Result<Self> {
        let group_domain = env::var("GROUP_DOMAIN").wrap_err("GROUP_DOMAIN environment variable must be set")?;
        let access_token = env::var("GROUP_DIRECTORY_TOKEN").ok().filter(|t| !t.is_empty());
        let api_base = env::var("GROUP_DIRECTORY_URL")
            .unwrap_or_else(|_| "https://admin.googleapis.com".to_string());

        Ok(Self {
            api_base,
            access_token,
            group_domain,
        })
    }
}
