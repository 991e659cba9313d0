use async_trait::async_trait;
use classgate_core::{
    errors::{ClassError, ClassResult},
    notification::{Mailer, OutgoingEmail},
};
use eyre::{Result, WrapErr};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::MailConfig;

#[derive(Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
}

/// Sends plain-text mail through a transactional mail API (Resend-style
/// JSON POST with a bearer key).
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .wrap_err("Failed to build mail HTTP client")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &OutgoingEmail) -> ClassResult<()> {
        let body = SendEmailBody {
            from: &self.config.from_address,
            to: &email.to,
            subject: &email.subject,
            text: &email.text,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClassError::Provider(format!("mail request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!("Mail API rejected '{}' with {}: {}", email.subject, status, detail);
            return Err(ClassError::Provider(format!(
                "mail API returned {}: {}",
                status.as_u16(),
                detail.trim()
            )));
        }

        debug!("Sent '{}' to {:?}", email.subject, email.to);
        Ok(())
    }
}
