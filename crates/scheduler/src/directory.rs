use async_trait::async_trait;
use classgate_core::{
    errors::{ClassError, ClassResult},
    notification::GroupDirectory,
    room::slug,
};
use eyre::{Result, WrapErr};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::DirectoryConfig;

/// Mailing list address for a class: `{batch}-{subject}@{domain}` with both
/// parts slugged. `None` when either part slugs to nothing.
pub fn group_address(batch: &str, subject: &str, domain: &str) -> Option<String> {
    let batch = slug(batch);
    let subject = slug(subject);
    if batch.is_empty() || subject.is_empty() {
        return None;
    }
    Some(format!("{}-{}@{}", batch, subject, domain.trim()))
}

#[derive(Deserialize)]
struct DirectoryGroup {
    email: String,
}

/// Looks class mailing lists up in the Google Workspace Admin Directory.
/// Without an access token the derived address is trusted as-is.
pub struct WorkspaceGroupDirectory {
    client: reqwest::Client,
    config: DirectoryConfig,
}

impl WorkspaceGroupDirectory {
    pub fn new(config: DirectoryConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .wrap_err("Failed to build directory HTTP client")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl GroupDirectory for WorkspaceGroupDirectory {
    async fn find_group(&self, batch: &str, subject: &str) -> ClassResult<Option<String>> {
        let Some(address) = group_address(batch, subject, &self.config.group_domain) else {
            return Ok(None);
        };

        let Some(token) = &self.config.access_token else {
            return Ok(Some(address));
        };

        let url = format!(
            "{}/admin/directory/v1/groups/{}",
            self.config.api_base.trim_end_matches('/'),
            urlencoding::encode(&address)
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ClassError::Provider(format!("directory request failed: {}", e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!("No mailing list {} for {} {}", address, batch, subject);
                Ok(None)
            }
            status if status.is_success() => {
                let group: DirectoryGroup = response
                    .json()
                    .await
                    .map_err(|e| ClassError::Provider(format!("invalid directory response: {}", e)))?;
                Ok(Some(group.email))
            }
            status => Err(ClassError::Provider(format!(
                "directory lookup for {} returned {}",
                address,
                status.as_u16()
            ))),
        }
    }
}
