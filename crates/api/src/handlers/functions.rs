//! Scheduler entry points. Each call is one stateless scan; the caller is
//! normally a cron trigger.

use axum::{extract::State, Json};
use classgate_core::{errors::ClassError, models::scan::ScanResponse};
use classgate_scheduler::{ClassNotification, Scheduler};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

fn scheduler(state: &ApiState) -> Result<&Arc<Scheduler>, AppError> {
    state.scheduler.as_ref().ok_or_else(|| {
        AppError(ClassError::Configuration(
            "Mail delivery is not configured".to_string(),
        ))
    })
}

#[axum::debug_handler]
pub async fn send_class_reminders(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ScanResponse>, AppError> {
    let response = scheduler(&state)?.run_reminders_at(chrono::Utc::now()).await?;
    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn send_recording_emails(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ScanResponse>, AppError> {
    let response = scheduler(&state)?.run_recordings_at(chrono::Utc::now()).await?;
    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn send_notification_email(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ClassNotification>,
) -> Result<Json<ScanResponse>, AppError> {
    let response = scheduler(&state)?.notify_class(&payload).await?;
    Ok(Json(response))
}
