use axum::{extract::State, Json};
use classgate_core::{
    errors::ClassError,
    models::recording::{CreateRecordingRequest, Recording},
};
use std::sync::Arc;
use tracing::info;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_recording(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateRecordingRequest>,
) -> Result<Json<Recording>, AppError> {
    if payload.batch.trim().is_empty() || payload.subject.trim().is_empty() {
        return Err(AppError(ClassError::Validation(
            "batch and subject are required".to_string(),
        )));
    }
    if payload.title.trim().is_empty() {
        return Err(AppError(ClassError::Validation("title is required".to_string())));
    }

    let recording = state.recordings.create_recording(&payload).await?;
    info!(
        "Registered recording {} for {} {} on {}",
        recording.id, recording.batch, recording.subject, recording.recording_date
    );

    Ok(Json(recording))
}
