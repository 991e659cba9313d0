use axum::{
    extract::{Path, State},
    Json,
};
use classgate_core::{
    errors::ClassError,
    models::schedule::{CreateScheduleRequest, RescheduleRequest, Schedule},
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateScheduleRequest>,
) -> Result<Json<Schedule>, AppError> {
    payload.validate().map_err(ClassError::Validation)?;

    let schedule = state.schedules.create_schedule(&payload).await?;
    info!(
        "Created schedule {} for {} {}",
        schedule.id, schedule.batch, schedule.subject
    );

    Ok(Json(schedule))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Schedule>, AppError> {
    let schedule = state
        .schedules
        .find_schedule_by_id(id)
        .await?
        .ok_or_else(|| ClassError::NotFound(format!("Schedule with ID {} not found", id)))?;

    Ok(Json(schedule))
}

/// Applies an approved schedule change. The reminder marker is cleared so
/// the moved class gets its own reminder.
#[axum::debug_handler]
pub async fn reschedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RescheduleRequest>,
) -> Result<Json<Schedule>, AppError> {
    payload.validate().map_err(ClassError::Validation)?;

    let schedule = state
        .schedules
        .reschedule(id, &payload)
        .await?
        .ok_or_else(|| ClassError::NotFound(format!("Schedule with ID {} not found", id)))?;
    info!("Rescheduled {} {} ({})", schedule.batch, schedule.subject, schedule.id);

    Ok(Json(schedule))
}
