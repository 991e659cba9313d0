use axum::{
    extract::{Path, Query, State},
    Json,
};
use classgate_core::link::AdmissionLink;
use classgate_gate::GateState;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::{middleware::auth::AuthenticatedCaller, ApiState};

#[derive(Debug, Deserialize)]
pub struct AdmissionQuery {
    #[serde(rename = "scheduleId")]
    pub schedule_id: Option<String>,
}

/// One admission round for `/class-session/{link_id}`. The response is the
/// gate state; a student told to wait asks again after the poll interval.
#[axum::debug_handler]
pub async fn admission_step(
    State(state): State<Arc<ApiState>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path(link_id): Path<String>,
    Query(query): Query<AdmissionQuery>,
) -> Json<GateState> {
    let link = match AdmissionLink::from_parts(&link_id, query.schedule_id.as_deref()) {
        Ok(link) => link,
        Err(err) => return Json(GateState::from_error(&err)),
    };

    let next = state.gate.step(&caller, &link).await;
    debug!("Admission step for {} on {}: {:?}", caller.user_id, link.path(), next);
    Json(next)
}
