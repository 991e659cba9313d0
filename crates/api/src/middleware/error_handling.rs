//! # Error Handling Middleware
//!
//! Maps `ClassError` onto HTTP status codes and the `{ success: false, error }`
//! body every endpoint uses for failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use classgate_core::errors::ClassError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping.
///
/// ```
/// use axum::Json;
/// use classgate_api::middleware::error_handling::AppError;
/// use classgate_core::errors::ClassError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(ClassError::NotFound("Schedule not found".to_string())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ClassError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ClassError::NotFound(_) => StatusCode::NOT_FOUND,
            ClassError::Validation(_) => StatusCode::BAD_REQUEST,
            ClassError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ClassError::AccessDenied(_) => StatusCode::FORBIDDEN,
            ClassError::Provider(_) => StatusCode::BAD_GATEWAY,
            ClassError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            ClassError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ClassError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "success": false, "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<ClassError> for AppError {
    fn from(err: ClassError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ClassError::Database(err))
    }
}
