use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers::functions, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/functions/send-class-reminders",
            post(functions::send_class_reminders),
        )
        .route(
            "/functions/send-recording-emails",
            post(functions::send_recording_emails),
        )
        .route(
            "/functions/send-notification-email",
            post(functions::send_notification_email),
        )
}
