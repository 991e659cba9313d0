//! # ClassGate API
//!
//! HTTP surface of the education portal: one-step class admission, the
//! scheduler functions that an external cron (or the in-process ticker)
//! triggers, and schedule and recording administration.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into gate, scheduler and repository calls
//! - **Middleware**: Caller identity extraction and error mapping
//! - **Config**: Environment configuration

/// Configuration module for API settings
pub mod config;
pub mod handlers;
/// Caller identity and error mapping
pub mod middleware;
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{error_handling::HandleErrorLayer, http::StatusCode, BoxError, Router};
use classgate_core::repository::{RecordingRepository, ScheduleRepository};
use classgate_gate::AdmissionGate;
use classgate_scheduler::Scheduler;
use eyre::{Result, WrapErr};
use tokio::{net::TcpListener, time::MissedTickBehavior};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

/// Shared application state handed to every request handler.
pub struct ApiState {
    pub gate: Arc<AdmissionGate>,
    pub schedules: Arc<dyn ScheduleRepository>,
    pub recordings: Arc<dyn RecordingRepository>,
    /// `None` when mail credentials are missing; scheduler functions then
    /// answer with a configuration error.
    pub scheduler: Option<Arc<Scheduler>>,
}

/// All routes with the state attached, without transport layers.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::class_session::routes())
        .merge(routes::schedule::routes())
        .merge(routes::recording::routes())
        .merge(routes::functions::routes())
        .with_state(state)
}

/// Starts the API server: logging, routes, CORS, request timeout and the
/// optional scheduler ticker.
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let (Some(seconds), Some(scheduler)) = (config.scheduler_tick, state.scheduler.clone()) {
        info!("Running scheduler in-process every {}s", seconds);
        tokio::spawn(run_ticker(scheduler, Duration::from_secs(seconds)));
    }

    let app = router(state);

    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<axum::http::HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS entry")?;
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
                axum::http::HeaderName::from_static(middleware::auth::USER_ID_HEADER),
                axum::http::HeaderName::from_static(middleware::auth::USER_NAME_HEADER),
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|_: BoxError| async { StatusCode::REQUEST_TIMEOUT }))
            .timeout(Duration::from_secs(config.request_timeout))
            .into_inner(),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_ticker(scheduler: Arc<Scheduler>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match scheduler.run().await {
            Ok(response) => info!("Scheduler tick produced {} result(s)", response.results.len()),
            Err(e) => error!("Scheduler tick failed: {}", e),
        }
    }
}
