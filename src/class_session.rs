//! Runs the admission flow for one class link from the command line and
//! prints the room URL once admitted. Students wait here until their
//! teacher has joined; Ctrl-C abandons the wait.
//!
//! Usage: `class-session <link>` with `CLASS_SESSION_USER_ID` and
//! `CLASS_SESSION_DISPLAY_NAME` identifying the signed-in user.

use classgate_api::config::parse_log_level;
use classgate_core::{link::AdmissionLink, models::enrollment::Caller};
use classgate_db::{create_pool, PgStore};
use classgate_gate::{config::GateConfig, AdmissionGate, GateState};
use color_eyre::eyre::{eyre, Result, WrapErr};
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

fn caller_from_env() -> Result<Caller> {
    let user_id = std::env::var("CLASS_SESSION_USER_ID")
        .wrap_err("CLASS_SESSION_USER_ID environment variable must be set")?;
    let user_id = Uuid::parse_str(user_id.trim()).wrap_err("Invalid CLASS_SESSION_USER_ID value")?;
    let display_name = std::env::var("CLASS_SESSION_DISPLAY_NAME")
        .wrap_err("CLASS_SESSION_DISPLAY_NAME environment variable must be set")?;

    Ok(Caller {
        user_id,
        display_name,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let level = parse_log_level(&std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let raw_link = std::env::args()
        .nth(1)
        .ok_or_else(|| eyre!("Usage: class-session <link>"))?;
    let link = AdmissionLink::parse(&raw_link)?;
    let caller = caller_from_env()?;

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;
    let store = Arc::new(PgStore::new(create_pool(&database_url).await?));
    let gate = Arc::new(AdmissionGate::new(store, GateConfig::from_env()?));

    let session = gate.start(caller, link);
    let mut states = session.subscribe();

    let last = loop {
        let current = states.borrow_and_update().clone();
        match &current {
            GateState::Verifying => info!("Verifying access..."),
            GateState::WaitingForTeacher => info!("Waiting for the teacher to join..."),
            _ => {}
        }
        if current.is_terminal() {
            break current;
        }

        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break session.state();
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Leaving the waiting room");
                session.cancel();
                return Ok(());
            }
        }
    };

    match last {
        GateState::Redirecting { handoff } => {
            println!("{}", handoff.url);
            Ok(())
        }
        GateState::Error { reason } => Err(eyre!("Access denied: {}", reason)),
        other => Err(eyre!("Admission ended while {:?}", other)),
    }
}
