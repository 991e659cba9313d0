//! One scheduler invocation for an external cron: runs the reminder pass,
//! the recording pass, or both, and prints the JSON result envelope.
//!
//! Usage: `run-scheduler [reminders|recordings|all]`

use classgate_api::config::parse_log_level;
use classgate_db::{create_pool, PgStore};
use classgate_scheduler::{
    config::{DirectoryConfig, MailConfig, SchedulerConfig},
    directory::WorkspaceGroupDirectory,
    mailer::HttpMailer,
    Scheduler,
};
use color_eyre::eyre::{eyre, Result, WrapErr};
use dotenv::dotenv;
use std::sync::Arc;
use tracing_subscriber::FmtSubscriber;

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

    let pass = std::env::args().nth(1).unwrap_or_else(|| "all".to_string());

    // Missing mail credentials abort the whole invocation
    let mailer = HttpMailer::new(MailConfig::from_env()?)?;
    let groups = WorkspaceGroupDirectory::new(DirectoryConfig::from_env()?)?;

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;
    let store = Arc::new(PgStore::new(create_pool(&database_url).await?));

    let scheduler = Scheduler::new(
        store,
        Arc::new(mailer),
        Arc::new(groups),
        SchedulerConfig::from_env()?,
    );

    let now = chrono::Utc::now();
    let response = match pass.as_str() {
        "reminders" => scheduler.run_reminders_at(now).await?,
        "recordings" => scheduler.run_recordings_at(now).await?,
        "all" => scheduler.run_at(now).await?,
        other => return Err(eyre!("Unknown pass '{}', expected reminders, recordings or all", other)),
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
