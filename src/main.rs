use classgate_api::{config::ApiConfig, ApiState};
use classgate_db::{create_pool, schema::initialize_database, PgStore};
use classgate_gate::{config::GateConfig, AdmissionGate};
use classgate_scheduler::{
    config::{DirectoryConfig, MailConfig, SchedulerConfig},
    directory::WorkspaceGroupDirectory,
    mailer::HttpMailer,
    Scheduler,
};
use color_eyre::eyre::Result;
use dotenv::dotenv;
use std::sync::Arc;

fn build_scheduler(store: Arc<PgStore>) -> Result<Scheduler> {
    let mailer = HttpMailer::new(MailConfig::from_env()?)?;
    let groups = WorkspaceGroupDirectory::new(DirectoryConfig::from_env()?)?;
    Ok(Scheduler::new(
        store,
        Arc::new(mailer),
        Arc::new(groups),
        SchedulerConfig::from_env()?,
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    let db_pool = create_pool(&config.database_url).await?;
    initialize_database(&db_pool).await?;
    let store = Arc::new(PgStore::new(db_pool));

    let gate = Arc::new(AdmissionGate::new(store.clone(), GateConfig::from_env()?));

    // The server still serves admission without mail credentials
    let scheduler = match build_scheduler(store.clone()) {
        Ok(scheduler) => Some(Arc::new(scheduler)),
        Err(e) => {
            eprintln!("Scheduler disabled: {:#}", e);
            None
        }
    };

    let state = Arc::new(ApiState {
        gate,
        schedules: store.clone(),
        recordings: store,
        scheduler,
    });

    classgate_api::start_server(config, state).await?;

    Ok(())
}
