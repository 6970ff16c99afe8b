use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tracing::info;

mod app;
mod app_state;
mod config;
mod db;
mod email;
mod error;
mod middleware;
mod modules;
mod scheduling;
mod telemetry;

use email::{LoggingMailer, Notifier, SendGridMailer};
use scheduling::{PgStorage, SchedulingService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let env = config::init().context("Failed to load configuration")?.clone();

    let telemetry = telemetry::init_telemetry(None)
        .await
        .context("Failed to initialize telemetry")?;

    let pool = db::init_pool()
        .await
        .context("Failed to initialize database")?;

    let mailer: Arc<dyn Notifier> = match &env.email {
        Some(email) => Arc::new(SendGridMailer::new(
            email.api_key.clone(),
            email.from_address.clone(),
        )),
        None => Arc::new(LoggingMailer),
    };
    let storage = Arc::new(PgStorage::new(pool.clone()));
    let scheduling = Arc::new(SchedulingService::new(storage, mailer));

    let state = app_state::AppState::new(pool, env.clone(), scheduling);
    let app = app::create_router(state);

    let addr = env.server_addr();
    info!("{} listening on {}", env.app.name, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Failed to serve application")?;

    telemetry.shutdown().await?;

    Ok(())
}
