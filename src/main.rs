use calorie_counter::{load_store, router, AppState, CalorieTracker, Config};
use chrono::Local;
use std::net::SocketAddr;
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let store = load_store(&config.data_path).await;
    let today = Local::now().date_naive();
    let mut tracker = CalorieTracker::new(store, today);
    match tracker.open() {
        Ok(true) => info!(date = %today, "restored saved entries"),
        Ok(false) => info!(date = %today, "no saved entries for today"),
        Err(err) => warn!("{err}"),
    }

    let state = AppState::new(config.data_path, tracker);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
    }
    info!("shutting down");
}
