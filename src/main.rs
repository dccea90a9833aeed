use habit_tracker::{
    AppState, Config, FileStorage, HabitStore, SystemClock, WeekRefresher, router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let clock = Arc::new(SystemClock);
    let storage = Arc::new(FileStorage::new(&config.data_path));
    info!(path = %storage.path().display(), "using habit storage");
    let store = HabitStore::open(storage, clock.clone());

    let (_week_refresher, week) = WeekRefresher::spawn(clock, config.week_refresh);
    let app = router(AppState::new(store, week));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
