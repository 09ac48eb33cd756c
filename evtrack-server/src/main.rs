mod routes;
mod singleton;
mod state;

use anyhow::Result;
use evtrack_core::config::TrackerConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("evtrack_server=info,evtrack_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = TrackerConfig::load()?;

    let storage = config.storage();
    tracing::info!(path = %storage.path().display(), "using event storage");

    // Ensure only one server serves this storage file
    let _lock = singleton::acquire_lock(storage.path())?;

    let state = AppState::new(Arc::new(storage));
    let app = routes::router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.server_port));
    tracing::info!("evtrack-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
