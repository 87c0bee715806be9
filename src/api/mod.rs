//! REST API over a live simulation clock.
//!
//! - `GET /status` advances one tick and returns the snapshot
//! - `POST /ingest` overwrites zone attributes
//! - `POST /storm` resets the storm to a new intensity

mod error;
mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::sim::clock::SimulationClock;

pub use error::ApiError;
pub use types::IngestResponse;

/// Application state shared across all request handlers.
///
/// The clock is mutated by every endpoint, so the whole clock sits behind
/// one lock and requests are applied one at a time.
pub struct AppState {
    pub clock: Mutex<SimulationClock>,
}

impl AppState {
    pub fn new(clock: SimulationClock) -> Self {
        Self {
            clock: Mutex::new(clock),
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/status", get(handlers::get_status))
        .route("/ingest", post(handlers::post_ingest))
        .route("/storm", post(handlers::post_storm))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
