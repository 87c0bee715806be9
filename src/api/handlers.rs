//! Request handlers for the API endpoints.

use std::sync::{Arc, MutexGuard};

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use super::AppState;
use super::error::ApiError;
use super::types::IngestResponse;
use crate::error::SimError;
use crate::sim::clock::SimulationClock;
use crate::sim::types::{SnapshotReport, StormUpdate};
use crate::zones::ZoneUpdate;

fn lock(state: &AppState) -> Result<MutexGuard<'_, SimulationClock>, ApiError> {
    state
        .clock
        .lock()
        .map_err(|e| ApiError::Internal(format!("simulation lock poisoned: {e}")))
}

/// Advances the simulation one tick and returns the snapshot.
///
/// `GET /status` → 200 + `SnapshotReport` JSON
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SnapshotReport>, ApiError> {
    let mut clock = lock(&state)?;
    Ok(Json(clock.tick()))
}

/// Overwrites zone attributes from a list of partial zone records.
///
/// `POST /ingest` → 201 + `IngestResponse` JSON; 400 if the body does not
/// parse or any value is out of range
pub async fn post_ingest(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Vec<ZoneUpdate>>, JsonRejection>,
) -> Result<(StatusCode, Json<IngestResponse>), ApiError> {
    let Json(updates) = payload?;
    let outcome = lock(&state)?.ingest(&updates)?;
    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            message: "Metrics ingested".to_string(),
            applied: outcome.applied,
            ignored: outcome.ignored,
        }),
    ))
}

/// Resets the storm to the requested intensity.
///
/// `POST /storm` with `{"intensity": 0.0..=1.0}` → 200 + `StormUpdate` JSON;
/// a malformed body or a missing, non-numeric or out-of-range intensity → 400
pub async fn post_storm(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<StormUpdate>, ApiError> {
    let Json(body) = payload?;
    let intensity = body
        .get("intensity")
        .and_then(serde_json::Value::as_f64)
        .ok_or(SimError::InvalidIntensity(f64::NAN))?;
    let update = lock(&state)?.set_storm_intensity(intensity)?;
    Ok(Json(update))
}
