//! Storm-driven telecom network degradation simulator.
//!
//! A [`SimulationClock`](sim::clock::SimulationClock) owns a fixed set of
//! zones and a single storm. Each tick evolves the storm, degrades every
//! zone's network metrics, classifies zone health and predicts outage risk.

/// Scenario configuration, presets, and validation.
pub mod config;
pub mod error;
pub mod io;
/// Storm evolution, degradation model, classification, and the clock.
pub mod sim;
pub mod zones;

/// REST API server (requires `api` feature).
#[cfg(feature = "api")]
pub mod api;
