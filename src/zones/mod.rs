//! Monitored zones and their registry.

/// Zone-ordered attribute store.
pub mod registry;
pub mod zone;

pub use registry::{IngestOutcome, ZoneRegistry};
pub use zone::{MAX_STORM_DISTANCE_MI, Zone, ZoneUpdate};
