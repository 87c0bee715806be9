//! Ordered store of monitored zones.

use tracing::{info, warn};

use super::zone::{Zone, ZoneUpdate};
use crate::error::SimError;

/// Result of an ingest batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestOutcome {
    /// Number of updates that matched a zone.
    pub applied: usize,
    /// Zone names that matched nothing and were skipped.
    pub ignored: Vec<String>,
}

/// Fixed set of zones, kept in insertion order.
///
/// Zones are created once and never removed. Ticks mutate
/// `distance_to_storm` and `last_outage_hours`; ingest may overwrite any
/// field except the zone's name.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    /// Builds a registry after validating every zone.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::EmptyRegistry`] for an empty list,
    /// [`SimError::DuplicateZone`] when names collide, or the first
    /// [`SimError::InvalidZone`] found.
    pub fn new(zones: Vec<Zone>) -> Result<Self, SimError> {
        if zones.is_empty() {
            return Err(SimError::EmptyRegistry);
        }
        for (i, zone) in zones.iter().enumerate() {
            zone.validate()?;
            if zones[..i].iter().any(|other| other.name == zone.name) {
                return Err(SimError::DuplicateZone(zone.name.clone()));
            }
        }
        Ok(Self { zones })
    }

    /// Looks up a zone by short code.
    pub fn get(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Zone> {
        self.zones.iter_mut()
    }

    /// Applies a batch of partial updates.
    ///
    /// Updates naming an unknown zone are skipped and reported in
    /// [`IngestOutcome::ignored`]. The batch is all-or-nothing: if any
    /// updated zone fails validation the registry is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the [`SimError::InvalidZone`] of the first zone the batch
    /// would have broken.
    pub fn ingest(&mut self, updates: &[ZoneUpdate]) -> Result<IngestOutcome, SimError> {
        let mut staged = self.zones.clone();
        let mut outcome = IngestOutcome::default();

        for update in updates {
            match staged.iter_mut().find(|z| z.name == update.zone) {
                Some(zone) => {
                    update.apply_to(zone);
                    outcome.applied += 1;
                }
                None => {
                    warn!(zone = %update.zone, "Ingest update for unknown zone ignored");
                    outcome.ignored.push(update.zone.clone());
                }
            }
        }

        for zone in &staged {
            zone.validate()?;
        }

        self.zones = staged;
        info!(
            applied = outcome.applied,
            ignored = outcome.ignored.len(),
            "Zone updates ingested"
        );
        Ok(outcome)
    }

    /// Clears accumulated outage hours on every zone.
    pub fn reset_outage_hours(&mut self) {
        for zone in &mut self.zones {
            zone.last_outage_hours = 0.0;
        }
    }
}
