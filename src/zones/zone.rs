//! Monitored zone attributes and partial updates.

use serde::Deserialize;

use crate::error::SimError;

/// Maximum tracked distance between a zone and the storm (miles).
pub const MAX_STORM_DISTANCE_MI: f64 = 50.0;

/// A monitored area with static infrastructure attributes and dynamic
/// storm-exposure state.
///
/// Score attributes are unitless in `[0, 1]`. `cell_towers`, `fiber_nodes`
/// and `mtbf` must be strictly positive; [`Zone::validate`] enforces this so
/// the degradation model never divides by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    /// Unique short code.
    pub name: String,
    /// Human-readable name shown on the dashboard.
    pub display_name: String,
    /// Resident population.
    pub population: u64,
    /// Build quality of local infrastructure.
    pub infra_score: f64,
    /// Social vulnerability of the population.
    pub vulnerability_score: f64,
    /// Elevation above sea level (ft).
    pub elevation: f64,
    /// Number of cell towers serving the zone.
    pub cell_towers: u32,
    /// Number of fiber aggregation nodes.
    pub fiber_nodes: u32,
    /// Closeness to the nearest datacenter.
    pub datacenter_proximity: f64,
    /// Path redundancy of the access network.
    pub redundancy: f64,
    /// Share of equipment on backup power.
    pub backup_power: f64,
    /// Exposure to flooding and surge.
    pub flood_risk: f64,
    /// Exposure of towers to wind.
    pub wind_exposure: f64,
    /// Terrain shielding; rugged terrain absorbs part of the storm.
    pub terrain_ruggedness: f64,
    /// Mean time between failures (hours).
    pub mtbf: f64,
    /// Distance repair crews travel to reach the zone.
    pub repair_crew_distance: f64,
    /// Current distance to the storm (miles, `[0, 50]`).
    pub distance_to_storm: f64,
    /// Accumulated outage hours since the last storm reset.
    pub last_outage_hours: f64,
}

impl Zone {
    /// Checks every attribute precondition.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidZone`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.name.trim().is_empty() {
            return Err(self.invalid("name", "must not be empty"));
        }

        let scores = [
            ("infra_score", self.infra_score),
            ("vulnerability_score", self.vulnerability_score),
            ("datacenter_proximity", self.datacenter_proximity),
            ("redundancy", self.redundancy),
            ("backup_power", self.backup_power),
            ("flood_risk", self.flood_risk),
            ("wind_exposure", self.wind_exposure),
            ("terrain_ruggedness", self.terrain_ruggedness),
        ];
        for (field, value) in scores {
            if !(0.0..=1.0).contains(&value) {
                return Err(self.invalid(field, "must be in [0, 1]"));
            }
        }

        if self.cell_towers == 0 {
            return Err(self.invalid("cell_towers", "must be > 0"));
        }
        if self.fiber_nodes == 0 {
            return Err(self.invalid("fiber_nodes", "must be > 0"));
        }
        if !self.mtbf.is_finite() || self.mtbf <= 0.0 {
            return Err(self.invalid("mtbf", "must be > 0"));
        }
        if !self.elevation.is_finite() || self.elevation <= -100.0 {
            return Err(self.invalid("elevation", "must be > -100 ft"));
        }
        if !self.repair_crew_distance.is_finite() || self.repair_crew_distance < 0.0 {
            return Err(self.invalid("repair_crew_distance", "must be >= 0"));
        }
        if !(0.0..=MAX_STORM_DISTANCE_MI).contains(&self.distance_to_storm) {
            return Err(self.invalid("distance_to_storm", "must be in [0, 50]"));
        }
        if !self.last_outage_hours.is_finite() || self.last_outage_hours < 0.0 {
            return Err(self.invalid("last_outage_hours", "must be >= 0"));
        }
        Ok(())
    }

    fn invalid(&self, field: &'static str, reason: &str) -> SimError {
        SimError::InvalidZone {
            zone: self.name.clone(),
            field,
            reason: reason.to_string(),
        }
    }
}

/// Partial set of zone fields submitted through ingest.
///
/// Only fields present in the payload are written; unknown keys are
/// ignored during deserialization. The zone's `name` is its identity and is
/// not writable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneUpdate {
    /// Short code of the zone to update.
    pub zone: String,
    pub display_name: Option<String>,
    pub population: Option<u64>,
    pub infra_score: Option<f64>,
    pub vulnerability_score: Option<f64>,
    pub elevation: Option<f64>,
    pub cell_towers: Option<u32>,
    pub fiber_nodes: Option<u32>,
    pub datacenter_proximity: Option<f64>,
    pub redundancy: Option<f64>,
    pub backup_power: Option<f64>,
    pub flood_risk: Option<f64>,
    pub wind_exposure: Option<f64>,
    pub terrain_ruggedness: Option<f64>,
    pub mtbf: Option<f64>,
    pub repair_crew_distance: Option<f64>,
    pub distance_to_storm: Option<f64>,
    pub last_outage_hours: Option<f64>,
}

impl ZoneUpdate {
    /// Creates an empty update targeting `zone`.
    pub fn for_zone(zone: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            ..Self::default()
        }
    }

    /// Writes every present field onto `zone`.
    pub fn apply_to(&self, zone: &mut Zone) {
        fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }

        set(&mut zone.display_name, &self.display_name);
        set(&mut zone.population, &self.population);
        set(&mut zone.infra_score, &self.infra_score);
        set(&mut zone.vulnerability_score, &self.vulnerability_score);
        set(&mut zone.elevation, &self.elevation);
        set(&mut zone.cell_towers, &self.cell_towers);
        set(&mut zone.fiber_nodes, &self.fiber_nodes);
        set(&mut zone.datacenter_proximity, &self.datacenter_proximity);
        set(&mut zone.redundancy, &self.redundancy);
        set(&mut zone.backup_power, &self.backup_power);
        set(&mut zone.flood_risk, &self.flood_risk);
        set(&mut zone.wind_exposure, &self.wind_exposure);
        set(&mut zone.terrain_ruggedness, &self.terrain_ruggedness);
        set(&mut zone.mtbf, &self.mtbf);
        set(&mut zone.repair_crew_distance, &self.repair_crew_distance);
        set(&mut zone.distance_to_storm, &self.distance_to_storm);
        set(&mut zone.last_outage_hours, &self.last_outage_hours);
    }
}

impl From<&Zone> for ZoneUpdate {
    /// Captures every writable field of `zone`.
    fn from(zone: &Zone) -> Self {
        Self {
            zone: zone.name.clone(),
            display_name: Some(zone.display_name.clone()),
            population: Some(zone.population),
            infra_score: Some(zone.infra_score),
            vulnerability_score: Some(zone.vulnerability_score),
            elevation: Some(zone.elevation),
            cell_towers: Some(zone.cell_towers),
            fiber_nodes: Some(zone.fiber_nodes),
            datacenter_proximity: Some(zone.datacenter_proximity),
            redundancy: Some(zone.redundancy),
            backup_power: Some(zone.backup_power),
            flood_risk: Some(zone.flood_risk),
            wind_exposure: Some(zone.wind_exposure),
            terrain_ruggedness: Some(zone.terrain_ruggedness),
            mtbf: Some(zone.mtbf),
            repair_crew_distance: Some(zone.repair_crew_distance),
            distance_to_storm: Some(zone.distance_to_storm),
            last_outage_hours: Some(zone.last_outage_hours),
        }
    }
}
