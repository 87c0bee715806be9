//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::SimError;
use crate::sim::clock::SimulationClock;
use crate::sim::storm::StormState;
use crate::zones::{MAX_STORM_DISTANCE_MI, Zone, ZoneRegistry};

/// Top-level scenario configuration parsed from TOML.
///
/// Missing sections fall back to the `buffalo` preset. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::buffalo`]
/// for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Run length and random seed.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Initial storm parameters.
    #[serde(default)]
    pub storm: StormConfig,
    /// Monitored zones, in report order.
    #[serde(default = "buffalo_zones")]
    pub zones: Vec<ZoneConfig>,
}

/// Run length and random seed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Master random seed.
    pub seed: u64,
    /// Ticks to run in batch mode (one tick ≈ one minute).
    pub ticks: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { seed: 42, ticks: 60 }
    }
}

/// Initial storm parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StormConfig {
    /// Starting intensity (0.0–1.0).
    pub intensity: f64,
    /// Forward speed (mph).
    pub movement_speed: f64,
    /// Heading (degrees).
    pub direction: f64,
    /// Eye radius (miles).
    pub eye_radius: f64,
}

impl Default for StormConfig {
    fn default() -> Self {
        Self {
            intensity: 0.5,
            movement_speed: 15.0,
            direction: 180.0,
            eye_radius: 10.0,
        }
    }
}

/// One monitored zone.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneConfig {
    pub name: String,
    pub display_name: String,
    pub population: u64,
    pub infra_score: f64,
    pub vulnerability_score: f64,
    /// Elevation (ft).
    pub elevation: f64,
    pub cell_towers: u32,
    pub fiber_nodes: u32,
    pub datacenter_proximity: f64,
    pub redundancy: f64,
    pub backup_power: f64,
    pub flood_risk: f64,
    pub wind_exposure: f64,
    pub terrain_ruggedness: f64,
    /// Mean time between failures (hours).
    pub mtbf: f64,
    pub repair_crew_distance: f64,
    /// Starting distance to the storm (miles).
    pub distance_to_storm: f64,
}

impl From<&ZoneConfig> for Zone {
    fn from(c: &ZoneConfig) -> Self {
        Self {
            name: c.name.clone(),
            display_name: c.display_name.clone(),
            population: c.population,
            infra_score: c.infra_score,
            vulnerability_score: c.vulnerability_score,
            elevation: c.elevation,
            cell_towers: c.cell_towers,
            fiber_nodes: c.fiber_nodes,
            datacenter_proximity: c.datacenter_proximity,
            redundancy: c.redundancy,
            backup_power: c.backup_power,
            flood_risk: c.flood_risk,
            wind_exposure: c.wind_exposure,
            terrain_ruggedness: c.terrain_ruggedness,
            mtbf: c.mtbf,
            repair_crew_distance: c.repair_crew_distance,
            distance_to_storm: c.distance_to_storm,
            last_outage_hours: 0.0,
        }
    }
}

fn buffalo_zones() -> Vec<ZoneConfig> {
    vec![
        ZoneConfig {
            name: "A".to_string(),
            display_name: "UB North Campus".to_string(),
            population: 18_500,
            infra_score: 0.98,
            vulnerability_score: 0.1,
            elevation: 620.0,
            cell_towers: 18,
            fiber_nodes: 15,
            datacenter_proximity: 0.98,
            redundancy: 0.95,
            backup_power: 0.98,
            flood_risk: 0.1,
            wind_exposure: 0.4,
            terrain_ruggedness: 0.3,
            mtbf: 4320.0,
            repair_crew_distance: 0.2,
            distance_to_storm: 35.0,
        },
        ZoneConfig {
            name: "B".to_string(),
            display_name: "Elmwood Village".to_string(),
            population: 12_500,
            infra_score: 0.55,
            vulnerability_score: 0.5,
            elevation: 600.0,
            cell_towers: 6,
            fiber_nodes: 4,
            datacenter_proximity: 0.45,
            redundancy: 0.45,
            backup_power: 0.4,
            flood_risk: 0.4,
            wind_exposure: 0.55,
            terrain_ruggedness: 0.2,
            mtbf: 600.0,
            repair_crew_distance: 4.0,
            distance_to_storm: 18.0,
        },
        ZoneConfig {
            name: "C".to_string(),
            display_name: "Masten Park".to_string(),
            population: 8_200,
            infra_score: 0.25,
            vulnerability_score: 0.85,
            elevation: 590.0,
            cell_towers: 3,
            fiber_nodes: 1,
            datacenter_proximity: 0.2,
            redundancy: 0.15,
            backup_power: 0.2,
            flood_risk: 0.65,
            wind_exposure: 0.75,
            terrain_ruggedness: 0.15,
            mtbf: 240.0,
            repair_crew_distance: 12.0,
            distance_to_storm: 8.0,
        },
    ]
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"zones[1].mtbf"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} ({})", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ScenarioConfig {
    /// Returns the default scenario: three Buffalo zones under a tropical storm.
    pub fn buffalo() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            storm: StormConfig::default(),
            zones: buffalo_zones(),
        }
    }

    /// Returns the landfall preset: a major hurricane heading straight in.
    pub fn landfall() -> Self {
        let mut zones = buffalo_zones();
        for (zone, distance) in zones.iter_mut().zip([12.0, 4.0, 0.0]) {
            zone.distance_to_storm = distance;
        }
        Self {
            simulation: SimulationConfig::default(),
            storm: StormConfig {
                intensity: 0.85,
                movement_speed: 25.0,
                ..StormConfig::default()
            },
            zones,
        }
    }

    /// Returns the calm preset: a weak, distant depression.
    pub fn calm() -> Self {
        let mut zones = buffalo_zones();
        for zone in &mut zones {
            zone.distance_to_storm = MAX_STORM_DISTANCE_MI;
        }
        Self {
            simulation: SimulationConfig::default(),
            storm: StormConfig {
                intensity: 0.05,
                movement_speed: 5.0,
                ..StormConfig::default()
            },
            zones,
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["buffalo", "landfall", "calm"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "buffalo" => Ok(Self::buffalo()),
            "landfall" => Ok(Self::landfall()),
            "calm" => Ok(Self::calm()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let st = &self.storm;
        if !(0.0..=1.0).contains(&st.intensity) {
            errors.push(ConfigError {
                field: "storm.intensity".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }
        if !st.movement_speed.is_finite() || st.movement_speed < 0.0 {
            errors.push(ConfigError {
                field: "storm.movement_speed".into(),
                message: "must be >= 0".into(),
            });
        }
        if !st.direction.is_finite() {
            errors.push(ConfigError {
                field: "storm.direction".into(),
                message: "must be a finite bearing".into(),
            });
        }
        if !st.eye_radius.is_finite() || st.eye_radius < 0.0 {
            errors.push(ConfigError {
                field: "storm.eye_radius".into(),
                message: "must be >= 0".into(),
            });
        }

        if self.zones.is_empty() {
            errors.push(ConfigError {
                field: "zones".into(),
                message: "at least one zone is required".into(),
            });
        }
        for (i, zc) in self.zones.iter().enumerate() {
            if let Err(SimError::InvalidZone { field, reason, .. }) = Zone::from(zc).validate() {
                errors.push(ConfigError {
                    field: format!("zones[{i}].{field}"),
                    message: reason,
                });
            }
            if self.zones[..i].iter().any(|other| other.name == zc.name) {
                errors.push(ConfigError {
                    field: format!("zones[{i}].name"),
                    message: format!("duplicate zone name \"{}\"", zc.name),
                });
            }
        }

        errors
    }

    /// Builds the initial storm.
    pub fn build_storm(&self) -> StormState {
        let s = &self.storm;
        StormState::new(s.intensity, s.movement_speed, s.direction, s.eye_radius)
    }

    /// Builds the zone registry.
    ///
    /// # Errors
    ///
    /// Returns a `SimError` if any zone is invalid or names collide.
    pub fn build_zones(&self) -> Result<ZoneRegistry, SimError> {
        ZoneRegistry::new(self.zones.iter().map(Zone::from).collect())
    }

    /// Builds a seeded clock for this scenario.
    ///
    /// # Errors
    ///
    /// Returns a `SimError` if the zones are invalid.
    pub fn build_clock(&self) -> Result<SimulationClock, SimError> {
        Ok(SimulationClock::seeded(
            self.build_zones()?,
            self.build_storm(),
            self.simulation.seed,
        ))
    }
}
