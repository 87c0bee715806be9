//! Global storm descriptor and its per-tick evolution.

use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::zones::{MAX_STORM_DISTANCE_MI, ZoneRegistry};

/// Width of the uniform intensity random walk per tick.
const INTENSITY_STEP: f64 = 0.03;
/// Intensity change beyond which the storm counts as strengthening/weakening.
const TREND_THRESHOLD: f64 = 0.01;

/// Saffir-Simpson style storm category derived from sustained wind speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Category {
    #[serde(rename = "Tropical Depression")]
    TropicalDepression,
    #[serde(rename = "Tropical Storm")]
    TropicalStorm,
    #[serde(rename = "Category 1 Hurricane")]
    Category1,
    #[serde(rename = "Category 2 Hurricane")]
    Category2,
    #[serde(rename = "Category 3 Hurricane")]
    Category3,
    #[serde(rename = "Category 4 Hurricane")]
    Category4,
    #[serde(rename = "Category 5 Hurricane")]
    Category5,
}

impl Category {
    /// Classifies a wind speed in mph.
    pub fn from_wind_speed(wind_speed_mph: f64) -> Self {
        if wind_speed_mph < 39.0 {
            Self::TropicalDepression
        } else if wind_speed_mph < 74.0 {
            Self::TropicalStorm
        } else if wind_speed_mph < 96.0 {
            Self::Category1
        } else if wind_speed_mph < 111.0 {
            Self::Category2
        } else if wind_speed_mph < 130.0 {
            Self::Category3
        } else if wind_speed_mph < 157.0 {
            Self::Category4
        } else {
            Self::Category5
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TropicalDepression => "Tropical Depression",
            Self::TropicalStorm => "Tropical Storm",
            Self::Category1 => "Category 1 Hurricane",
            Self::Category2 => "Category 2 Hurricane",
            Self::Category3 => "Category 3 Hurricane",
            Self::Category4 => "Category 4 Hurricane",
            Self::Category5 => "Category 5 Hurricane",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Direction of the last intensity change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Trend {
    Weakening,
    #[default]
    Steady,
    Strengthening,
}

impl Trend {
    fn from_delta(delta: f64) -> Self {
        if delta > TREND_THRESHOLD {
            Self::Strengthening
        } else if delta < -TREND_THRESHOLD {
            Self::Weakening
        } else {
            Self::Steady
        }
    }

    /// Signed value in `{-1, 0, 1}` used by the outage-risk multiplier.
    pub fn signum(self) -> f64 {
        match self {
            Self::Weakening => -1.0,
            Self::Steady => 0.0,
            Self::Strengthening => 1.0,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Weakening => "Weakening",
            Self::Steady => "Steady",
            Self::Strengthening => "Strengthening",
        };
        f.pad(label)
    }
}

/// The single storm driving the simulation.
///
/// `intensity` is the only free variable: wind speed, pressure, rainfall,
/// surge and category are recomputed from it and never set directly.
#[derive(Debug, Clone, PartialEq)]
pub struct StormState {
    intensity: f64,
    wind_speed: f64,
    pressure: f64,
    rainfall: f64,
    storm_surge: f64,
    category: Category,
    /// Forward speed of the storm (mph).
    pub movement_speed: f64,
    /// Heading in degrees.
    pub direction: f64,
    /// Radius of the eye (miles).
    pub eye_radius: f64,
    trend: Trend,
    time: u64,
}

impl StormState {
    /// Creates a storm at tick 0 with a steady trend.
    ///
    /// `intensity` is clamped to `[0, 1]`.
    pub fn new(intensity: f64, movement_speed: f64, direction: f64, eye_radius: f64) -> Self {
        let mut storm = Self {
            intensity: 0.0,
            wind_speed: 0.0,
            pressure: 0.0,
            rainfall: 0.0,
            storm_surge: 0.0,
            category: Category::TropicalDepression,
            movement_speed,
            direction,
            eye_radius,
            trend: Trend::Steady,
            time: 0,
        };
        storm.set_intensity(intensity);
        storm
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Sustained wind speed (mph).
    pub fn wind_speed(&self) -> f64 {
        self.wind_speed
    }

    /// Central pressure (mb).
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Rainfall rate (in/h).
    pub fn rainfall(&self) -> f64 {
        self.rainfall
    }

    /// Storm surge (ft).
    pub fn storm_surge(&self) -> f64 {
        self.storm_surge
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Ticks elapsed since the last reset.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Discontinuous override: sets intensity, restarts the clock and
    /// clears the trend.
    pub fn set_intensity(&mut self, intensity: f64) {
        self.intensity = intensity.clamp(0.0, 1.0);
        self.recompute_derived();
        self.trend = Trend::Steady;
        self.time = 0;
    }

    /// Advances the storm by one tick and moves every zone relative to it.
    ///
    /// Intensity follows a bounded uniform random walk. Each zone's distance
    /// shifts by the storm's per-minute movement projected on a random
    /// bearing, plus up to half a mile of noise, and stays within `[0, 50]`.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, zones: &mut ZoneRegistry) {
        self.time += 1;

        let delta = (rng.random::<f64>() - 0.5) * INTENSITY_STEP;
        self.intensity = (self.intensity + delta).clamp(0.0, 1.0);
        self.recompute_derived();
        self.trend = Trend::from_delta(delta);

        let movement = self.movement_speed / 60.0;
        for zone in zones.iter_mut() {
            let bearing = rng.random::<f64>() * 360.0;
            let approach = movement * (bearing - self.direction).to_radians().cos();
            let noise = rng.random::<f64>() - 0.5;
            zone.distance_to_storm =
                (zone.distance_to_storm - approach + noise).clamp(0.0, MAX_STORM_DISTANCE_MI);
        }
    }

    fn recompute_derived(&mut self) {
        self.wind_speed = 30.0 + self.intensity * 150.0;
        self.pressure = 1010.0 - self.intensity * 100.0;
        self.rainfall = 1.0 + self.intensity * 15.0;
        self.storm_surge = self.intensity * 25.0;
        self.category = Category::from_wind_speed(self.wind_speed);
    }
}
