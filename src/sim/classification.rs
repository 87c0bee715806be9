//! Zone health classification and outage-risk prediction.

use std::fmt;

use serde::Serialize;

use crate::zones::Zone;

use super::degradation::{ZoneMetrics, storm_pressure};
use super::storm::StormState;

/// Outage hours accrued per tick spent in an outage-level status.
pub const OUTAGE_HOURS_PER_TICK: f64 = 1.0 / 60.0;

/// Discrete health status, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneStatus {
    Ok,
    Degrading,
    Degraded,
    AtRisk,
    Critical,
}

impl ZoneStatus {
    /// All statuses, best first.
    pub const ALL: [Self; 5] = [
        Self::Ok,
        Self::Degrading,
        Self::Degraded,
        Self::AtRisk,
        Self::Critical,
    ];

    /// Whether time spent in this status counts towards outage history.
    pub fn is_outage(self) -> bool {
        matches!(self, Self::Critical | Self::AtRisk)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Degrading => "DEGRADING",
            Self::Degraded => "DEGRADED",
            Self::AtRisk => "AT_RISK",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classifies metrics with an ordered threshold cascade; the first
/// matching level wins.
pub fn classify(m: &ZoneMetrics) -> ZoneStatus {
    if m.infrastructure_health < 30.0
        || m.packet_loss > 12.0
        || m.connection_drop_rate > 40.0
        || m.download < 5.0
    {
        ZoneStatus::Critical
    } else if m.packet_loss > 7.0
        || m.latency > 300.0
        || m.download < 15.0
        || m.infrastructure_health < 50.0
    {
        ZoneStatus::AtRisk
    } else if m.packet_loss > 4.0
        || m.latency > 150.0
        || m.congestion_level > 60.0
        || m.download < 40.0
    {
        ZoneStatus::Degraded
    } else if m.packet_loss > 1.5
        || m.latency > 80.0
        || m.congestion_level > 40.0
        || m.download < 70.0
    {
        ZoneStatus::Degrading
    } else {
        ZoneStatus::Ok
    }
}

/// Predicted outage risk in percent, `[0, 100]`.
///
/// Blends storm pressure, lost health, congestion, lost power and the
/// zone's outage history relative to its MTBF. A strengthening storm
/// amplifies the blend by 30%, a weakening one damps it, and risk escalates
/// by 0.1 points per tick since the last storm reset.
pub fn predict_outage_risk(zone: &Zone, storm: &StormState, metrics: &ZoneMetrics) -> f64 {
    let pressure = storm_pressure(zone, storm);

    let storm_factor = pressure * 0.3;
    let health_factor = (1.0 - metrics.infrastructure_health / 100.0) * 0.25;
    let congestion_factor = (metrics.congestion_level / 100.0) * 0.15;
    let power_factor = (1.0 - metrics.power_availability / 100.0) * 0.2;
    let historical_factor = (zone.last_outage_hours / zone.mtbf) * 0.1;

    let trend_multiplier = 1.0 + storm.trend().signum() * 0.3;
    let time_escalation = storm.time() as f64 / 1000.0;

    let total = (storm_factor + health_factor + congestion_factor + power_factor + historical_factor)
        * trend_multiplier
        + time_escalation;

    (total * 100.0).clamp(0.0, 100.0)
}
