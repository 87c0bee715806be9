//! Display-ready report types returned by the simulation clock.
//!
//! Reports are rounded for the dashboard and serialize with camelCase keys.
//! Raw model output lives in [`ZoneMetrics`](super::degradation::ZoneMetrics).

use std::fmt;

use serde::Serialize;

use crate::zones::Zone;

use super::classification::ZoneStatus;
use super::degradation::ZoneMetrics;
use super::network::NetworkLoad;
use super::storm::{Category, StormState, Trend};

/// Average repair-crew travel speed (distance units per hour).
const CREW_SPEED: f64 = 30.0;

/// Rounds `value` to `decimals` fractional digits.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

fn round_u32(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// Result of one tick: every zone, the storm and the network overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotReport {
    /// Ticks run by this clock, unaffected by storm resets.
    pub tick: u64,
    pub zones: Vec<ZoneReport>,
    pub storm: StormSummary,
    pub network: NetworkOverview,
}

/// Rounded per-zone metrics for one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneReport {
    /// Zone short code.
    pub zone: String,
    pub display_name: String,
    pub population: u64,
    pub status: ZoneStatus,
    /// Latency (ms).
    pub latency: u32,
    /// Download throughput (Mbps, 1 decimal).
    pub download: f64,
    /// Upload throughput (Mbps, 1 decimal).
    pub upload: f64,
    /// Packet loss (%, 2 decimals).
    pub packet_loss: f64,
    /// Jitter (ms, 1 decimal).
    pub jitter: f64,
    pub retransmission_rate: f64,
    pub connection_drop_rate: u32,
    /// Voice MOS (1 decimal).
    pub voice_quality: f64,
    pub video_quality: u32,
    /// Infrastructure health (%).
    pub infrastructure_health: u32,
    /// Congestion (%).
    pub congestion_level: u32,
    pub active_towers: u32,
    pub total_towers: u32,
    /// Power availability (%).
    pub power_availability: u32,
    /// Predicted outage risk (%, 1 decimal).
    pub predicted_outage_risk: f64,
    /// Distance to the storm (miles, 1 decimal).
    pub distance_to_storm: f64,
    pub flood_risk: f64,
    /// Estimated crew arrival (minutes).
    pub estimated_repair_time: u32,
}

impl ZoneReport {
    /// Builds the rounded report for `zone`.
    pub fn new(zone: &Zone, status: ZoneStatus, m: &ZoneMetrics, risk: f64) -> Self {
        Self {
            zone: zone.name.clone(),
            display_name: zone.display_name.clone(),
            population: zone.population,
            status,
            latency: round_u32(m.latency),
            download: round_to(m.download, 1),
            upload: round_to(m.upload, 1),
            packet_loss: round_to(m.packet_loss, 2),
            jitter: round_to(m.jitter, 1),
            retransmission_rate: round_to(m.retransmission_rate, 1),
            connection_drop_rate: round_u32(m.connection_drop_rate),
            voice_quality: round_to(m.voice_quality, 1),
            video_quality: round_u32(m.video_quality),
            infrastructure_health: round_u32(m.infrastructure_health),
            congestion_level: round_u32(m.congestion_level),
            active_towers: m.active_towers,
            total_towers: m.total_towers,
            power_availability: round_u32(m.power_availability),
            predicted_outage_risk: round_to(risk, 1),
            distance_to_storm: round_to(zone.distance_to_storm, 1),
            flood_risk: zone.flood_risk,
            estimated_repair_time: round_u32(zone.repair_crew_distance / CREW_SPEED * 60.0),
        }
    }
}

impl fmt::Display for ZoneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<4} {:<9} | dist={:>5.1} mi | lat={:>5} ms  down={:>6.1}  up={:>5.1} Mbps \
             loss={:>5.2}% | health={:>3}%  power={:>3}%  cong={:>3}% | \
             towers={}/{} | risk={:>5.1}%",
            self.zone,
            self.status,
            self.distance_to_storm,
            self.latency,
            self.download,
            self.upload,
            self.packet_loss,
            self.infrastructure_health,
            self.power_availability,
            self.congestion_level,
            self.active_towers,
            self.total_towers,
            self.predicted_outage_risk,
        )
    }
}

/// Rounded storm descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StormSummary {
    /// Intensity (%).
    pub intensity: u32,
    pub category: Category,
    /// Wind speed (mph).
    pub wind_speed: u32,
    /// Central pressure (mb).
    pub pressure: u32,
    pub rainfall: f64,
    pub storm_surge: f64,
    pub movement_speed: f64,
    pub trend: Trend,
}

impl From<&StormState> for StormSummary {
    fn from(storm: &StormState) -> Self {
        Self {
            intensity: round_u32(storm.intensity() * 100.0),
            category: storm.category(),
            wind_speed: round_u32(storm.wind_speed()),
            pressure: round_u32(storm.pressure()),
            rainfall: round_to(storm.rainfall(), 1),
            storm_surge: round_to(storm.storm_surge(), 1),
            movement_speed: storm.movement_speed,
            trend: storm.trend(),
        }
    }
}

impl fmt::Display for StormSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}%) wind={} mph pressure={} mb surge={:.1} ft [{}]",
            self.category,
            self.intensity,
            self.wind_speed,
            self.pressure,
            self.storm_surge,
            self.trend
        )
    }
}

/// Rounded network aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkOverview {
    /// Mean bandwidth usage (%).
    pub total_bandwidth_usage: u32,
    pub active_sessions: u64,
    pub emergency_calls: u64,
    /// Mean power-grid stability (%).
    pub power_grid_stability: u32,
}

impl From<&NetworkLoad> for NetworkOverview {
    fn from(net: &NetworkLoad) -> Self {
        Self {
            total_bandwidth_usage: round_u32(net.total_bandwidth_usage() * 100.0),
            active_sessions: net.active_sessions(),
            emergency_calls: net.emergency_calls().round().max(0.0) as u64,
            power_grid_stability: round_u32(net.power_grid_stability() * 100.0),
        }
    }
}

/// Acknowledgement of a storm-intensity override.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StormUpdate {
    pub message: String,
    pub category: Category,
    pub wind_speed: u32,
    pub pressure: u32,
}

impl From<&StormState> for StormUpdate {
    fn from(storm: &StormState) -> Self {
        Self {
            message: format!(
                "Storm intensity set to {}%",
                round_u32(storm.intensity() * 100.0)
            ),
            category: storm.category(),
            wind_speed: round_u32(storm.wind_speed()),
            pressure: round_u32(storm.pressure()),
        }
    }
}
