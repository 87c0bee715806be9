//! Physical degradation model: storm state and zone attributes to
//! infrastructure and network metrics.
//!
//! Every function here is pure. Quantities that feed cross-zone aggregates
//! (power-grid stability, sessions, bandwidth usage, emergency calls) are
//! returned in [`ZoneLoad`] and folded by the caller.

use crate::zones::Zone;

use super::storm::StormState;

/// Cap on tower failure probability.
const MAX_TOWER_FAILURE: f64 = 0.98;
/// Cap on fiber failure probability.
const MAX_FIBER_FAILURE: f64 = 0.95;
/// Access-network capacity of a fully healthy zone (traffic units).
const NOMINAL_CAPACITY: f64 = 1000.0;

/// Surviving infrastructure after storm stress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfrastructureHealth {
    /// Towers still in service (fractional expectation).
    pub active_towers: f64,
    /// Fiber nodes still in service (fractional expectation).
    pub active_nodes: f64,
    /// Share of equipment with power, `[0, 1]`.
    pub power_availability: f64,
    /// Weighted health of towers, fiber and power, `[0, 1]`.
    pub overall_health: f64,
}

/// Per-zone contribution to the global network aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZoneLoad {
    /// Emergency calls placed during this tick.
    pub emergency_calls: f64,
    /// Estimated active sessions.
    pub active_sessions: u64,
    /// Bandwidth usage fraction, `[0, 1]`.
    pub bandwidth_usage: f64,
    /// Power availability, `[0, 1]`.
    pub power_stability: f64,
}

/// Network quality snapshot for one zone at one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneMetrics {
    /// Composite storm pressure on the zone.
    pub storm_pressure: f64,
    /// Round-trip latency (ms).
    pub latency: f64,
    /// Download throughput (Mbps).
    pub download: f64,
    /// Upload throughput (Mbps).
    pub upload: f64,
    /// Packet loss (%), `[0, 50]`.
    pub packet_loss: f64,
    /// Jitter (ms), `[0, 200]`.
    pub jitter: f64,
    /// TCP retransmission rate (%), `[0, 80]`.
    pub retransmission_rate: f64,
    /// Connection drops per hour, `[0, 200]`.
    pub connection_drop_rate: f64,
    /// Mean opinion score for voice, `[1, 5]`.
    pub voice_quality: f64,
    /// Video quality score, `[0, 100]`.
    pub video_quality: f64,
    /// Infrastructure health (%), `[0, 100]`.
    pub infrastructure_health: f64,
    /// Network congestion (%), `[0, 100]`.
    pub congestion_level: f64,
    /// Towers in service, rounded.
    pub active_towers: u32,
    /// Installed towers.
    pub total_towers: u32,
    /// Power availability (%), `[0, 100]`.
    pub power_availability: f64,
}

/// Wind load on structures (psf) for a wind speed in mph.
pub fn wind_pressure(wind_speed_mph: f64) -> f64 {
    0.00256 * wind_speed_mph.powi(2)
}

/// Composite storm pressure on a zone.
///
/// Proximity decays exponentially with a 15-mile scale; surge is damped by
/// elevation and weighted by flood risk; rugged terrain shields up to 30%.
pub fn storm_pressure(zone: &Zone, storm: &StormState) -> f64 {
    let distance_factor = (-zone.distance_to_storm / 15.0).exp();
    let elevation_factor = 1.0 / (1.0 + zone.elevation / 100.0);
    let terrain_factor = 1.0 - zone.terrain_ruggedness * 0.3;

    let base = storm.intensity() * distance_factor;
    let wind = (wind_pressure(storm.wind_speed()) / 100.0) * distance_factor;
    let surge = (storm.storm_surge() / 20.0) * elevation_factor * zone.flood_risk;

    (base + wind + surge) * terrain_factor
}

/// Tower, fiber and power survival under `storm_pressure`.
pub fn infrastructure_health(zone: &Zone, storm_pressure: f64) -> InfrastructureHealth {
    let tower_stress = storm_pressure * zone.wind_exposure * 1.5;
    let tower_failure = (tower_stress * 0.65).min(MAX_TOWER_FAILURE);
    let active_towers = f64::from(zone.cell_towers) * (1.0 - tower_failure);

    let fiber_stress = storm_pressure * (zone.flood_risk * 0.7 + 0.5);
    let fiber_failure = (fiber_stress * 0.55).min(MAX_FIBER_FAILURE);
    let active_nodes = f64::from(zone.fiber_nodes) * (1.0 - fiber_failure);

    let power_stress = storm_pressure * (1.0 - zone.backup_power) * 1.8;
    let power_availability = (1.0 - power_stress).max(0.0);

    let overall_health = active_towers / f64::from(zone.cell_towers) * 0.4
        + active_nodes / f64::from(zone.fiber_nodes) * 0.4
        + power_availability * 0.2;

    InfrastructureHealth {
        active_towers,
        active_nodes,
        power_availability,
        overall_health,
    }
}

/// Congestion fraction in `[0, 1]` and the zone's aggregate contribution.
///
/// Panic-driven demand scales with population and intensity; capacity
/// scales with surviving infrastructure.
pub fn network_congestion(
    zone: &Zone,
    storm: &StormState,
    health: &InfrastructureHealth,
) -> (f64, ZoneLoad) {
    let intensity = storm.intensity();
    let panic_factor = (intensity * 1.5).min(2.0);
    let normal_traffic = (zone.population as f64 / 1000.0) * 0.8;
    let demand = normal_traffic * panic_factor;

    let available = NOMINAL_CAPACITY * health.overall_health;
    let congestion = (demand / available).min(1.0);

    let load = ZoneLoad {
        emergency_calls: intensity * 50.0,
        active_sessions: (zone.population as f64 * 0.4 * health.overall_health).floor() as u64,
        bandwidth_usage: congestion,
        power_stability: health.power_availability,
    };
    (congestion, load)
}

/// Mean opinion score for voice, `[1, 5]`.
pub fn voice_quality(latency: f64, jitter: f64, loss: f64) -> f64 {
    let mut mos = 4.5;
    mos -= (latency / 100.0) * 0.5;
    mos -= (jitter / 20.0) * 0.3;
    mos -= (loss / 2.0) * 0.8;
    mos.clamp(1.0, 5.0)
}

/// Video quality score, `[0, 100]`.
pub fn video_quality(download: f64, latency: f64, loss: f64) -> f64 {
    let mut quality = 100.0;
    quality -= (100.0 - download) * 0.5;
    quality -= latency / 10.0;
    quality -= loss * 3.0;
    quality.clamp(0.0, 100.0)
}

/// Runs every degradation stage for one zone.
pub fn compute_metrics(zone: &Zone, storm: &StormState) -> (ZoneMetrics, ZoneLoad) {
    let pressure = storm_pressure(zone, storm);
    let health = infrastructure_health(zone, pressure);
    let (congestion, load) = network_congestion(zone, storm, &health);

    let base_latency = 15.0 + (1.0 - zone.datacenter_proximity) * 40.0;
    let base_down = 120.0 * zone.redundancy;
    let base_up = 15.0 * zone.redundancy;
    let base_loss = 0.02;

    let effective_stress = pressure * (1.0 - zone.infra_score);

    let latency = base_latency + effective_stress * 1200.0 + congestion * 400.0;

    let health_factor = health.overall_health;
    let power_factor = health.power_availability;
    let stress_penalty = effective_stress.powf(1.5);
    let download = (base_down
        * health_factor
        * power_factor
        * (1.0 - congestion * 0.7)
        * (1.0 - stress_penalty * 0.8))
        .max(0.0);
    let upload = (base_up
        * health_factor
        * power_factor
        * (1.0 - congestion * 0.8)
        * (1.0 - stress_penalty * 0.9))
        .max(0.0);

    let packet_loss = (base_loss + effective_stress * 35.0 + congestion * 15.0).clamp(0.0, 50.0);
    let jitter = (latency * 0.15 * (1.0 + effective_stress * 2.0)).clamp(0.0, 200.0);
    let retransmission_rate = (packet_loss * 3.0).clamp(0.0, 80.0);
    let connection_drop_rate = (effective_stress * 25.0 + congestion * 12.0).clamp(0.0, 200.0);

    let metrics = ZoneMetrics {
        storm_pressure: pressure,
        latency,
        download,
        upload,
        packet_loss,
        jitter,
        retransmission_rate,
        connection_drop_rate,
        voice_quality: voice_quality(latency, jitter, packet_loss),
        video_quality: video_quality(download, latency, packet_loss),
        infrastructure_health: health.overall_health * 100.0,
        congestion_level: congestion * 100.0,
        active_towers: health.active_towers.round() as u32,
        total_towers: zone.cell_towers,
        power_availability: health.power_availability * 100.0,
    };
    (metrics, load)
}
