//! Simulation clock: the single owner of all mutable simulation state.

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::error::SimError;
use crate::zones::{IngestOutcome, ZoneRegistry, ZoneUpdate};

use super::classification::{OUTAGE_HOURS_PER_TICK, classify, predict_outage_risk};
use super::degradation::compute_metrics;
use super::network::NetworkLoad;
use super::storm::StormState;
use super::types::{NetworkOverview, SnapshotReport, StormSummary, StormUpdate, ZoneReport};

/// Everything a tick reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub zones: ZoneRegistry,
    pub storm: StormState,
    pub network: NetworkLoad,
}

/// Drives the simulation one tick at a time.
///
/// Owns the zones, the storm, the network aggregate and the random source.
/// Every operation takes `&mut self`, so callers sharing a clock must
/// serialize access to it as a whole.
///
/// # Examples
///
/// ```
/// use storm_telecom_sim::config::ScenarioConfig;
///
/// let mut clock = ScenarioConfig::buffalo().build_clock().unwrap();
/// let report = clock.tick();
/// assert_eq!(report.tick, 1);
/// assert_eq!(report.zones.len(), 3);
/// ```
pub struct SimulationClock<R: Rng = StdRng> {
    state: SimulationState,
    rng: R,
    ticks: u64,
}

impl SimulationClock<StdRng> {
    /// Creates a clock driven by a seeded [`StdRng`].
    pub fn seeded(zones: ZoneRegistry, storm: StormState, seed: u64) -> Self {
        Self::new(zones, storm, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulationClock<R> {
    /// Creates a clock with an explicit random source.
    pub fn new(zones: ZoneRegistry, storm: StormState, rng: R) -> Self {
        Self {
            state: SimulationState {
                zones,
                storm,
                network: NetworkLoad::new(),
            },
            rng,
            ticks: 0,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances the simulation by one tick and reports the result.
    ///
    /// The storm evolves first, then every zone is degraded, classified
    /// and scored against the new storm. Zones in an outage-level status
    /// accrue outage hours after their risk has been scored.
    pub fn tick(&mut self) -> SnapshotReport {
        self.ticks += 1;
        self.state
            .storm
            .advance(&mut self.rng, &mut self.state.zones);

        let storm = &self.state.storm;
        let network = &mut self.state.network;
        network.begin_tick();

        let mut zones = Vec::new();
        for zone in self.state.zones.iter_mut() {
            let (metrics, load) = compute_metrics(zone, storm);
            let status = classify(&metrics);
            let risk = predict_outage_risk(zone, storm, &metrics);

            if status.is_outage() {
                zone.last_outage_hours += OUTAGE_HOURS_PER_TICK;
            }
            network.add_zone(&load);
            zones.push(ZoneReport::new(zone, status, &metrics, risk));
        }

        debug!(
            tick = self.ticks,
            intensity = storm.intensity(),
            category = %storm.category(),
            "Tick complete"
        );

        SnapshotReport {
            tick: self.ticks,
            zones,
            storm: StormSummary::from(storm),
            network: NetworkOverview::from(&*network),
        }
    }

    /// Overwrites zone fields from partial updates.
    ///
    /// No metrics are recomputed; the next tick picks the changes up.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidZone`] if the batch would break a zone
    /// invariant; nothing is written in that case.
    pub fn ingest(&mut self, updates: &[ZoneUpdate]) -> Result<IngestOutcome, SimError> {
        self.state.zones.ingest(updates)
    }

    /// Resets the storm to `intensity`.
    ///
    /// Restarts storm time, clears the trend, the emergency-call counter
    /// and every zone's outage history.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidIntensity`] unless `0 <= intensity <= 1`;
    /// state is unchanged in that case.
    pub fn set_storm_intensity(&mut self, intensity: f64) -> Result<StormUpdate, SimError> {
        if !(0.0..=1.0).contains(&intensity) {
            return Err(SimError::InvalidIntensity(intensity));
        }

        self.state.storm.set_intensity(intensity);
        self.state.network.reset();
        self.state.zones.reset_outage_hours();

        let update = StormUpdate::from(&self.state.storm);
        info!(
            intensity,
            category = %self.state.storm.category(),
            "Storm intensity overridden"
        );
        Ok(update)
    }

    /// Current network aggregate, rounded for display.
    pub fn network_overview(&self) -> NetworkOverview {
        NetworkOverview::from(&self.state.network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::storm::Trend;
    use crate::zones::zone::tests::make_zone;

    fn clock(intensity: f64, seed: u64) -> SimulationClock {
        let zones = ZoneRegistry::new(vec![make_zone("A"), make_zone("B"), make_zone("C")])
            .expect("fixture zones are valid");
        SimulationClock::seeded(zones, StormState::new(intensity, 15.0, 180.0, 10.0), seed)
    }

    #[test]
    fn tick_reports_every_zone() {
        let mut clock = clock(0.5, 42);
        let report = clock.tick();
        assert_eq!(report.tick, 1);
        assert_eq!(report.zones.len(), 3);
        assert_eq!(report.zones[0].zone, "A");
        assert_eq!(clock.state().storm.time(), 1);
    }

    #[test]
    fn same_seed_same_reports() {
        let mut a = clock(0.5, 9);
        let mut b = clock(0.5, 9);
        for _ in 0..20 {
            assert_eq!(a.tick(), b.tick());
        }
    }

    #[test]
    fn invalid_intensity_leaves_state_unchanged() {
        let mut clock = clock(0.5, 1);
        clock.tick();
        let before = clock.state().clone();

        for bad in [-0.1, 1.01, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                clock.set_storm_intensity(bad),
                Err(SimError::InvalidIntensity(_))
            ));
        }
        assert_eq!(clock.state(), &before);
    }

    #[test]
    fn storm_reset_clears_history() {
        let mut clock = clock(1.0, 5);
        let mut update = ZoneUpdate::for_zone("C");
        update.distance_to_storm = Some(0.0);
        clock.ingest(&[update]).expect("valid update");
        for _ in 0..10 {
            clock.tick();
        }
        assert!(clock.state().network.emergency_calls() > 0.0);

        let update = clock.set_storm_intensity(0.3).expect("valid intensity");
        assert_eq!(update.wind_speed, 75);

        let state = clock.state();
        assert_eq!(state.storm.time(), 0);
        assert_eq!(state.storm.trend(), Trend::Steady);
        assert_eq!(state.network.emergency_calls(), 0.0);
        assert!(state.zones.iter().all(|z| z.last_outage_hours == 0.0));
        assert_eq!(clock.ticks(), 10);
    }

    #[test]
    fn outage_hours_follow_status() {
        let mut clock = clock(0.5, 77);
        for _ in 0..30 {
            let before: Vec<f64> = clock
                .state()
                .zones
                .iter()
                .map(|z| z.last_outage_hours)
                .collect();
            let report = clock.tick();
            for ((zone, z_report), prior) in clock.state().zones.iter().zip(&report.zones).zip(before)
            {
                let expected = if z_report.status.is_outage() {
                    prior + OUTAGE_HOURS_PER_TICK
                } else {
                    prior
                };
                assert_eq!(zone.last_outage_hours, expected);
            }
        }
    }

    #[test]
    fn network_overview_tracks_zones() {
        let mut clock = clock(0.5, 3);
        let report = clock.tick();
        assert!(report.network.active_sessions > 0);
        assert!(report.network.power_grid_stability <= 100);
        assert_eq!(report.network, clock.network_overview());
    }
}
