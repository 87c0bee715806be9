use super::degradation::ZoneLoad;

/// Region-wide network aggregate folded from per-zone contributions.
///
/// Per-tick fields are rebuilt from scratch each tick; `emergency_calls`
/// keeps accumulating until [`NetworkLoad::reset`] is called on a storm
/// reset.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkLoad {
    total_bandwidth_usage: f64,
    active_sessions: u64,
    emergency_calls: f64,
    power_grid_stability: f64,
    bandwidth_sum: f64,
    stability_sum: f64,
    zones_this_tick: usize,
}

impl Default for NetworkLoad {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkLoad {
    /// Creates an idle network with a fully stable grid.
    pub fn new() -> Self {
        Self {
            total_bandwidth_usage: 0.0,
            active_sessions: 0,
            emergency_calls: 0.0,
            power_grid_stability: 1.0,
            bandwidth_sum: 0.0,
            stability_sum: 0.0,
            zones_this_tick: 0,
        }
    }

    /// Starts a new tick: clears per-tick sums, keeps cumulative calls.
    pub fn begin_tick(&mut self) {
        self.active_sessions = 0;
        self.bandwidth_sum = 0.0;
        self.stability_sum = 0.0;
        self.zones_this_tick = 0;
    }

    /// Folds one zone's contribution into the aggregate.
    pub fn add_zone(&mut self, load: &ZoneLoad) {
        self.emergency_calls += load.emergency_calls;
        self.active_sessions += load.active_sessions;
        self.bandwidth_sum += load.bandwidth_usage;
        self.stability_sum += load.power_stability;
        self.zones_this_tick += 1;

        let n = self.zones_this_tick as f64;
        self.total_bandwidth_usage = self.bandwidth_sum / n;
        self.power_grid_stability = self.stability_sum / n;
    }

    /// Clears everything, including the cumulative call counter.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Mean bandwidth usage across zones, `[0, 1]`.
    pub fn total_bandwidth_usage(&self) -> f64 {
        self.total_bandwidth_usage
    }

    /// Active sessions summed across zones.
    pub fn active_sessions(&self) -> u64 {
        self.active_sessions
    }

    /// Emergency calls since the last storm reset.
    pub fn emergency_calls(&self) -> f64 {
        self.emergency_calls
    }

    /// Mean power availability across zones, `[0, 1]`.
    pub fn power_grid_stability(&self) -> f64 {
        self.power_grid_stability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(calls: f64, sessions: u64, usage: f64, stability: f64) -> ZoneLoad {
        ZoneLoad {
            emergency_calls: calls,
            active_sessions: sessions,
            bandwidth_usage: usage,
            power_stability: stability,
        }
    }

    #[test]
    fn new_network_is_idle() {
        let net = NetworkLoad::new();
        assert_eq!(net.active_sessions(), 0);
        assert_eq!(net.emergency_calls(), 0.0);
        assert_eq!(net.power_grid_stability(), 1.0);
    }

    #[test]
    fn aggregates_one_tick() {
        let mut net = NetworkLoad::new();
        net.begin_tick();
        net.add_zone(&load(25.0, 100, 0.2, 1.0));
        net.add_zone(&load(25.0, 300, 0.6, 0.5));

        assert_eq!(net.active_sessions(), 400);
        assert_eq!(net.emergency_calls(), 50.0);
        assert!((net.total_bandwidth_usage() - 0.4).abs() < 1e-12);
        assert!((net.power_grid_stability() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn calls_accumulate_across_ticks() {
        let mut net = NetworkLoad::new();
        for _ in 0..3 {
            net.begin_tick();
            net.add_zone(&load(10.0, 5, 0.1, 0.9));
        }
        assert_eq!(net.emergency_calls(), 30.0);
        assert_eq!(net.active_sessions(), 5);

        net.reset();
        assert_eq!(net.emergency_calls(), 0.0);
    }
}
