//! Post-hoc run summary computed from tick reports.

use std::fmt;

use super::classification::ZoneStatus;
use super::types::SnapshotReport;

/// Per-zone aggregates over a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSummary {
    /// Zone short code.
    pub zone: String,
    /// Highest predicted outage risk seen (%).
    pub peak_outage_risk: f64,
    /// Lowest infrastructure health seen (%).
    pub min_infrastructure_health: u32,
    /// Ticks spent in each status, indexed like [`ZoneStatus::ALL`].
    pub status_ticks: [usize; 5],
    /// Status reported on the last tick.
    pub final_status: ZoneStatus,
}

impl ZoneSummary {
    /// Ticks spent in `status`.
    pub fn ticks_in(&self, status: ZoneStatus) -> usize {
        self.status_ticks[status as usize]
    }

    /// Ticks spent in CRITICAL or AT_RISK.
    pub fn outage_ticks(&self) -> usize {
        self.ticks_in(ZoneStatus::Critical) + self.ticks_in(ZoneStatus::AtRisk)
    }
}

/// Aggregate indicators derived from a complete run.
///
/// Computed post-hoc from the tick reports so the summary always agrees
/// with what was reported tick by tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of ticks summarized.
    pub ticks: usize,
    /// Highest storm intensity seen (%).
    pub peak_intensity: u32,
    /// Emergency calls on the last tick (cumulative counter).
    pub final_emergency_calls: u64,
    /// Lowest region-wide grid stability seen (%).
    pub min_grid_stability: u32,
    /// One entry per zone, in registry order.
    pub zones: Vec<ZoneSummary>,
}

impl RunSummary {
    /// Computes the summary from every report of a run.
    ///
    /// Zones are taken from the first report; all reports of one clock
    /// list the same zones in the same order.
    pub fn from_reports(reports: &[SnapshotReport]) -> Self {
        let Some(first) = reports.first() else {
            return Self {
                ticks: 0,
                peak_intensity: 0,
                final_emergency_calls: 0,
                min_grid_stability: 100,
                zones: Vec::new(),
            };
        };

        let mut zones: Vec<ZoneSummary> = first
            .zones
            .iter()
            .map(|z| ZoneSummary {
                zone: z.zone.clone(),
                peak_outage_risk: 0.0,
                min_infrastructure_health: 100,
                status_ticks: [0; 5],
                final_status: z.status,
            })
            .collect();

        let mut peak_intensity = 0;
        let mut min_grid_stability = 100;

        for report in reports {
            peak_intensity = peak_intensity.max(report.storm.intensity);
            min_grid_stability = min_grid_stability.min(report.network.power_grid_stability);

            for (summary, zone) in zones.iter_mut().zip(&report.zones) {
                summary.peak_outage_risk = summary.peak_outage_risk.max(zone.predicted_outage_risk);
                summary.min_infrastructure_health = summary
                    .min_infrastructure_health
                    .min(zone.infrastructure_health);
                summary.status_ticks[zone.status as usize] += 1;
                summary.final_status = zone.status;
            }
        }

        Self {
            ticks: reports.len(),
            peak_intensity,
            final_emergency_calls: reports
                .last()
                .map_or(0, |r| r.network.emergency_calls),
            min_grid_stability,
            zones,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Summary ({} ticks) ---", self.ticks)?;
        writeln!(f, "Peak storm intensity:   {}%", self.peak_intensity)?;
        writeln!(f, "Emergency calls:        {}", self.final_emergency_calls)?;
        writeln!(f, "Min grid stability:     {}%", self.min_grid_stability)?;
        for z in &self.zones {
            writeln!(
                f,
                "Zone {:<4} final={:<9} peak risk={:>5.1}%  min health={:>3}%  outage ticks={}",
                z.zone,
                z.final_status,
                z.peak_outage_risk,
                z.min_infrastructure_health,
                z.outage_ticks(),
            )?;
        }
        Ok(())
    }
}
