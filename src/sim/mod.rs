/// Zone health classification and outage-risk prediction.
pub mod classification;
/// Simulation clock owning all mutable state.
pub mod clock;
pub mod degradation;
pub mod kpi;
/// Region-wide network aggregate.
pub mod network;
pub mod storm;
pub mod types;
