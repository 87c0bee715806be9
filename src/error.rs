//! Error types for the simulation engine.
//!
//! Engine operations that can fail return [`SimError`]. Configuration
//! problems are reported separately as [`crate::config::ConfigError`] so
//! that every invalid field can be listed at once.

/// Errors raised by zone construction and engine operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// Storm intensity override was non-finite or outside `[0, 1]`.
    #[error("intensity must be a number between 0 and 1, got {0}")]
    InvalidIntensity(f64),

    /// A zone attribute violates its precondition.
    #[error("zone {zone}: invalid {field} ({reason})")]
    InvalidZone {
        /// Zone short code.
        zone: String,
        /// Offending attribute name.
        field: &'static str,
        /// Constraint that was violated.
        reason: String,
    },

    /// Two zones share the same short code.
    #[error("duplicate zone name: {0}")]
    DuplicateZone(String),

    /// A registry was built with no zones.
    #[error("zone registry must contain at least one zone")]
    EmptyRegistry,
}
