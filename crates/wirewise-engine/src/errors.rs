//! ---
//! ww_section: "02-sizing-compliance"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Error taxonomy for the sizing and compliance engine."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Validation failures rejected before any catalog work happens.
///
/// Business-rule misses (catalog exhausted, breaker sequence exhausted,
/// reference weight absent) are *not* errors; they are ordinary result
/// values the caller must surface to the user.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("power must be positive, got {0}")]
    NonPositivePower(f64),
    #[error("distance must be positive, got {0} m")]
    NonPositiveDistance(f64),
    #[error("ambient temperature {0} °C is not a finite value")]
    InvalidAmbientTemperature(f64),
    #[error("maximum voltage drop must be positive, got {0} %")]
    NonPositiveDropLimit(f64),
    #[error("measured weight must be positive, got {0} kg/100m")]
    NonPositiveWeight(f64),
}
