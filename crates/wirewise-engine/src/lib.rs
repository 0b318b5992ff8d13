//! ---
//! ww_section: "02-sizing-compliance"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Cable sizing and compliance engine for WireWise."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
//! Pure, synchronous sizing pipeline: load current estimation, ambient
//! derating, dual-gate conductor selection, breaker rating, and the
//! counterfeit weight classifier. The catalog is injected through
//! [`CatalogProvider`]; every computation is stateless over it.

pub mod breaker;
pub mod counterfeit;
pub mod derating;
pub mod errors;
pub mod load;
pub mod model;
pub mod selector;
pub mod vdrop;

use tracing::info;

pub use breaker::{select_breaker, BreakerRating, SAFETY_MARGIN, STANDARD_RATINGS_A};
pub use counterfeit::check_weight;
pub use derating::DeratingTable;
pub use errors::{EngineError, Result};
pub use model::{
    CatalogProvider, ConductorSpec, InsulationClass, Material, PowerUnit, RiskLevel,
    SelectionReason, SizingRequest, SizingResult, VoltageClass, WeightCheckRequest,
    WeightCheckResult, OUT_OF_RANGE_LABEL,
};
pub use vdrop::INFEASIBLE_DROP_PERCENT;

/// Run the full sizing pipeline for one request.
///
/// Business-rule misses (no feasible conductor, no standard breaker frame)
/// are reported in the result, never as errors; only malformed input is
/// rejected.
pub fn size_cable(
    catalog: &dyn CatalogProvider,
    derating: &DeratingTable,
    request: &SizingRequest,
) -> Result<SizingResult> {
    let current_amps = load::estimate_current(request.power, request.power_unit, request.voltage)?;

    let selection = selector::select_cable(
        catalog,
        derating,
        current_amps,
        request.material,
        request.insulation,
        request.distance_m,
        request.voltage,
        request.ambient_temperature_c,
        request.max_voltage_drop_percent,
    )?;

    let breaker = select_breaker(current_amps);

    info!(
        current_amps,
        size = %selection.size,
        breaker_a = breaker.rating_a,
        reason = ?selection.reason,
        "sizing request completed"
    );

    Ok(SizingResult {
        current_amps,
        selected_size: selection.size,
        voltage_drop_percent: selection.voltage_drop_percent,
        breaker_rating_a: breaker.rating_a,
        breaker_is_standard: breaker.standard,
        upgrade_count: selection.upgrade_count,
        safe_ampacity_a: selection.safe_ampacity_a,
        reason: selection.reason,
    })
}
