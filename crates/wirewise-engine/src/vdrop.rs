//! ---
//! ww_section: "02-sizing-compliance"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Resistive voltage drop over a cable run."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
use crate::model::{Material, VoltageClass};

/// Sentinel drop returned for a size label that does not parse as mm².
///
/// A malformed catalog row is treated as an infeasible candidate so the
/// selector skips it instead of aborting the whole computation.
pub const INFEASIBLE_DROP_PERCENT: f64 = 999.0;

/// Percentage voltage drop for `current_a` over `distance_m` of the given
/// conductor size.
///
/// `drop% = (factor · I · L · ρ / A) / Vbase · 100` with factor 2 / √3 and
/// base 220 V / 380 V depending on the phase configuration.
pub fn voltage_drop_percent(
    current_a: f64,
    distance_m: f64,
    size_label: &str,
    material: Material,
    voltage: VoltageClass,
) -> f64 {
    let Ok(size_mm2) = size_label.trim().parse::<f64>() else {
        return INFEASIBLE_DROP_PERCENT;
    };
    if size_mm2 <= 0.0 {
        return INFEASIBLE_DROP_PERCENT;
    }

    let drop_v = voltage.drop_factor() * current_a * distance_m * material.resistivity() / size_mm2;
    (drop_v / voltage.base_voltage()) * 100.0
}
