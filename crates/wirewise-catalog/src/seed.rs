//! ---
//! ww_section: "03-catalog-data"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Built-in conductor specification tables."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
use wirewise_engine::{ConductorSpec, InsulationClass, Material};

/// Copper BV (PVC single-core) ampacities in free air.
const COPPER_PVC: [(&str, f64); 7] = [
    ("1.5", 17.0),
    ("2.5", 24.0),
    ("4.0", 32.0),
    ("6.0", 40.0),
    ("10", 55.0),
    ("16", 75.0),
    ("25", 100.0),
];

/// Copper YJV (XLPE) ampacities.
const COPPER_XLPE: [(&str, f64); 11] = [
    ("1.5", 20.0),
    ("2.5", 28.0),
    ("4.0", 38.0),
    ("6.0", 49.0),
    ("10", 68.0),
    ("16", 91.0),
    ("25", 125.0),
    ("35", 155.0),
    ("50", 185.0),
    ("70", 240.0),
    ("95", 285.0),
];

/// Aluminium PVC ampacities, scaled at the usual ~0.78 of copper.
const ALUMINIUM_PVC: [(&str, f64); 6] = [
    ("2.5", 19.0),
    ("4.0", 25.0),
    ("6.0", 31.0),
    ("10", 43.0),
    ("16", 59.0),
    ("25", 78.0),
];

/// Reference copper weights per 100 m, the anti-fake baseline, keyed by
/// size and applied to every copper row regardless of insulation. Larger
/// sections are not covered; samples of those come back unverifiable.
const COPPER_WEIGHTS: [(&str, f64); 4] = [("1.5", 2.0), ("2.5", 3.1), ("4.0", 4.6), ("6.0", 6.8)];

fn weight_for(size: &str) -> Option<f64> {
    COPPER_WEIGHTS
        .iter()
        .find(|(label, _)| *label == size)
        .map(|(_, weight)| *weight)
}

/// All built-in rows, grouped by pair and ascending in ampacity.
pub fn conductor_specs() -> Vec<ConductorSpec> {
    let mut specs = Vec::new();
    for (size, ampacity) in COPPER_PVC {
        specs.push(ConductorSpec {
            material: Material::Copper,
            insulation: InsulationClass::Pvc,
            size: size.to_owned(),
            ampacity_a: ampacity,
            weight_per_100m_kg: weight_for(size),
        });
    }
    for (size, ampacity) in COPPER_XLPE {
        specs.push(ConductorSpec {
            material: Material::Copper,
            insulation: InsulationClass::Xlpe,
            size: size.to_owned(),
            ampacity_a: ampacity,
            weight_per_100m_kg: weight_for(size),
        });
    }
    for (size, ampacity) in ALUMINIUM_PVC {
        specs.push(ConductorSpec {
            material: Material::Aluminium,
            insulation: InsulationClass::Pvc,
            size: size.to_owned(),
            ampacity_a: ampacity,
            weight_per_100m_kg: None,
        });
    }
    specs
}
