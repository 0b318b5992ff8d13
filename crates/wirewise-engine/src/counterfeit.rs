//! ---
//! ww_section: "02-sizing-compliance"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Counterfeit detection from measured conductor weight."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
use tracing::debug;

use crate::errors::{EngineError, Result};
use crate::model::{
    round2, CatalogProvider, Material, RiskLevel, WeightCheckRequest, WeightCheckResult,
};

/// Measured/reference ratio at or above which a sample passes as genuine.
pub const SAFE_RATIO: f64 = 0.95;

/// Below [`SAFE_RATIO`] but at or above this, the sample is likely
/// non-standard; below it, likely copper-clad aluminium or under-gauge.
pub const WARNING_RATIO: f64 = 0.85;

/// Classify a measured per-100 m weight against the catalog reference.
///
/// Reference weights exist for copper only; aluminium samples and sizes
/// without a reference come back as "specification missing" at Warning tier,
/// because the sample is unverifiable rather than proven fake.
pub fn check_weight(
    catalog: &dyn CatalogProvider,
    request: &WeightCheckRequest,
) -> Result<WeightCheckResult> {
    if !(request.measured_weight_kg > 0.0) {
        return Err(EngineError::NonPositiveWeight(request.measured_weight_kg));
    }

    let reference = match request.material {
        Material::Copper => catalog
            .lookup_spec(&request.nominal_size, request.insulation, Material::Copper)
            .and_then(|spec| spec.weight_per_100m_kg),
        Material::Aluminium => None,
    };

    let Some(standard_weight) = reference.filter(|weight| *weight > 0.0) else {
        debug!(size = %request.nominal_size, "no reference weight on file");
        return Ok(WeightCheckResult {
            passed: false,
            standard_weight_kg: 0.0,
            diff_percent: 0.0,
            risk: RiskLevel::Warning,
            specification_missing: true,
        });
    };

    let ratio = request.measured_weight_kg / standard_weight;
    let risk = if ratio >= SAFE_RATIO {
        RiskLevel::Safe
    } else if ratio >= WARNING_RATIO {
        RiskLevel::Warning
    } else {
        RiskLevel::Danger
    };

    Ok(WeightCheckResult {
        passed: risk == RiskLevel::Safe,
        standard_weight_kg: standard_weight,
        diff_percent: round2((ratio - 1.0) * 100.0),
        risk,
        specification_missing: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConductorSpec, InsulationClass};

    struct OneRow(Option<f64>);

    impl CatalogProvider for OneRow {
        fn lookup_catalog(&self, _: Material, _: InsulationClass) -> Vec<ConductorSpec> {
            Vec::new()
        }

        fn lookup_spec(
            &self,
            size: &str,
            insulation: InsulationClass,
            material: Material,
        ) -> Option<ConductorSpec> {
            (size == "2.5" && material == Material::Copper).then(|| ConductorSpec {
                material,
                insulation,
                size: size.to_owned(),
                ampacity_a: 24.0,
                weight_per_100m_kg: self.0,
            })
        }
    }

    fn request(measured: f64) -> WeightCheckRequest {
        WeightCheckRequest {
            nominal_size: "2.5".to_owned(),
            measured_weight_kg: measured,
            material: Material::Copper,
            insulation: InsulationClass::Pvc,
        }
    }

    #[test]
    fn underweight_sample_is_flagged_non_standard() {
        // 2.9 kg measured against the 3.1 kg reference: ratio 0.935.
        let result = check_weight(&OneRow(Some(3.1)), &request(2.9)).unwrap();
        assert!(!result.passed);
        assert_eq!(result.risk, RiskLevel::Warning);
        assert_eq!(result.standard_weight_kg, 3.1);
        assert_eq!(result.diff_percent, -6.45);
    }

    #[test]
    fn tier_boundaries_are_inclusive_on_the_safe_side() {
        let reference = OneRow(Some(2.0));
        let safe = check_weight(&reference, &request(2.0 * 0.95)).unwrap();
        assert_eq!(safe.risk, RiskLevel::Safe);
        assert!(safe.passed);

        let warning = check_weight(&reference, &request(2.0 * 0.85)).unwrap();
        assert_eq!(warning.risk, RiskLevel::Warning);
        assert!(!warning.passed);

        let danger = check_weight(&reference, &request(2.0 * 0.8499)).unwrap();
        assert_eq!(danger.risk, RiskLevel::Danger);
        assert!(!danger.passed);
    }

    #[test]
    fn missing_reference_is_unverifiable_not_fake() {
        let result = check_weight(&OneRow(None), &request(2.9)).unwrap();
        assert!(result.specification_missing);
        assert_eq!(result.risk, RiskLevel::Warning);
        assert!(!result.passed);
        assert_eq!(result.standard_weight_kg, 0.0);
    }

    #[test]
    fn aluminium_samples_are_never_verified() {
        let mut req = request(2.9);
        req.material = Material::Aluminium;
        let result = check_weight(&OneRow(Some(3.1)), &req).unwrap();
        assert!(result.specification_missing);
    }

    #[test]
    fn non_positive_measurement_is_rejected() {
        assert!(check_weight(&OneRow(Some(3.1)), &request(0.0)).is_err());
    }
}
