//! ---
//! ww_section: "03-catalog-data"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "In-memory catalog provider implementation."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
use std::collections::HashSet;

use tracing::info;
use wirewise_engine::{CatalogProvider, ConductorSpec, InsulationClass, Material};

use crate::{seed, CatalogError, Result};

/// Immutable catalog held in memory, rows kept sorted ascending by rated
/// ampacity within each (material, insulation) pair.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    specs: Vec<ConductorSpec>,
}

impl InMemoryCatalog {
    /// Catalog preloaded with the built-in specification tables.
    pub fn seeded() -> Self {
        let catalog = Self::from_specs(seed::conductor_specs())
            .expect("built-in seed tables are well-formed");
        info!(rows = catalog.specs.len(), "seed catalog loaded");
        catalog
    }

    /// Build a catalog from arbitrary rows, enforcing the structural
    /// invariants the selector depends on: positive ampacities and unique
    /// size labels per pair. Rows are sorted here so callers do not have to
    /// pre-sort.
    pub fn from_specs(mut specs: Vec<ConductorSpec>) -> Result<Self> {
        if specs.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen: HashSet<(Material, InsulationClass, String)> = HashSet::new();
        for spec in &specs {
            if !(spec.ampacity_a > 0.0) {
                return Err(CatalogError::NonPositiveAmpacity(spec.size.clone()));
            }
            if !seen.insert((spec.material, spec.insulation, spec.size.clone())) {
                return Err(CatalogError::DuplicateSize {
                    material: spec.material,
                    insulation: spec.insulation,
                    size: spec.size.clone(),
                });
            }
        }

        // Stable sort: equal ampacities keep their feed order, which is the
        // documented tie-break.
        specs.sort_by(|a, b| {
            a.ampacity_a
                .partial_cmp(&b.ampacity_a)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(Self { specs })
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn lookup_catalog(
        &self,
        material: Material,
        insulation: InsulationClass,
    ) -> Vec<ConductorSpec> {
        self.specs
            .iter()
            .filter(|spec| spec.material == material && spec.insulation == insulation)
            .cloned()
            .collect()
    }

    fn lookup_spec(
        &self,
        size: &str,
        insulation: InsulationClass,
        material: Material,
    ) -> Option<ConductorSpec> {
        self.specs
            .iter()
            .find(|spec| {
                spec.size == size && spec.insulation == insulation && spec.material == material
            })
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_catalog_pairs_are_sorted_ascending() {
        let catalog = InMemoryCatalog::seeded();
        for material in [Material::Copper, Material::Aluminium] {
            for insulation in [InsulationClass::Pvc, InsulationClass::Xlpe] {
                let rows = catalog.lookup_catalog(material, insulation);
                for pair in rows.windows(2) {
                    assert!(pair[0].ampacity_a <= pair[1].ampacity_a);
                }
            }
        }
    }

    #[test]
    fn seeded_catalog_has_reference_weights_for_small_copper_pvc() {
        let catalog = InMemoryCatalog::seeded();
        let spec = catalog
            .lookup_spec("2.5", InsulationClass::Pvc, Material::Copper)
            .unwrap();
        assert_eq!(spec.weight_per_100m_kg, Some(3.1));
        let large = catalog
            .lookup_spec("25", InsulationClass::Pvc, Material::Copper)
            .unwrap();
        assert_eq!(large.weight_per_100m_kg, None);
    }

    #[test]
    fn copper_weights_cover_both_insulation_classes() {
        // The anti-fake baseline is keyed by size alone, so a YJV roll of
        // "2.5" copper is verifiable too.
        let catalog = InMemoryCatalog::seeded();
        let spec = catalog
            .lookup_spec("2.5", InsulationClass::Xlpe, Material::Copper)
            .unwrap();
        assert_eq!(spec.weight_per_100m_kg, Some(3.1));

        let result = wirewise_engine::check_weight(
            &catalog,
            &wirewise_engine::WeightCheckRequest {
                nominal_size: "2.5".to_owned(),
                measured_weight_kg: 2.9,
                material: Material::Copper,
                insulation: InsulationClass::Xlpe,
            },
        )
        .unwrap();
        assert!(!result.specification_missing);
        assert_eq!(result.risk, wirewise_engine::RiskLevel::Warning);
    }

    #[test]
    fn duplicate_sizes_within_a_pair_are_rejected() {
        let mut specs = seed::conductor_specs();
        specs.push(specs[0].clone());
        let err = InMemoryCatalog::from_specs(specs).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSize { .. }));
    }

    #[test]
    fn same_size_across_pairs_is_allowed() {
        // "2.5" exists for copper PVC, copper XLPE, and aluminium PVC.
        let catalog = InMemoryCatalog::seeded();
        assert!(catalog
            .lookup_spec("2.5", InsulationClass::Xlpe, Material::Copper)
            .is_some());
        assert!(catalog
            .lookup_spec("2.5", InsulationClass::Pvc, Material::Aluminium)
            .is_some());
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            InMemoryCatalog::from_specs(Vec::new()).unwrap_err(),
            CatalogError::Empty
        ));
    }
}
