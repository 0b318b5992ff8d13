//! ---
//! ww_section: "02-sizing-compliance"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Ambient temperature derating factors per IEC 60364-5-52."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use crate::model::InsulationClass;

/// Ambient-temperature correction table, referenced to 30 °C in free air.
///
/// Breakpoints are sorted ascending and the factor at 30 °C is 1.0. The
/// lookup picks the smallest breakpoint at or above the requested
/// temperature; beyond the last breakpoint the last factor applies (the
/// table is never extrapolated).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeratingTable {
    pvc: Vec<(f64, f64)>,
    xlpe: Vec<(f64, f64)>,
}

impl Default for DeratingTable {
    fn default() -> Self {
        Self {
            pvc: vec![
                (30.0, 1.00),
                (35.0, 0.94),
                (40.0, 0.87),
                (45.0, 0.79),
                (50.0, 0.71),
            ],
            xlpe: vec![
                (30.0, 1.00),
                (35.0, 0.94),
                (40.0, 0.91),
                (45.0, 0.87),
                (50.0, 0.82),
            ],
        }
    }
}

impl DeratingTable {
    /// Factor for the smallest breakpoint at or above `ambient_c`.
    pub fn factor(&self, insulation: InsulationClass, ambient_c: f64) -> f64 {
        let rows = match insulation {
            InsulationClass::Pvc => &self.pvc,
            InsulationClass::Xlpe => &self.xlpe,
        };
        for (breakpoint, factor) in rows {
            if ambient_c <= *breakpoint {
                return *factor;
            }
        }
        // Hotter than the table covers: clamp to the last breakpoint.
        rows.last().map(|(_, factor)| *factor).unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_condition_is_unity() {
        let table = DeratingTable::default();
        assert_eq!(table.factor(InsulationClass::Pvc, 30.0), 1.0);
        assert_eq!(table.factor(InsulationClass::Xlpe, 25.0), 1.0);
    }

    #[test]
    fn lookup_rounds_up_to_the_next_breakpoint() {
        let table = DeratingTable::default();
        // 37 °C falls into the 40 °C band for both classes.
        assert_eq!(table.factor(InsulationClass::Pvc, 37.0), 0.87);
        assert_eq!(table.factor(InsulationClass::Xlpe, 37.0), 0.91);
        assert_eq!(table.factor(InsulationClass::Pvc, 40.0), 0.87);
    }

    #[test]
    fn beyond_fifty_degrees_clamps_to_the_last_band() {
        let table = DeratingTable::default();
        assert_eq!(table.factor(InsulationClass::Pvc, 58.0), 0.71);
        assert_eq!(table.factor(InsulationClass::Xlpe, 90.0), 0.82);
    }

    #[test]
    fn xlpe_tolerates_heat_better_than_pvc() {
        let table = DeratingTable::default();
        for ambient in [35.0, 40.0, 45.0, 50.0, 55.0] {
            assert!(
                table.factor(InsulationClass::Xlpe, ambient)
                    >= table.factor(InsulationClass::Pvc, ambient)
            );
        }
    }
}
