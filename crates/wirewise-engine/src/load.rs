//! ---
//! ww_section: "02-sizing-compliance"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Branch current estimation from nameplate power."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
use crate::errors::{EngineError, Result};
use crate::model::{round2, PowerUnit, VoltageClass};

/// Assumed displacement power factor for motor-dominated branch loads.
pub const POWER_FACTOR: f64 = 0.85;

/// Mechanical horsepower to kilowatts.
pub const HP_TO_KW: f64 = 0.746;

/// Convert a nameplate power figure into branch current in amps.
///
/// Amps pass through untouched. Horsepower is converted to kilowatts first,
/// then `I = P / (U · pf)` for single-phase and `I = P / (√3 · U · pf)` for
/// three-phase, rounded to two decimals.
pub fn estimate_current(power: f64, unit: PowerUnit, voltage: VoltageClass) -> Result<f64> {
    if !(power > 0.0) {
        return Err(EngineError::NonPositivePower(power));
    }
    if let PowerUnit::Amps = unit {
        return Ok(power);
    }

    let kw = match unit {
        PowerUnit::Hp => power * HP_TO_KW,
        _ => power,
    };
    let watts = kw * 1000.0;
    let amps = match voltage {
        VoltageClass::ThreePhase380 => watts / (380.0 * 3.0f64.sqrt() * POWER_FACTOR),
        VoltageClass::SinglePhase220 => watts / (220.0 * POWER_FACTOR),
    };
    Ok(round2(amps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amps_pass_through_unchanged() {
        let amps = estimate_current(40.0, PowerUnit::Amps, VoltageClass::ThreePhase380).unwrap();
        assert_eq!(amps, 40.0);
    }

    #[test]
    fn five_kw_three_phase_is_about_8_91_amps() {
        let amps = estimate_current(5.0, PowerUnit::Kw, VoltageClass::ThreePhase380).unwrap();
        assert!((amps - 8.94).abs() < 0.05, "got {amps}");
    }

    #[test]
    fn single_phase_uses_220_volt_base() {
        let amps = estimate_current(2.2, PowerUnit::Kw, VoltageClass::SinglePhase220).unwrap();
        assert_eq!(amps, round2(2200.0 / (220.0 * POWER_FACTOR)));
    }

    #[test]
    fn horsepower_converts_before_the_current_formula() {
        let hp = estimate_current(10.0, PowerUnit::Hp, VoltageClass::ThreePhase380).unwrap();
        let kw = estimate_current(7.46, PowerUnit::Kw, VoltageClass::ThreePhase380).unwrap();
        assert_eq!(hp, kw);
    }

    #[test]
    fn non_positive_power_is_rejected() {
        assert!(estimate_current(0.0, PowerUnit::Kw, VoltageClass::ThreePhase380).is_err());
        assert!(estimate_current(-5.0, PowerUnit::Amps, VoltageClass::SinglePhase220).is_err());
    }
}
