//! ---
//! ww_section: "02-sizing-compliance"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Domain model for cable sizing and counterfeit checks."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

/// Conductor material. Wire names match the catalog feed (`cu`/`al`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    #[serde(rename = "cu")]
    Copper,
    #[serde(rename = "al")]
    Aluminium,
}

impl Material {
    /// Resistivity in ohm·mm²/m at the reference conductor temperature.
    pub fn resistivity(&self) -> f64 {
        match self {
            Material::Copper => 0.0175,
            Material::Aluminium => 0.028,
        }
    }
}

/// Insulation class. `bv` is PVC single-core, `yjv` is XLPE.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InsulationClass {
    #[serde(rename = "bv")]
    Pvc,
    #[serde(rename = "yjv")]
    Xlpe,
}

/// Supply voltage class of the branch circuit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VoltageClass {
    #[serde(rename = "220v")]
    SinglePhase220,
    #[serde(rename = "380v")]
    ThreePhase380,
}

impl VoltageClass {
    pub fn base_voltage(&self) -> f64 {
        match self {
            VoltageClass::SinglePhase220 => 220.0,
            VoltageClass::ThreePhase380 => 380.0,
        }
    }

    /// Circuit factor applied to the resistive drop: 2 for the single-phase
    /// loop, sqrt(3) for a balanced three-phase run.
    pub fn drop_factor(&self) -> f64 {
        match self {
            VoltageClass::SinglePhase220 => 2.0,
            VoltageClass::ThreePhase380 => 3.0f64.sqrt(),
        }
    }
}

/// Unit of the `power` field in a [`SizingRequest`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PowerUnit {
    Kw,
    Hp,
    Amps,
}

/// One catalog row: a conductor size with its rated ampacity and, for copper
/// sizes covered by the anti-fake table, the reference weight per 100 m.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConductorSpec {
    pub material: Material,
    pub insulation: InsulationClass,
    /// Cross-section label in mm², kept as a string because catalog feeds
    /// use decimal labels ("2.5", "10") and occasionally malformed ones.
    pub size: String,
    pub ampacity_a: f64,
    #[serde(default)]
    pub weight_per_100m_kg: Option<f64>,
}

fn default_ambient_temperature() -> f64 {
    40.0
}

fn default_max_voltage_drop() -> f64 {
    5.0
}

fn default_material() -> Material {
    Material::Copper
}

fn default_insulation() -> InsulationClass {
    InsulationClass::Xlpe
}

/// Sizing request as received on the wire. Field names follow the public
/// API payload; ambient temperature defaults to the 40 °C hot-climate
/// baseline and voltage drop to the 5 % branch-circuit limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizingRequest {
    pub power: f64,
    pub power_unit: PowerUnit,
    #[serde(rename = "voltage_type")]
    pub voltage: VoltageClass,
    #[serde(rename = "distance")]
    pub distance_m: f64,
    #[serde(default = "default_material")]
    pub material: Material,
    #[serde(rename = "cable_type", default = "default_insulation")]
    pub insulation: InsulationClass,
    #[serde(rename = "temperature", default = "default_ambient_temperature")]
    pub ambient_temperature_c: f64,
    #[serde(rename = "max_voltage_drop", default = "default_max_voltage_drop")]
    pub max_voltage_drop_percent: f64,
}

/// Why the selector settled on the size it did.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum SelectionReason {
    /// Smallest thermally adequate size also met the drop limit.
    NominalFit,
    /// Ambient derating raised the required nameplate ampacity but no
    /// voltage-drop upgrade was needed.
    TemperatureDerated,
    /// Thermally adequate sizes were skipped because the run length pushed
    /// the voltage drop over the limit.
    VoltageDropUpgrade { steps: u32 },
    /// No catalog entry satisfies both constraints.
    OutOfRange,
}

/// Size label reported when the catalog is exhausted.
pub const OUT_OF_RANGE_LABEL: &str = "Out of Range";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizingResult {
    pub current_amps: f64,
    pub selected_size: String,
    pub voltage_drop_percent: f64,
    pub breaker_rating_a: u32,
    /// False when no entry of the standard breaker sequence covers the load
    /// and the raw margined value is reported instead.
    pub breaker_is_standard: bool,
    pub upgrade_count: u32,
    /// Rated ampacity multiplied by the derating factor: the real-world
    /// carrying capacity at the requested ambient temperature.
    pub safe_ampacity_a: f64,
    pub reason: SelectionReason,
}

impl SizingResult {
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.reason, SelectionReason::OutOfRange)
    }
}

/// Risk tier assigned by the counterfeit classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightCheckRequest {
    pub nominal_size: String,
    #[serde(rename = "measured_weight")]
    pub measured_weight_kg: f64,
    #[serde(default = "default_material")]
    pub material: Material,
    #[serde(rename = "cable_type", default = "default_pvc")]
    pub insulation: InsulationClass,
}

fn default_pvc() -> InsulationClass {
    InsulationClass::Pvc
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightCheckResult {
    pub passed: bool,
    /// Reference weight per 100 m, zero when the catalog has no entry.
    pub standard_weight_kg: f64,
    pub diff_percent: f64,
    pub risk: RiskLevel,
    /// True when no reference weight exists for the nominal size, so the
    /// sample is unverifiable rather than proven fake.
    pub specification_missing: bool,
}

/// Read-only catalog queries the engine consumes from its environment.
///
/// `lookup_catalog` must return rows sorted ascending by rated ampacity with
/// unique size labels per (material, insulation) pair; the selector relies on
/// that ordering for its minimality guarantee.
pub trait CatalogProvider: Send + Sync {
    fn lookup_catalog(&self, material: Material, insulation: InsulationClass)
        -> Vec<ConductorSpec>;

    fn lookup_spec(
        &self,
        size: &str,
        insulation: InsulationClass,
        material: Material,
    ) -> Option<ConductorSpec>;
}

/// Round to two decimals, the precision every result field is reported at.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
