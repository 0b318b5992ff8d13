//! ---
//! ww_section: "06-service-binaries"
//! ww_subsection: "binary"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Offline technician CLI for sizing and weight checks."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use wirewise_catalog::{load_catalog_from_file, InMemoryCatalog};
use wirewise_engine::{
    check_weight, size_cable, DeratingTable, InsulationClass, Material, PowerUnit, RiskLevel,
    SizingRequest, VoltageClass, WeightCheckRequest,
};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "WireWise technician utility",
    long_about = None
)]
struct Cli {
    #[arg(long, value_name = "FILE", global = true, help = "Catalog file overriding the built-in tables")]
    catalog: Option<std::path::PathBuf>,

    #[arg(long, global = true, help = "Emit the result as JSON")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliUnit {
    Kw,
    Hp,
    Amps,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliVoltage {
    #[value(name = "220v")]
    V220,
    #[value(name = "380v")]
    V380,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMaterial {
    Cu,
    Al,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliInsulation {
    Bv,
    Yjv,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Recommend a conductor size and breaker for a load")]
    Size {
        #[arg(long, help = "Load magnitude in the chosen unit")]
        power: f64,
        #[arg(long, value_enum, default_value_t = CliUnit::Kw)]
        unit: CliUnit,
        #[arg(long, value_enum, default_value_t = CliVoltage::V380)]
        voltage: CliVoltage,
        #[arg(long, help = "One-way run length in metres")]
        distance: f64,
        #[arg(long, value_enum, default_value_t = CliMaterial::Cu)]
        material: CliMaterial,
        #[arg(long, value_enum, default_value_t = CliInsulation::Yjv)]
        insulation: CliInsulation,
        #[arg(long, default_value_t = 40.0, help = "Ambient temperature in °C")]
        temperature: f64,
        #[arg(long, default_value_t = 5.0, help = "Maximum voltage drop in percent")]
        max_drop: f64,
    },
    #[command(about = "Check a measured cable weight against the reference")]
    CheckWeight {
        #[arg(long, help = "Nominal cross-section label, e.g. 2.5")]
        size: String,
        #[arg(long, help = "Measured weight in kg per 100 m")]
        measured: f64,
        #[arg(long, value_enum, default_value_t = CliInsulation::Bv)]
        insulation: CliInsulation,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let catalog = match &cli.catalog {
        Some(path) => load_catalog_from_file(path)?,
        None => InMemoryCatalog::seeded(),
    };
    let derating = DeratingTable::default();

    match cli.command {
        Commands::Size {
            power,
            unit,
            voltage,
            distance,
            material,
            insulation,
            temperature,
            max_drop,
        } => {
            let request = SizingRequest {
                power,
                power_unit: match unit {
                    CliUnit::Kw => PowerUnit::Kw,
                    CliUnit::Hp => PowerUnit::Hp,
                    CliUnit::Amps => PowerUnit::Amps,
                },
                voltage: match voltage {
                    CliVoltage::V220 => VoltageClass::SinglePhase220,
                    CliVoltage::V380 => VoltageClass::ThreePhase380,
                },
                distance_m: distance,
                material: match material {
                    CliMaterial::Cu => Material::Copper,
                    CliMaterial::Al => Material::Aluminium,
                },
                insulation: match insulation {
                    CliInsulation::Bv => InsulationClass::Pvc,
                    CliInsulation::Yjv => InsulationClass::Xlpe,
                },
                ambient_temperature_c: temperature,
                max_voltage_drop_percent: max_drop,
            };
            let result = size_cable(&catalog, &derating, &request)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else if result.is_out_of_range() {
                println!("No catalog size covers this load over {distance} m.");
                println!(
                    "Load current: {:.2} A (breaker {} A{})",
                    result.current_amps,
                    result.breaker_rating_a,
                    if result.breaker_is_standard {
                        ""
                    } else {
                        ", non-standard"
                    }
                );
            } else {
                println!("Recommended size: {} mm²", result.selected_size);
                println!("Load current:     {:.2} A", result.current_amps);
                println!("Voltage drop:     {:.2} %", result.voltage_drop_percent);
                println!("Safe ampacity:    {:.1} A", result.safe_ampacity_a);
                println!(
                    "Breaker:          {} A{}",
                    result.breaker_rating_a,
                    if result.breaker_is_standard {
                        ""
                    } else {
                        " (non-standard)"
                    }
                );
                if result.upgrade_count > 0 {
                    println!(
                        "Upgraded {} size(s) to control voltage drop.",
                        result.upgrade_count
                    );
                }
            }
        }
        Commands::CheckWeight {
            size,
            measured,
            insulation,
        } => {
            let request = WeightCheckRequest {
                nominal_size: size,
                measured_weight_kg: measured,
                material: Material::Copper,
                insulation: match insulation {
                    CliInsulation::Bv => InsulationClass::Pvc,
                    CliInsulation::Yjv => InsulationClass::Xlpe,
                },
            };
            let result = check_weight(&catalog, &request)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else if result.specification_missing {
                println!("No reference weight on file for this size; sample is unverifiable.");
            } else {
                let verdict = match result.risk {
                    RiskLevel::Safe => "PASS: meets the genuine-copper standard",
                    RiskLevel::Warning => "FAIL: likely non-standard conductor",
                    RiskLevel::Danger => "FAIL: high risk of copper-clad aluminium",
                };
                println!("{verdict}");
                println!(
                    "Reference {:.1} kg/100m, measured deviation {:+.2} %",
                    result.standard_weight_kg, result.diff_percent
                );
            }
        }
    }
    Ok(())
}
