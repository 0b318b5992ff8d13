//! ---
//! ww_section: "03-catalog-data"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Catalog file loading (JSON and YAML)."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
use std::{fs, path::Path};

use tracing::info;
use wirewise_engine::ConductorSpec;

use crate::{memory::InMemoryCatalog, CatalogError, Result};

/// Load a catalog from a JSON or YAML file holding a list of conductor
/// specs. The format is sniffed from the first non-blank character, the same
/// way model files are handled elsewhere in the workspace.
pub fn load_catalog_from_file(path: impl AsRef<Path>) -> Result<InMemoryCatalog> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let specs: Vec<ConductorSpec> = if data.trim_start().starts_with(['[', '{']) {
        serde_json::from_str(&data)?
    } else {
        serde_yaml::from_str(&data).map_err(CatalogError::YamlSerializationFailed)?
    };
    let catalog = InMemoryCatalog::from_specs(specs)?;
    info!(path = %path.display(), rows = catalog.len(), "catalog file loaded");
    Ok(catalog)
}
