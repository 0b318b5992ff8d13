//! ---
//! ww_section: "03-catalog-data"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Conductor catalog provider and loading utilities."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
//! Immutable conductor catalog. Loaded once at process start (from the
//! built-in seed tables or a JSON/YAML file) and shared read-only with the
//! engine for the lifetime of the process.

pub mod io;
pub mod memory;
pub mod seed;

use thiserror::Error;

pub use io::load_catalog_from_file;
pub use memory::InMemoryCatalog;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate size '{size}' for ({material:?}, {insulation:?})")]
    DuplicateSize {
        material: wirewise_engine::Material,
        insulation: wirewise_engine::InsulationClass,
        size: String,
    },
    #[error("conductor '{0}' has a non-positive rated ampacity")]
    NonPositiveAmpacity(String),
    #[error("catalog file is empty")]
    Empty,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    SerializationFailed(#[from] serde_json::Error),
    #[error("yaml serialization error: {0}")]
    YamlSerializationFailed(#[from] serde_yaml::Error),
}
