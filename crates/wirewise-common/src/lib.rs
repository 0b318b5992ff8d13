//! ---
//! ww_section: "01-shared-runtime"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Shared primitives and utilities for the service runtime."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
//! Shared runtime primitives for the WireWise workspace: configuration
//! loading, tracing initialisation, and Prometheus service metrics.

pub mod config;
pub mod logging;
pub mod metrics;

pub use config::{
    ApiConfig, AppConfig, CatalogConfig, LoadedAppConfig, LoggingConfig, MarketConfig,
    MetricsConfig,
};
pub use logging::{init_tracing, LogFormat};
pub use metrics::{new_registry, ServiceMetrics, SharedRegistry};
