//! ---
//! ww_section: "01-shared-runtime"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Prometheus service metrics."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
use std::sync::Arc;

use anyhow::Result;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};

/// Shared registry type used across the workspace.
pub type SharedRegistry = Arc<Registry>;

/// Produce a new shared registry.
pub fn new_registry() -> SharedRegistry {
    Arc::new(Registry::new())
}

/// Counters and histograms recorded by the request path.
#[derive(Clone)]
pub struct ServiceMetrics {
    registry: SharedRegistry,
    pub sizing_requests_total: IntCounterVec,
    pub out_of_range_total: IntCounter,
    pub weight_checks_total: IntCounterVec,
    pub market_refreshes_total: IntCounter,
    pub market_fallbacks_total: IntCounter,
    pub sizing_current_amps: Histogram,
}

impl ServiceMetrics {
    pub fn new(registry: SharedRegistry) -> Result<Self> {
        let sizing_requests_total = IntCounterVec::new(
            Opts::new(
                "wirewise_sizing_requests_total",
                "Sizing requests processed, labelled by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(sizing_requests_total.clone()))?;

        let out_of_range_total = IntCounter::with_opts(Opts::new(
            "wirewise_sizing_out_of_range_total",
            "Sizing requests whose load exceeded every catalog size",
        ))?;
        registry.register(Box::new(out_of_range_total.clone()))?;

        let weight_checks_total = IntCounterVec::new(
            Opts::new(
                "wirewise_weight_checks_total",
                "Counterfeit weight checks, labelled by risk tier",
            ),
            &["risk"],
        )?;
        registry.register(Box::new(weight_checks_total.clone()))?;

        let market_refreshes_total = IntCounter::with_opts(Opts::new(
            "wirewise_market_refreshes_total",
            "Copper quote refresh attempts",
        ))?;
        registry.register(Box::new(market_refreshes_total.clone()))?;

        let market_fallbacks_total = IntCounter::with_opts(Opts::new(
            "wirewise_market_fallbacks_total",
            "Quote refreshes that fell back to a simulated price",
        ))?;
        registry.register(Box::new(market_fallbacks_total.clone()))?;

        let sizing_current_amps = Histogram::with_opts(
            HistogramOpts::new(
                "wirewise_sizing_current_amps",
                "Distribution of computed branch currents",
            )
            .buckets(prometheus::exponential_buckets(1.0, 2.0, 10)?),
        )?;
        registry.register(Box::new(sizing_current_amps.clone()))?;

        Ok(Self {
            registry,
            sizing_requests_total,
            out_of_range_total,
            weight_checks_total,
            market_refreshes_total,
            market_fallbacks_total,
            sizing_current_amps,
        })
    }

    pub fn registry(&self) -> SharedRegistry {
        self.registry.clone()
    }
}
