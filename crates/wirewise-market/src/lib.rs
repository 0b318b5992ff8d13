//! ---
//! ww_section: "04-market-data"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Copper market quote feed with fallback and refresh job."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
//! Best-effort copper price quotes. One fetch attempt per refresh; any
//! failure falls back to a simulated quote so the API always has something
//! to show. Feed resilience is explicitly out of scope.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use wirewise_common::{MarketConfig, ServiceMetrics};

/// Reference LME price used when the whole feed is unreachable, USD per ton.
const FALLBACK_USD_PER_TON: f64 = 9240.0;

pub type Result<T> = std::result::Result<T, MarketError>;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("price feed payload did not contain a parseable price")]
    UnparseableFeed,
}

/// One currency leg of a quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteLeg {
    pub source: String,
    pub symbol: String,
    pub price: f64,
    /// Day-on-day change in percent.
    pub change: f64,
}

/// Copper quote in both currencies, as served by the market endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CopperQuote {
    pub cny: QuoteLeg,
    pub usd: QuoteLeg,
    pub exchange_rate: f64,
    pub updated: DateTime<Utc>,
    /// True when this quote came from the simulated fallback path.
    pub simulated: bool,
}

/// Cache shared between the refresh job and the API handlers.
pub type SharedQuote = Arc<RwLock<Option<CopperQuote>>>;

pub fn new_shared_quote() -> SharedQuote {
    Arc::new(RwLock::new(None))
}

/// Fetches quotes from the configured exchange feed.
#[derive(Debug, Clone)]
pub struct MarketFeed {
    client: reqwest::Client,
    config: MarketConfig,
}

impl MarketFeed {
    pub fn new(config: MarketConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Fetch a quote, falling back to a simulated one on any failure.
    /// Never errors; the `simulated` flag tells the two paths apart.
    pub async fn current_quote(&self) -> CopperQuote {
        match self.fetch_live().await {
            Ok(quote) => quote,
            Err(err) => {
                warn!(error = %err, "copper feed unavailable, serving simulated quote");
                self.fallback_quote()
            }
        }
    }

    async fn fetch_live(&self) -> Result<CopperQuote> {
        let body = self
            .client
            .get(&self.config.feed_url)
            .header(reqwest::header::REFERER, "https://finance.sina.com.cn/")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let cny_per_ton = parse_feed_price(&body).ok_or(MarketError::UnparseableFeed)?;
        let rate = self.fetch_rate().await.unwrap_or_else(|err| {
            debug!(error = %err, "rate endpoint unavailable, using fallback rate");
            self.config.fallback_usd_cny
        });
        Ok(self.build_quote(cny_per_ton, rate, "SHFE", false))
    }

    async fn fetch_rate(&self) -> Result<f64> {
        #[derive(Deserialize)]
        struct RateResponse {
            rates: std::collections::HashMap<String, f64>,
        }
        let response: RateResponse = self
            .client
            .get(&self.config.rate_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response
            .rates
            .get("CNY")
            .copied()
            .ok_or(MarketError::UnparseableFeed)
    }

    /// Simulated quote centred on the reference LME price with a little
    /// jitter, matching what the field app used before the feed existed.
    fn fallback_quote(&self) -> CopperQuote {
        let mut rng = rand::thread_rng();
        let usd = FALLBACK_USD_PER_TON + rng.gen_range(-50.0..=50.0);
        let rate = self.config.fallback_usd_cny;
        let mut quote = self.build_quote(usd * rate, rate, "SHFE (simulated)", true);
        quote.usd.source = "LME (simulated)".to_owned();
        quote
    }

    fn build_quote(
        &self,
        cny_per_ton: f64,
        rate: f64,
        source: &str,
        simulated: bool,
    ) -> CopperQuote {
        let mut rng = rand::thread_rng();
        let change = (rng.gen_range(-1.5..=1.5f64) * 100.0).round() / 100.0;
        let usd_per_ton = cny_per_ton / rate;
        CopperQuote {
            cny: QuoteLeg {
                source: source.to_owned(),
                symbol: "¥".to_owned(),
                price: (cny_per_ton * 100.0).round() / 100.0,
                change,
            },
            usd: QuoteLeg {
                source: format!("Calculated (1:{rate:.2})"),
                symbol: "$".to_owned(),
                price: (usd_per_ton * 100.0).round() / 100.0,
                change,
            },
            exchange_rate: (rate * 10_000.0).round() / 10_000.0,
            updated: Utc::now(),
            simulated,
        }
    }
}

/// Extract the price from a sina-style futures payload:
/// `var hq_str_shfe_cu0="沪铜连续,74690.0,74900.0,…";`. The first
/// comma-separated field that parses as a price above 100 CNY/ton wins,
/// which skips the non-numeric contract name.
fn parse_feed_price(body: &str) -> Option<f64> {
    let quoted = body.split('"').nth(1)?;
    quoted
        .split(',')
        .filter_map(|field| field.trim().parse::<f64>().ok())
        .find(|value| *value > 100.0)
}

/// Handle to the periodic refresh task.
pub struct RefreshJob {
    task: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
}

impl RefreshJob {
    /// Request shutdown and wait for the task to finish.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        let _ = self.shutdown.send(true);
        self.task.await.map_err(anyhow::Error::new)
    }
}

/// Spawn the background job that keeps the shared quote cache warm.
/// The first refresh runs immediately.
pub fn spawn_refresh(
    feed: Arc<MarketFeed>,
    cache: SharedQuote,
    interval: Duration,
    metrics: Option<ServiceMetrics>,
) -> RefreshJob {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let quote = feed.current_quote().await;
                    if let Some(metrics) = &metrics {
                        metrics.market_refreshes_total.inc();
                        if quote.simulated {
                            metrics.market_fallbacks_total.inc();
                        }
                    }
                    info!(
                        cny = quote.cny.price,
                        usd = quote.usd.price,
                        simulated = quote.simulated,
                        "copper quote refreshed"
                    );
                    *cache.write() = Some(quote);
                }
                _ = shutdown_rx.changed() => {
                    debug!("market refresh job stopping");
                    break;
                }
            }
        }
    });
    RefreshJob {
        task,
        shutdown: shutdown_tx,
    }
}
