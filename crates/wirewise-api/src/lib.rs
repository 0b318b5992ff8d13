//! ---
//! ww_section: "05-networking-external-interfaces"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "REST API surface for sizing, counterfeit checks, and quotes."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use prometheus::TextEncoder;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use wirewise_common::ServiceMetrics;
use wirewise_engine::{
    check_weight, size_cable, CatalogProvider, DeratingTable, RiskLevel, SelectionReason,
    SizingRequest, SizingResult, WeightCheckRequest,
};
use wirewise_market::{MarketFeed, SharedQuote};

/// Shared API state exposed to handlers.
pub struct ApiState {
    catalog: Arc<dyn CatalogProvider>,
    derating: DeratingTable,
    market: Arc<MarketFeed>,
    quote_cache: SharedQuote,
    metrics: ServiceMetrics,
    metrics_enabled: bool,
    catalog_rows: usize,
    start: Instant,
}

impl ApiState {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        catalog_rows: usize,
        market: Arc<MarketFeed>,
        quote_cache: SharedQuote,
        metrics: ServiceMetrics,
    ) -> Self {
        Self {
            catalog,
            derating: DeratingTable::default(),
            market,
            quote_cache,
            metrics,
            metrics_enabled: true,
            catalog_rows,
            start: Instant::now(),
        }
    }

    /// Leave the scrape route unmounted when metrics are disabled.
    pub fn with_metrics_enabled(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }
}

/// Handle to the running API server.
#[derive(Debug)]
pub struct ApiServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<()>>,
}

impl ApiServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        match self.task.await {
            Ok(result) => result,
            Err(err) => Err(err.into()),
        }
    }
}

pub fn router(state: Arc<ApiState>) -> Router {
    let mut router = Router::new()
        .route("/", get(get_root))
        .route("/api/status", get(get_status))
        .route("/api/v1/calculate/sizing", post(post_sizing))
        .route("/api/v1/check/fake", post(post_weight_check))
        .route("/api/v1/market/copper", get(get_copper_quote));
    if state.metrics_enabled {
        router = router.route("/metrics", get(get_metrics));
    }
    router.with_state(state).layer(TraceLayer::new_for_http())
}

/// Bind and spawn the REST API, returning a handle carrying the actual
/// bound address (port 0 is resolved here, which the tests rely on).
pub async fn spawn_api_server(state: Arc<ApiState>, addr: SocketAddr) -> Result<ApiServer> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let app = router(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let task: JoinHandle<Result<()>> = tokio::spawn(async move {
        info!(address = %local_addr, "api server listening");
        if let Err(err) = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
        {
            error!(address = %local_addr, error = %err, "api server exited with error");
            return Err(err.into());
        }
        Ok(())
    });

    Ok(ApiServer {
        addr: local_addr,
        shutdown: Some(shutdown_tx),
        task,
    })
}

#[derive(Debug, Serialize)]
struct ServiceInfo {
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    version: &'static str,
    uptime_seconds: u64,
    catalog_rows: usize,
    quote_cached: bool,
}

/// Sizing response in the wire shape the field app expects.
#[derive(Debug, Serialize, Deserialize)]
pub struct SizingResponse {
    pub current_amps: f64,
    pub recommended_size: String,
    pub voltage_drop_percent: f64,
    pub mcb_rating: String,
    pub selection_reason: String,
    pub safe_ampacity: f64,
    pub upgrade_count: u32,
    pub out_of_range: bool,
}

impl SizingResponse {
    fn from_result(result: SizingResult, request: &SizingRequest) -> Self {
        let mcb_rating = if result.breaker_is_standard {
            format!("{}A", result.breaker_rating_a)
        } else {
            // No standard frame covers the load; surface it, never clamp.
            format!("{}A (non-standard)", result.breaker_rating_a)
        };
        let selection_reason = match result.reason {
            SelectionReason::NominalFit => "Suitable size at nominal conditions".to_owned(),
            SelectionReason::TemperatureDerated => format!(
                "Includes ambient derating at {:.0} °C",
                request.ambient_temperature_c
            ),
            SelectionReason::VoltageDropUpgrade { steps } => format!(
                "Upgraded {steps} size(s) to keep voltage drop under {}%",
                request.max_voltage_drop_percent
            ),
            SelectionReason::OutOfRange => {
                "Load or distance exceeds the catalog range".to_owned()
            }
        };
        Self {
            current_amps: result.current_amps,
            recommended_size: result.selected_size.clone(),
            voltage_drop_percent: result.voltage_drop_percent,
            mcb_rating,
            selection_reason,
            safe_ampacity: result.safe_ampacity_a,
            upgrade_count: result.upgrade_count,
            out_of_range: result.is_out_of_range(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeightCheckResponse {
    pub is_pass: bool,
    pub standard_weight: f64,
    pub diff_percent: f64,
    pub risk_level: RiskLevel,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

async fn get_root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "wirewise",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn get_status(State(state): State<Arc<ApiState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start.elapsed().as_secs(),
        catalog_rows: state.catalog_rows,
        quote_cached: state.quote_cache.read().is_some(),
    })
}

async fn get_metrics(State(state): State<Arc<ApiState>>) -> Response {
    let encoder = TextEncoder::new();
    let families = state.metrics.registry().gather();
    match encoder.encode_to_string(&families) {
        Ok(body) => (
            StatusCode::OK,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static(prometheus::TEXT_FORMAT),
            )],
            body,
        )
            .into_response(),
        Err(err) => {
            warn!(error = %err, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn post_sizing(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SizingRequest>,
) -> std::result::Result<Json<SizingResponse>, ApiError> {
    let result = size_cable(state.catalog.as_ref(), &state.derating, &request).map_err(|err| {
        state
            .metrics
            .sizing_requests_total
            .with_label_values(&["rejected"])
            .inc();
        ApiError::bad_request(err.to_string())
    })?;

    state.metrics.sizing_current_amps.observe(result.current_amps);
    if result.is_out_of_range() {
        state.metrics.out_of_range_total.inc();
        state
            .metrics
            .sizing_requests_total
            .with_label_values(&["out_of_range"])
            .inc();
    } else {
        state
            .metrics
            .sizing_requests_total
            .with_label_values(&["accepted"])
            .inc();
    }

    Ok(Json(SizingResponse::from_result(result, &request)))
}

async fn post_weight_check(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<WeightCheckRequest>,
) -> std::result::Result<Json<WeightCheckResponse>, ApiError> {
    let result = check_weight(state.catalog.as_ref(), &request)
        .map_err(|err| ApiError::bad_request(err.to_string()))?;

    let risk_label = if result.specification_missing {
        "unverifiable"
    } else {
        match result.risk {
            RiskLevel::Safe => "safe",
            RiskLevel::Warning => "warning",
            RiskLevel::Danger => "danger",
        }
    };
    state
        .metrics
        .weight_checks_total
        .with_label_values(&[risk_label])
        .inc();

    let message = if result.specification_missing {
        "No reference specification on file".to_owned()
    } else {
        match result.risk {
            RiskLevel::Safe => "Meets the genuine-copper standard".to_owned(),
            RiskLevel::Warning => "Likely non-standard conductor".to_owned(),
            RiskLevel::Danger => {
                "High risk: copper-clad aluminium or under-gauge".to_owned()
            }
        }
    };

    Ok(Json(WeightCheckResponse {
        is_pass: result.passed,
        standard_weight: result.standard_weight_kg,
        diff_percent: result.diff_percent,
        risk_level: result.risk,
        message,
    }))
}

async fn get_copper_quote(
    State(state): State<Arc<ApiState>>,
) -> Json<wirewise_market::CopperQuote> {
    if let Some(quote) = state.quote_cache.read().clone() {
        return Json(quote);
    }

    // Cache cold (refresh job disabled or not yet ticked): fetch inline.
    let quote = state.market.current_quote().await;
    state.metrics.market_refreshes_total.inc();
    if quote.simulated {
        state.metrics.market_fallbacks_total.inc();
    }
    *state.quote_cache.write() = Some(quote.clone());
    Json(quote)
}
