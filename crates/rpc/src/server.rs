//! HTTP routing and handlers
//!
//! Thin layer over `farecast-core`: handlers translate between JSON
//! bodies and the prediction service, and map the typed error taxonomy
//! onto status codes. No inference logic lives here.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use farecast_core::{
    ArtifactStore, DropdownOptions, FlightQuery, PredictError, PredictionResult,
    PredictionService, VERSION,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Process-wide serving state. The artifact store is the only shared
/// handle; requests clone the current set out of it and run lock-free.
pub struct AppState {
    pub artifacts: ArtifactStore,
    pub start_time: Instant,
    pub req_count: AtomicUsize,
}

impl AppState {
    pub fn new(artifacts: ArtifactStore) -> Self {
        Self {
            artifacts,
            start_time: Instant::now(),
            req_count: AtomicUsize::new(0),
        }
    }

    fn record_request(&self) -> u64 {
        self.req_count.fetch_add(1, Ordering::Relaxed) as u64 + 1
    }

    fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

type SharedState = Arc<AppState>;

#[derive(Debug, Serialize)]
struct RootResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_secs: u64,
    req_total: u64,
    transform_hash: String,
    model_hash: String,
    feature_width: usize,
    trees: usize,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

/// Error envelope: non-2xx status plus `{ "detail": ... }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new<S: Into<String>>(status: StatusCode, detail: S) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = Json(ErrorResponse {
            detail: self.detail,
        });
        (self.status, payload).into_response()
    }
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        let status = match err {
            PredictError::InvalidInput(_) | PredictError::UnknownCategory { .. } => {
                StatusCode::BAD_REQUEST
            }
            PredictError::InternalInconsistency(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

/// Bind and serve until the listener fails or the task is stopped.
pub async fn start_server(state: AppState, addr: &str, allowed_origins: &[String]) -> Result<()> {
    let shared = Arc::new(state);
    let app = build_router(shared, allowed_origins)?;
    let socket_addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("invalid listen address {addr:?}"))?;
    let listener = tokio::net::TcpListener::bind(socket_addr)
        .await
        .with_context(|| format!("failed to bind listener on {socket_addr}"))?;
    info!(%socket_addr, "serving");
    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")
}

pub fn build_router(state: SharedState, allowed_origins: &[String]) -> Result<Router> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin {origin:?}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/dropdown-options", get(handle_dropdown_options))
        .route("/predict", post(handle_predict))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

async fn handle_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Flight fare prediction API is running",
    })
}

async fn handle_health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let req_total = state.record_request();
    let artifacts = state.artifacts.current();
    Json(HealthResponse {
        status: "healthy",
        version: VERSION,
        uptime_secs: state.uptime_seconds(),
        req_total,
        transform_hash: artifacts.transform_hash.clone(),
        model_hash: artifacts.model_hash.clone(),
        feature_width: artifacts.model.expected_width(),
        trees: artifacts.model.num_trees(),
    })
}

async fn handle_dropdown_options(State(state): State<SharedState>) -> Json<DropdownOptions> {
    state.record_request();
    let service = PredictionService::new(state.artifacts.current());
    Json(service.dropdown_options())
}

async fn handle_predict(
    State(state): State<SharedState>,
    Json(query): Json<FlightQuery>,
) -> Result<Json<PredictionResult>, ApiError> {
    state.record_request();
    let service = PredictionService::new(state.artifacts.current());
    let result = service.predict(&query)?;
    Ok(Json(result))
}
