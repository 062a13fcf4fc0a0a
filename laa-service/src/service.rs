use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, Request, StatusCode},
    middleware::{Next, from_fn},
    response::Json,
    routing::{get, post},
};
use chrono::Utc;
use laa_core::{AssetDeclaration, CheckRequest, LiveCitations, RateTable, evaluate};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, info, warn};
use uuid::Uuid;

use crate::{
    config::ServiceConfig,
    models::{CheckResponse, ErrorResponse},
    perplexity::PerplexityCitations,
};

type ApiResult<T> = Result<Json<T>, ApiError>;
type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request_error(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
            field: None,
        }),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub rates: Arc<RateTable>,
    pub citations: LiveCitations,
}

impl AppState {
    pub fn new(rates: RateTable, citations: LiveCitations) -> Self {
        Self {
            rates: Arc::new(rates),
            citations,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        let mut citations = LiveCitations::new(Arc::new(PerplexityCitations::from_config(config)))
            .with_timeout(config.citation_timeout);
        if config.citation_retry {
            citations = citations.with_retry(laa_core::citation::DEFAULT_BACKOFF);
        }
        Self::new(RateTable::rbi(), citations)
    }
}

/// Middleware to add correlation ID to all requests
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let correlation_id = Uuid::new_v4().to_string();

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        request.headers_mut().insert("x-correlation-id", value);
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    next.run(request).instrument(span).await
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/rules", get(get_rules))
        .route("/api/check", post(check_eligibility))
        .layer(from_fn(correlation_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Loan Against Asset Eligibility Checker",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /api/check": "Evaluate a gold, property or shares declaration",
            "GET /api/rules": "Current LTV rate table",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn get_rules(State(state): State<AppState>) -> Json<RateTable> {
    Json(state.rates.as_ref().clone())
}

async fn check_eligibility(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> ApiResult<CheckResponse> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected malformed request body");
        bad_request_error(rejection.body_text())
    })?;

    let mut verdict = AssetDeclaration::validate(request, &state.rates)
        .and_then(|declaration| evaluate(&declaration, &state.rates))
        .map_err(|e| {
            warn!(field = e.field(), error = %e, "Invalid asset declaration");
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(&e)))
        })?;
    state.citations.annotate(&mut verdict, Utc::now()).await;

    info!(
        asset_type = %verdict.asset_type,
        approved = verdict.approved,
        max_eligible = %verdict.max_eligible,
        live_citation = verdict.citation.is_some(),
        "Eligibility check completed"
    );

    Ok(Json(CheckResponse::from_verdict(verdict, Utc::now())))
}
