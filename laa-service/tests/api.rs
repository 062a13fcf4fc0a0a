use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use laa_core::{Citation, CitationError, CitationService, LiveCitations, RateTable};
use laa_service::{AppState, build_router};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::ServiceExt;

struct StubCitations;

#[async_trait]
impl CitationService for StubCitations {
    async fn fetch_citation(&self, _query: &str) -> Result<Citation, CitationError> {
        Ok(Citation {
            text: "RBI/2025-26/12 Gold loan LTV circular".to_string(),
            cost_usd: 0.002,
        })
    }
}

struct HangingCitations;

#[async_trait]
impl CitationService for HangingCitations {
    async fn fetch_citation(&self, _query: &str) -> Result<Citation, CitationError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Err(CitationError::Provider("never answers".to_string()))
    }
}

fn app_with(service: Arc<dyn CitationService>) -> Router {
    let citations = LiveCitations::new(service).with_timeout(Duration::from_millis(100));
    build_router(AppState::new(RateTable::rbi(), citations))
}

fn app() -> Router {
    app_with(Arc::new(StubCitations))
}

async fn post_check(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/check")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_gold_at_limit_is_approved() {
    let (status, body) = post_check(
        app(),
        json!({
            "assetType": "gold",
            "value": 1000000,
            "loanAmount": 750000,
            "location": "urban",
            "purity": 22
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["approved"], true);
    assert_eq!(body["maxEligible"], "₹7,50,000");
    assert_eq!(body["ltvUsed"], "75.0%");
    assert_eq!(body["ltvLimit"], "75%");
    assert_eq!(body["assetType"], "gold");
    assert_eq!(body["rbiRefs"].as_array().unwrap().len(), 2);
    assert_eq!(body["perplexityUpdate"]["costUSD"], 0.002);
    assert!(
        body["perplexityUpdate"]["query"]
            .as_str()
            .unwrap()
            .starts_with("Latest RBI gold loan")
    );
}

#[tokio::test]
async fn test_gold_over_limit_is_rejected_with_200() {
    let (status, body) = post_check(
        app(),
        json!({
            "assetType": "gold",
            "value": 1000000,
            "loanAmount": 800000,
            "location": "urban",
            "purity": 22
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["approved"], false);
    assert_eq!(body["maxEligible"], "₹7,50,000");
    assert_eq!(body["ltvUsed"], "80.0%");
    assert_eq!(body["reasons"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_property_circle_rate_gate() {
    let (status, body) = post_check(
        app(),
        json!({
            "assetType": "property",
            "value": 2000000,
            "loanAmount": 1000000,
            "circleRate": 1700000
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["approved"], false);
    assert_eq!(body["ltvLimit"], "60%");
    assert_eq!(body["maxEligible"], "₹12,00,000");
}

#[tokio::test]
async fn test_nifty_share_pledge() {
    let (status, body) = post_check(
        app(),
        json!({
            "assetType": "shares",
            "value": 400000,
            "loanAmount": 200000,
            "symbol": "hdfcbank"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["approved"], true);
    assert_eq!(body["ltvLimit"], "50%");
}

#[tokio::test]
async fn test_low_purity_is_bad_request() {
    let (status, body) = post_check(
        app(),
        json!({
            "assetType": "gold",
            "value": 1000000,
            "loanAmount": 100000,
            "location": "rural",
            "purity": 14
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "purity");
    assert!(body["error"].as_str().unwrap().contains("18k"));
}

#[tokio::test]
async fn test_zero_value_is_bad_request() {
    let (status, body) = post_check(
        app(),
        json!({ "assetType": "shares", "value": 0, "loanAmount": 10, "symbol": "TCS" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "value");
}

#[tokio::test]
async fn test_unrepresentable_ratio_is_bad_request() {
    let (status, body) = post_check(
        app(),
        json!({
            "assetType": "shares",
            "value": "0.0000000001",
            "loanAmount": "10000000000000000000000",
            "symbol": "TCS"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "loanAmount");

    let (status, body) = post_check(
        app(),
        json!({ "assetType": "shares", "value": 1, "loanAmount": 1e27, "symbol": "TCS" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "loanAmount");
}

#[tokio::test]
async fn test_unsupported_asset_type_is_bad_request() {
    let (status, body) = post_check(
        app(),
        json!({ "assetType": "vehicle", "value": 100, "loanAmount": 10 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "assetType");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/check")
        .header("content-type", "application/json")
        .body(Body::from("{\"assetType\": \"gold\", "))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_citation_timeout_still_returns_verdict() {
    let started = Instant::now();
    let (status, body) = post_check(
        app_with(Arc::new(HangingCitations)),
        json!({
            "assetType": "gold",
            "value": 1000000,
            "loanAmount": 750000,
            "location": "urban",
            "purity": 22
        }),
    )
    .await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["approved"], true);
    assert_eq!(body["maxEligible"], "₹7,50,000");
    assert!(body.get("perplexityUpdate").is_none());
    assert_eq!(body["rbiRefs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rules_and_health() {
    let request = Request::builder().uri("/api/rules").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let rules: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(rules["gold"]["urbanLtv"], "0.75");
    assert_eq!(rules["shares"]["eligibleIndex"], "NIFTY50");

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
