//! Router-level tests for the HTTP API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use rooftop_api::{create_router, ApiConfig, AppState};
use rooftop_models::{QualitativeAnalysis, SolarAssumptions};
use rooftop_vision::{
    OpenRouterClient, RoofAnalyzer, StaticAnalyzer, VisionConfig, VisionError, VisionResult,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BOUNDARY: &str = "rooftop-test-boundary";

fn app_with(analyzer: Arc<dyn RoofAnalyzer>) -> Router {
    let state = AppState::new(ApiConfig::default(), SolarAssumptions::default(), analyzer);
    create_router(state, None)
}

fn sunny_large_roof() -> QualitativeAnalysis {
    QualitativeAnalysis {
        roof_shape: Some("gable".to_string()),
        main_obstacles: Some(vec!["chimney".to_string(), "vent".to_string()]),
        sunlight_exposure: Some("excellent".to_string()),
        usable_area_qualitative: Some("large".to_string()),
        overall_assessment: Some("very suitable".to_string()),
    }
}

fn multipart_request(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

struct UnconfiguredAnalyzer;

#[async_trait]
impl RoofAnalyzer for UnconfiguredAnalyzer {
    async fn analyze_image(&self, _image: &[u8]) -> VisionResult<QualitativeAnalysis> {
        Err(VisionError::authentication("OPENROUTER_API_KEY is not set"))
    }

    fn is_ready(&self) -> bool {
        false
    }
}

#[tokio::test]
async fn health_reports_version() {
    let app = app_with(Arc::new(StaticAnalyzer::returning(QualitativeAnalysis::default())));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn ready_reflects_analyzer_configuration() {
    let app = app_with(Arc::new(UnconfiguredAnalyzer));
    let response = app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(response).await["status"], "degraded");

    let app = app_with(Arc::new(StaticAnalyzer::returning(QualitativeAnalysis::default())));
    let response = app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn assumptions_endpoint_returns_defaults() {
    let app = app_with(Arc::new(StaticAnalyzer::returning(QualitativeAnalysis::default())));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/assumptions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["panel_wattage"], 400);
    assert_eq!(body["panel_area_sq_ft"], 18);
    assert_eq!(body["cost_per_watt"], 70.0);
    assert_eq!(body["electricity_rate_per_kwh"], 6.5);
}

#[tokio::test]
async fn estimate_endpoint_computes_without_vision_call() {
    let app = app_with(Arc::new(StaticAnalyzer::new(|_| {
        panic!("estimate must not call the analyzer")
    })));

    let request = Request::builder()
        .method("POST")
        .uri("/api/estimate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "usable_area_qualitative": "small",
                "sunlight_exposure": "poor - significant shading"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["profile"]["usable_area"], "small");
    assert_eq!(body["profile"]["sunlight"], "poor");
    assert_eq!(body["estimate"]["panel_count"], 5);
    assert_eq!(body["estimate"]["system_wattage"], 2000);
    assert_eq!(body["report"]["system_cost"], "₹140000.00");
    assert_eq!(body["report"]["payback_period"], "15384.6 years");
}

#[tokio::test]
async fn estimate_endpoint_reports_not_applicable_payback() {
    let app = app_with(Arc::new(StaticAnalyzer::returning(QualitativeAnalysis::default())));

    let request = Request::builder()
        .method("POST")
        .uri("/api/estimate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "sunlight_exposure": "good" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["estimate"]["panel_count"], 0);
    assert_eq!(body["estimate"]["roi_years"], "N/A (No significant savings)");
}

#[tokio::test]
async fn analyze_upload_returns_outcome() {
    let app = app_with(Arc::new(StaticAnalyzer::new(|image| {
        assert_eq!(image, b"\x89PNG\r\n\x1a\nfake");
        Ok(sunny_large_roof())
    })));

    let response = app
        .oneshot(multipart_request(
            "image",
            "roof.png",
            "image/png",
            b"\x89PNG\r\n\x1a\nfake",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["analysis"]["roof_shape"], "gable");
    assert_eq!(body["estimate"]["usable_area_sq_ft"], 600);
    assert_eq!(body["estimate"]["panel_count"], 33);
    assert_eq!(body["estimate"]["system_wattage"], 13200);
    assert_eq!(body["report"]["main_obstacles"], "chimney, vent");
    assert_eq!(body["report"]["system_cost"], "₹924000.00");
    assert_eq!(body["report"]["payback_period"], "6410.3 years");
}

#[tokio::test]
async fn analyze_upload_surfaces_raw_model_output() {
    let app = app_with(Arc::new(StaticAnalyzer::new(|_| {
        Err(VisionError::malformed("expected value", "Sorry, I cannot analyze this"))
    })));

    let response = app
        .oneshot(multipart_request("image", "roof.jpg", "image/jpeg", b"jpegdata"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["raw_response"], "Sorry, I cannot analyze this");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("JSON parsing error"));
}

#[tokio::test]
async fn analyze_upload_rejects_unsupported_type() {
    let app = app_with(Arc::new(StaticAnalyzer::returning(sunny_large_roof())));

    let response = app
        .oneshot(multipart_request("image", "roof.gif", "image/gif", b"GIF89a"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn analyze_upload_requires_image_field() {
    let app = app_with(Arc::new(StaticAnalyzer::returning(sunny_large_roof())));

    let response = app
        .oneshot(multipart_request("notes", "notes.txt", "text/plain", b"hello"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["detail"].as_str().unwrap().contains("image"));
}

#[tokio::test]
async fn analyze_upload_rejects_empty_image() {
    let app = app_with(Arc::new(StaticAnalyzer::returning(sunny_large_roof())));

    let response = app
        .oneshot(multipart_request("image", "roof.png", "image/png", b""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = app_with(Arc::new(StaticAnalyzer::returning(QualitativeAnalysis::default())));

    let response = app
        .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analyze_upload_maps_vision_timeout_to_gateway_timeout() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"choices": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = VisionConfig::default()
        .with_base_url(server.uri())
        .with_api_key("test-key")
        .with_timeout(Duration::from_millis(200));
    let app = app_with(Arc::new(OpenRouterClient::new(config).unwrap()));

    let response = app
        .oneshot(multipart_request("image", "roof.jpg", "image/jpeg", b"jpegdata"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    let body = json_body(response).await;
    assert_eq!(body["code"], "network");
}
