//! End-to-end tests for the HTTP routes.
//!
//! The news API points at a closed port so every feed request takes the
//! error fallback path, and scoring jitter is off.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use falsify_lib::api::{build_router, AppState, SESSION_COOKIE};
use falsify_lib::services::config_store::AppConfig;

const TOKEN: &str = "sess_integration_token";

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.news.base_url = "http://127.0.0.1:9".to_string();
    config.news.timeout_secs = 2;
    config.news.strategy_delay_ms = 0;
    config.deepfake.url = "http://127.0.0.1:9/detect".to_string();
    config.deepfake.timeout_secs = 2;
    config.scoring.jitter = false;
    config.auth.session_tokens = vec![TOKEN.to_string()];
    config
}

fn app_with(config: AppConfig) -> Router {
    build_router(AppState::from_config(config).unwrap())
}

fn app() -> Router {
    app_with(test_config())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

async fn json_request(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
    session: bool,
) -> (StatusCode, Option<Value>) {
    let mut builder = Request::builder().method(method).uri(path);
    if session {
        builder = builder.header(header::COOKIE, format!("{}={}", SESSION_COOKIE, TOKEN));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let (status, _, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).ok())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = json_request(&app(), Method::GET, "/health", None, false).await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "falsify");
}

#[tokio::test]
async fn test_analyze_rejects_blank_and_short_input() {
    let app = app();

    let (status, body) =
        json_request(&app, Method::POST, "/api/analyze", Some(json!({"text": "  "})), false).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = body.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Please provide news text or title to analyze");

    let (status, body) =
        json_request(&app, Method::POST, "/api/analyze", Some(json!({"text": "short"})), false).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.unwrap()["error"],
        "Please provide at least 10 characters of text to analyze"
    );
}

#[tokio::test]
async fn test_analyze_accepts_null_text() {
    let (status, body) = json_request(
        &app(),
        Method::POST,
        "/api/analyze",
        Some(json!({"title": "BREAKING: secret cities found underground", "text": null})),
        false,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["analysis"]["prediction"], "fake");
}

#[tokio::test]
async fn test_bad_json_bodies_use_error_envelope() {
    let app = app();
    let cases = [
        ("/api/headline", "application/json", "{\"headline\": "),
        ("/api/analyze", "application/json", "{\"text\": 42}"),
        ("/api/analytics", "text/plain", "{\"articles\": []}"),
        ("/phishing/check", "application/json", "not json"),
    ];

    for (path, content_type, raw) in cases {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, TOKEN))
            .body(Body::from(raw))
            .unwrap();

        let (status, headers, bytes) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json", "{}", path);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false, "{}", path);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()), "{}", path);
    }
}

#[tokio::test]
async fn test_analyze_sensational_text() {
    let text = "SHOCKING!!! Doctors HATE this one secret trick. You won't believe what \
                happened next. Share before it gets deleted!!!";
    let (status, body) = json_request(
        &app(),
        Method::POST,
        "/api/analyze",
        Some(json!({"title": "BREAKING", "text": text})),
        false,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body = body.unwrap();
    assert_eq!(body["success"], true);
    let analysis = &body["analysis"];
    assert_eq!(analysis["prediction"], "fake");
    assert!(analysis["analysis_factors"].as_array().is_some_and(|f| !f.is_empty()));
    assert!(analysis["word_count"].as_u64().unwrap() > 10);
    assert!(analysis["request_id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(analysis["input_text"].as_str().unwrap().starts_with("BREAKING SHOCKING"));
}

#[tokio::test]
async fn test_fake_news_module_is_gated_and_shares_analyzer() {
    let app = app();
    let body = json!({"text": "The city council approved the annual budget on Tuesday."});

    let (status, _) =
        json_request(&app, Method::POST, "/fake-news/analyze", Some(body.clone()), false).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, body) = json_request(&app, Method::POST, "/fake-news/analyze", Some(body), true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["success"], true);
}

#[tokio::test]
async fn test_headline() {
    let app = app();

    let (status, body) =
        json_request(&app, Method::POST, "/api/headline", Some(json!({"headline": " "})), false).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["error"], "Please provide a headline to analyze");

    let (status, body) = json_request(
        &app,
        Method::POST,
        "/api/headline",
        Some(json!({"headline": "  Council publishes quarterly budget report "})),
        false,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["headline"], "Council publishes quarterly budget report");
    assert_eq!(body["analysis"]["is_suspicious"], false);
}

#[tokio::test]
async fn test_protected_route_redirects_to_sign_in() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/phishing/check")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"url": "https://example.com"}).to_string()))
        .unwrap();
    let (status, headers, _) = send(&app(), request).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers.get(header::LOCATION).unwrap(), "/sign-in");
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/phishing/check")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .body(Body::from(json!({"url": "https://www.example.com/"}).to_string()))
        .unwrap();
    let (status, _, _) = send(&app(), request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_auth_can_be_disabled() {
    let mut config = test_config();
    config.auth.enabled = false;
    config.auth.session_tokens.clear();

    let (status, body) = json_request(
        &app_with(config),
        Method::POST,
        "/phishing/check",
        Some(json!({"url": "https://www.example.com/"})),
        false,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["success"], true);
}

#[tokio::test]
async fn test_phishing_check() {
    let app = app();

    let (status, body) = json_request(
        &app,
        Method::POST,
        "/phishing/check",
        Some(json!({"url": "https://www.example.com/news/today"})),
        true,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["isPhishing"], false);
    assert_eq!(body["riskLevel"], "Low");
    assert_eq!(body["score"], 30);
    assert_eq!(body["checks"].as_array().unwrap().len(), 5);

    let (status, body) =
        json_request(&app, Method::POST, "/phishing/check", Some(json!({"url": ""})), true).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["error"], "Please provide a URL to check");
}

#[tokio::test]
async fn test_deepfake_without_files_is_rejected() {
    let boundary = "falsify-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri("/deepfake/detect")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
        .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, TOKEN))
        .body(Body::from(body))
        .unwrap();

    let (status, _, bytes) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "No files to analyze");
}

fn image_upload(bytes: usize) -> Request<Body> {
    let boundary = "falsify-boundary";
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"photo.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n",
        b = boundary
    )
    .into_bytes();
    body.extend(vec![0xFFu8; bytes]);
    body.extend(format!("\r\n--{}--\r\n", boundary).into_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/deepfake/detect")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
        .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, TOKEN))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_deepfake_accepts_multi_megabyte_photo() {
    // Larger than axum's 2 MiB default body limit
    let (status, _, bytes) = send(&app(), image_upload(3 * 1024 * 1024)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_deepfake_upload_over_configured_limit_is_rejected() {
    let mut config = test_config();
    config.deepfake.max_upload_bytes = 64 * 1024;

    let (status, _, bytes) = send(&app_with(config), image_upload(256 * 1024)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid upload"));
}

#[tokio::test]
async fn test_news_falls_back_to_mock_articles() {
    let request = Request::builder()
        .uri("/api/news?limit=3")
        .body(Body::empty())
        .unwrap();
    let (status, headers, bytes) = send(&app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get(header::CACHE_CONTROL).unwrap(),
        "no-cache, no-store, must-revalidate"
    );

    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["aiMode"], "error_fallback");
    assert_eq!(body["totalResults"], 3);
    assert_eq!(body["message"], "Using mock data due to API error");
    assert_eq!(body["data"][0]["article_id"], "mock_1");
}

#[tokio::test]
async fn test_analytics_get_and_post() {
    let app = app();

    let (status, body) = json_request(&app, Method::GET, "/api/analytics", None, false).await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["analytics"]["totalArticles"], 10);
    assert!(body["data"].get("processedArticles").is_none());

    let (status, body) =
        json_request(&app, Method::POST, "/api/analytics", Some(json!({"articles": "nope"})), false).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["error"], "Invalid articles data");

    let posted = json!({"articles": [
        {"uuid": "a-1", "title": "Local library extends opening hours", "url": "https://news.example/a-1",
         "description": "The library will open until 9pm on weekdays.", "source": "Reuters"},
        {"uuid": "a-2", "title": "SHOCKING secret they don't want you to know", "url": "https://news.example/a-2"}
    ]});
    let (status, body) = json_request(&app, Method::POST, "/api/analytics", Some(posted), false).await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["data"]["analytics"]["totalArticles"], 2);
    let processed = body["data"]["processedArticles"].as_array().unwrap();
    assert_eq!(processed.len(), 2);
    assert_eq!(processed[0]["article_id"], "a-1");
}

#[tokio::test]
async fn test_csv_export_headers() {
    let request = Request::builder()
        .uri("/api/export/csv")
        .body(Body::empty())
        .unwrap();
    let (status, headers, bytes) = send(&app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "text/csv; charset=utf-8");
    let disposition = headers.get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"NewsCollector_Enhanced_Export_"));

    let text = String::from_utf8(bytes).unwrap();
    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
    assert_eq!(reader.headers().unwrap().len(), 21);
    assert_eq!(reader.records().count(), 10);
}

#[tokio::test]
async fn test_dashboard_builds_snapshot_on_demand() {
    let (status, body) = json_request(&app(), Method::GET, "/dashboard", None, true).await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["refreshedAt"].as_str().is_some());
    assert_eq!(body["feed"]["aiMode"], "error_fallback");
}
