//! Integration tests for the HTTP service
//!
//! The router is exercised in-process with `tower::ServiceExt::oneshot`;
//! `/scrape` is pointed at a wiremock site.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use leadsift::config::{Config, CrawlerConfig, ExportConfig, ServerConfig, UserAgentConfig};
use leadsift::server::{build_router, AppState};
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(uploads_dir: &str) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_depth_limit: 3,
            max_concurrent_fetches: 4,
            fetch_timeout_secs: 5,
            crawl_deadline_secs: 30,
        },
        user_agent: UserAgentConfig {
            crawler_name: "leadsift-test".to_string(),
            crawler_version: "0.0.0".to_string(),
        },
        server: ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 9001,
        },
        export: ExportConfig {
            uploads_dir: uploads_dir.to_string(),
        },
    }
}

fn test_router(uploads_dir: &str) -> axum::Router {
    let state = AppState::new(test_config(uploads_dir)).expect("failed to build state");
    build_router(Arc::new(state))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

#[tokio::test]
async fn test_csv_then_download_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path().to_str().unwrap());

    let record = serde_json::json!({
        "url": "https://example.com/",
        "emails": ["a@x.com", "b@x.com"],
        "phones": ["+1555"],
    });
    let response = router
        .clone()
        .oneshot(
            Request::post("/csv")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(record.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let file_id = body_json(response).await["fileId"]
        .as_str()
        .unwrap()
        .to_string();

    let response = router
        .oneshot(
            Request::get(format!("/download/{}", file_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .contains(&file_id));

    let content = body_string(response).await;
    assert!(content.starts_with("url,emails,phones,linkedin,facebook,twitter,instagram"));
    assert!(content.contains("https://example.com/,a@x.com,+1555,,,,"));
    assert!(content.contains("https://example.com/,b@x.com,,,,,"));
}

#[tokio::test]
async fn test_add_csv_appends_to_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path().to_str().unwrap());

    let first = serde_json::json!([{ "url": "https://one.example/", "emails": ["a@x.com"] }]);
    let response = router
        .clone()
        .oneshot(
            Request::post("/add-csv")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(first.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let file_id = body_json(response).await["fileId"]
        .as_str()
        .unwrap()
        .to_string();

    let second = serde_json::json!([{ "url": "https://two.example/", "emails": ["b@x.com"] }]);
    let response = router
        .clone()
        .oneshot(
            Request::post(format!("/add-csv?fileId={}", file_id))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(second.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["fileId"].as_str().unwrap(), file_id);

    let response = router
        .oneshot(
            Request::get(format!("/download/{}", file_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let content = body_string(response).await;
    assert!(content.contains("https://one.example/;a@x.com;;;;;"));
    assert!(content.contains("https://two.example/;b@x.com;;;;;"));
}

#[tokio::test]
async fn test_download_unknown_id_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path().to_str().unwrap());

    let response = router
        .oneshot(
            Request::get("/download/00000000-0000-4000-8000-000000000000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_non_uuid_id_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path().to_str().unwrap());

    let response = router
        .oneshot(
            Request::get("/download/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scrape_invalid_url_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path().to_str().unwrap());

    let response = router
        .oneshot(
            Request::get("/scrape?targetUrl=not%20a%20url&depth=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_scrape_depth_above_limit_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path().to_str().unwrap());

    let response = router
        .oneshot(
            Request::get("/scrape?targetUrl=https%3A%2F%2Fexample.com%2F&depth=9")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.contains("depth"), "unexpected error: {}", error);
}

#[tokio::test]
async fn test_scrape_unreachable_seed_is_502() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path().to_str().unwrap());

    let target = urlencoded(&format!("{}/", mock_server.uri()));
    let response = router
        .oneshot(
            Request::get(format!("/scrape?targetUrl={}&depth=0", target))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_scrape_end_to_end_returns_contacts() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                r#"<html><body>
                    <a href="mailto:jane@example.com">Email</a>
                    <a href="https://www.linkedin.com/company/acme">LinkedIn</a>
                    </body></html>"#
                    .as_bytes()
                    .to_vec(),
                "text/html",
            ),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let router = test_router(dir.path().to_str().unwrap());

    let target = urlencoded(&format!("{}/", mock_server.uri()));
    let response = router
        .oneshot(
            Request::get(format!("/scrape?targetUrl={}&depth=0", target))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["url"].as_str().unwrap(), format!("{}/", mock_server.uri()));
    assert_eq!(json["emails"][0], "jane@example.com");
    assert_eq!(json["linkedin"][0], "https://www.linkedin.com/company/acme");
}

/// Minimal percent-encoding for URLs used as query parameter values
fn urlencoded(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace(':', "%3A")
        .replace('/', "%2F")
        .replace('&', "%26")
        .replace('?', "%3F")
}
