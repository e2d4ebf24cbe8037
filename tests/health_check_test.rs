//! Health and root endpoint tests.

mod common;

use axum::http::StatusCode;

use common::{SERVICE_NAME, app, get, json};

#[tokio::test]
async fn health_check_reports_healthy() {
    let (app, _) = app();

    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], SERVICE_NAME);
}

#[tokio::test]
async fn root_lists_entry_points() {
    let (app, _) = app();

    let (status, body) = get(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["message"], format!("Welcome to {SERVICE_NAME}"));
    assert_eq!(body["docs"], "/docs");
    assert_eq!(body["health"], "/health");
    assert_eq!(body["submit_lead"], "/bpo-acceptor-lead");
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let (app, _) = app();

    let (status, body) = get(app, "/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    let paths = body["paths"].as_object().expect("paths object");
    for path in [
        "/bpo-acceptor-lead",
        "/webhook/brevo-contact",
        "/webhook/brevo",
        "/health",
        "/",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}

/// ReDoc serves an HTML page with the same OpenAPI document embedded.
#[tokio::test]
async fn redoc_page_embeds_openapi_document() {
    let (app, _) = app();

    let (status, body) = get(app, "/redoc").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.to_lowercase().contains("redoc"));
    assert!(body.contains("/bpo-acceptor-lead"));
}
