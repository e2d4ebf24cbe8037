//! Lead submission endpoint tests.
//!
//! Drives `POST /bpo-acceptor-lead` through the router with a recording
//! mailer and checks validation, rendering and transport failure handling.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use std::sync::Arc;

use common::{RECIPIENTS, RecordingMailer, app, app_with, json, post_json};

fn valid_lead() -> serde_json::Value {
    json!({
        "name": "John Doe",
        "email": "john.doe@example.com",
        "message": "Interested in BPO services"
    })
}

/// A valid lead is emailed once to every recipient and acknowledged.
#[tokio::test]
async fn valid_lead_is_sent() {
    let (app, mailer) = app();

    let (status, body) = post_json(app, "/bpo-acceptor-lead", &valid_lead()).await;

    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Lead submitted successfully");

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, RECIPIENTS);
    assert_eq!(sent[0].subject, "New BPO Lead: John Doe");
    assert!(sent[0].html.contains("john.doe@example.com"));
    assert!(sent[0].html.contains("Interested in BPO services"));
}

/// A body without the email field is rejected by the extractor before dispatch.
#[tokio::test]
async fn missing_email_is_rejected_without_sending() {
    let (app, mailer) = app();

    let payload = json!({"name": "John Doe", "message": "Hello"});
    let (status, _) = post_json(app, "/bpo-acceptor-lead", &payload).await;

    assert!(status.is_client_error(), "expected 4xx, got {status}");
    assert!(mailer.sent().is_empty());
}

/// Field rules are enforced with a 422 and no transport call.
#[tokio::test]
async fn invalid_fields_are_rejected_without_sending() {
    let too_long = "x".repeat(1001);
    let cases = [
        json!({"name": "", "email": "john@example.com", "message": "Hello"}),
        json!({"name": "John", "email": "not-an-email", "message": "Hello"}),
        json!({"name": "John", "email": "john@example.com", "message": ""}),
        json!({"name": "John", "email": "john@example.com", "message": too_long}),
    ];

    for payload in cases {
        let (app, mailer) = app();
        let (status, body) = post_json(app, "/bpo-acceptor-lead", &payload).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "payload: {payload}");
        assert_eq!(json(&body)["success"], false);
        assert!(mailer.sent().is_empty(), "payload: {payload}");
    }
}

/// Transport failures surface as a 500 carrying the transport's message.
#[tokio::test]
async fn transport_failure_returns_error_text() {
    let mailer = Arc::new(RecordingMailer::failing("Key not found"));
    let app = app_with(mailer.clone());

    let (status, body) = post_json(app, "/bpo-acceptor-lead", &valid_lead()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json(&body);
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Failed to send notification:"), "{message}");
    assert!(message.contains("Key not found"), "{message}");

    assert_eq!(mailer.sent().len(), 1, "no retry expected");
}
