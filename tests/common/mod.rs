//! Shared helpers for router-level tests.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use lead_notifier::{
    create_router,
    handlers::AppState,
    mailer::{MailError, Mailer, OutgoingEmail},
    service::LeadService,
};
use serde_json::Value;
use tower::ServiceExt;

use std::sync::{Arc, Mutex};

pub const SERVICE_NAME: &str = "BPO Acceptor Lead Service";
pub const RECIPIENTS: [&str; 2] = ["sales@example.com", "ops@example.com"];

/// Mailer double that records every message instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail_with: Option<String>,
}

impl RecordingMailer {
    pub fn failing(body: &str) -> Self {
        Self {
            sent: Mutex::default(),
            fail_with: Some(body.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email.clone());
        match &self.fail_with {
            Some(body) => Err(MailError::Api {
                status: 401,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub fn app_with(mailer: Arc<dyn Mailer>) -> Router {
    let recipients = RECIPIENTS.iter().map(ToString::to_string).collect();
    create_router(AppState {
        service: LeadService::new(mailer, recipients, SERVICE_NAME.to_string()),
        app_name: SERVICE_NAME.to_string(),
    })
}

pub fn app() -> (Router, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    (app_with(mailer.clone()), mailer)
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.expect("failed to make request");
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = String::from_utf8(body_bytes.to_vec()).expect("response body should be UTF-8");
    (status, body)
}

pub async fn post_json(app: Router, uri: &str, payload: &Value) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub fn json(body: &str) -> Value {
    serde_json::from_str(body).expect("response should be valid JSON")
}
