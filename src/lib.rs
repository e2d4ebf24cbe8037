//! Lead notification service.
//!
//! Accepts lead submissions and Brevo contact webhooks and forwards them as
//! HTML email notifications through Brevo (SMTP relay or HTTP API). Brevo
//! delivery events are accepted on a separate webhook and logged.

pub mod config;
pub mod dto;
pub mod events;
pub mod handlers;
pub mod mailer;
pub mod service;
pub mod template;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use handlers::{AppState, ApiDoc, health, leads, webhooks};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/bpo-acceptor-lead", post(leads::submit_lead))
        .route("/webhook/brevo-contact", post(webhooks::brevo_contact_webhook))
        .route("/webhook/brevo", post(webhooks::brevo_event_webhook))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
