pub mod health;
pub mod leads;
pub mod webhooks;

use utoipa::OpenApi;

use crate::{
    dto::{
        BrevoContactWebhook, HealthResponse, LeadRequest, LeadResponse, RootResponse,
        WebhookEvent, WebhookResponse,
    },
    service::LeadService,
};

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub service: LeadService,
    pub app_name: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        leads::submit_lead,
        webhooks::brevo_contact_webhook,
        webhooks::brevo_event_webhook,
        health::health_check,
        health::root
    ),
    components(schemas(
        LeadRequest,
        LeadResponse,
        BrevoContactWebhook,
        WebhookEvent,
        WebhookResponse,
        HealthResponse,
        RootResponse
    )),
    tags(
        (name = "leads", description = "Lead submissions and Brevo webhooks")
    )
)]
pub struct ApiDoc;
