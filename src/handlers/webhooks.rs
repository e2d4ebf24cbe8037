use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use garde::Validate;

use std::sync::Arc;

use super::AppState;
use crate::{
    dto::{BrevoContactWebhook, LeadResponse, WebhookEvent, WebhookResponse},
    events,
};

/// Brevo automation callback carrying a contact; forwarded as a lead notification.
#[utoipa::path(
    post,
    path = "/webhook/brevo-contact",
    request_body = BrevoContactWebhook,
    responses(
        (status = 200, description = "Notification sent for the contact", body = LeadResponse),
        (status = 422, description = "Malformed contact email", body = LeadResponse),
        (status = 500, description = "Contact could not be processed", body = LeadResponse)
    ),
    tag = "leads"
)]
#[debug_handler]
pub async fn brevo_contact_webhook(
    State(state): State<Arc<AppState>>,
    Json(contact): Json<BrevoContactWebhook>,
) -> Response {
    tracing::info!("Received contact webhook from Brevo: {}", contact.email);
    tracing::debug!("Payload: {:?}", contact);

    if let Err(e) = contact.validate() {
        tracing::warn!("Rejected contact webhook for '{}': {e}", contact.email);
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(LeadResponse::failed(format!("Invalid contact: {e}"))),
        )
            .into_response();
    }

    match state.service.send_contact_notification(&contact).await {
        Ok(r) => {
            tracing::info!("Email sent successfully for contact: {}", contact.email);
            (StatusCode::OK, Json(r)).into_response()
        }
        Err(e) => {
            tracing::error!("Error processing Brevo contact webhook: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(LeadResponse::failed(format!(
                    "Error processing webhook: {e}"
                ))),
            )
                .into_response()
        }
    }
}

/// Brevo transactional email event (delivered, opened, click, ...).
#[utoipa::path(
    post,
    path = "/webhook/brevo",
    request_body = WebhookEvent,
    responses(
        (status = 200, description = "Event acknowledged", body = WebhookResponse),
        (status = 422, description = "Invalid recipient address")
    ),
    tag = "leads"
)]
#[debug_handler]
pub async fn brevo_event_webhook(Json(event): Json<WebhookEvent>) -> Response {
    if let Err(e) = event.validate() {
        tracing::warn!("Rejected webhook event '{}': {e}", event.event);
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
    }

    tracing::info!("Received webhook event: {} for {}", event.event, event.email);

    (StatusCode::OK, Json(events::process_event(&event))).into_response()
}
