use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;

use std::sync::Arc;

use super::AppState;
use crate::{
    dto::{LeadRequest, LeadResponse},
    service::LeadServiceError,
};

#[utoipa::path(
    post,
    path = "/bpo-acceptor-lead",
    request_body = LeadRequest,
    responses(
        (status = 200, description = "Lead submitted and notification sent", body = LeadResponse),
        (status = 422, description = "Invalid lead fields", body = LeadResponse),
        (status = 500, description = "Notification could not be sent", body = LeadResponse)
    ),
    tag = "leads"
)]
#[debug_handler]
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LeadRequest>,
) -> Response {
    match state.service.send_lead_notification(&payload).await {
        Ok(r) => (StatusCode::OK, Json(r)).into_response(),
        Err(e) => {
            tracing::error!("Failed to process lead: {e}");
            let status = match e {
                LeadServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                LeadServiceError::Render(_) | LeadServiceError::Mail(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (status, Json(LeadResponse::failed(e.to_string()))).into_response()
        }
    }
}
