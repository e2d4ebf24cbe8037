use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;

use std::sync::Arc;

use super::AppState;
use crate::dto::{HealthResponse, RootResponse};

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "leads"
)]
#[debug_handler]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    let body = HealthResponse {
        status: "healthy".to_string(),
        service: state.app_name.clone(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service overview", body = RootResponse)),
    tag = "leads"
)]
#[debug_handler]
pub async fn root(State(state): State<Arc<AppState>>) -> Response {
    let body = RootResponse {
        message: format!("Welcome to {}", state.app_name),
        docs: "/docs".to_string(),
        health: "/health".to_string(),
        submit_lead: "/bpo-acceptor-lead".to_string(),
    };
    (StatusCode::OK, Json(body)).into_response()
}
