//! Public HTTP Routes
//!
//! Unauthenticated endpoints: liveness banner, health check and the rope
//! page reached by scanning a rope's NFC tag.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::state::{rope_error, ApiError, RopeState};
use crate::rope::{RopeId, RopeOverview};

/// Liveness banner served at `/`
pub const HOME_BANNER: &str = "Rope Tagging System is Live";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create public routes
pub fn public_routes(state: Arc<RopeState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/rope/:rope_id", get(rope_overview_handler))
        .with_state(state)
}

async fn home_handler() -> &'static str {
    HOME_BANNER
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Rope attributes, computed status and history
async fn rope_overview_handler(
    State(state): State<Arc<RopeState>>,
    Path(rope_id): Path<String>,
) -> Result<Json<RopeOverview>, ApiError> {
    let rope_id = RopeId::parse(&rope_id).map_err(rope_error)?;
    state
        .service
        .overview(&rope_id)
        .map(Json)
        .map_err(rope_error)
}
