//! Admin HTTP Routes
//!
//! Rope registration and inspection / fall logging, behind the operator's
//! Basic auth credentials.

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::warn;

use super::state::{rope_error, ApiError, ErrorResponse, RopeState};
use crate::auth::ADMIN_REALM;
use crate::rope::{
    FallRecord, InspectionRecord, NewFall, NewInspection, NewRope, Rope, RopeId, RopeSummary,
};

/// Admin routes with shared state
pub fn admin_routes(state: Arc<RopeState>) -> Router {
    Router::new()
        .route("/ropes", get(list_ropes_handler).post(create_rope_handler))
        .route("/ropes/:rope_id/inspections", post(log_inspection_handler))
        .route("/ropes/:rope_id/falls", post(log_fall_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .with_state(state)
}

// ==================
// Auth Gate
// ==================

async fn require_admin(
    State(state): State<Arc<RopeState>>,
    request: Request,
    next: Next,
) -> Response {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match state.admin.authenticate_header(header_value) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            warn!(
                event = "ADMIN_AUTH_REJECTED",
                path = %request.uri().path(),
                reason = %e,
                "admin request rejected"
            );
            let body = ErrorResponse {
                error: e.to_string(),
                code: e.status_code(),
            };
            let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
            let challenge = format!("Basic realm=\"{}\"", ADMIN_REALM);
            if let Ok(value) = HeaderValue::from_str(&challenge) {
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, value);
            }
            response
        }
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct RopeListResponse {
    pub ropes: Vec<RopeSummary>,
    pub total: usize,
}

// ==================
// Handlers
// ==================

async fn list_ropes_handler(
    State(state): State<Arc<RopeState>>,
) -> Result<Json<RopeListResponse>, ApiError> {
    let ropes = state.service.list_ropes().map_err(rope_error)?;
    Ok(Json(RopeListResponse {
        total: ropes.len(),
        ropes,
    }))
}

async fn create_rope_handler(
    State(state): State<Arc<RopeState>>,
    Json(request): Json<NewRope>,
) -> Result<(StatusCode, Json<Rope>), ApiError> {
    let rope = state.service.register_rope(request).map_err(rope_error)?;
    Ok((StatusCode::CREATED, Json(rope)))
}

async fn log_inspection_handler(
    State(state): State<Arc<RopeState>>,
    Path(rope_id): Path<String>,
    Json(request): Json<NewInspection>,
) -> Result<(StatusCode, Json<InspectionRecord>), ApiError> {
    let rope_id = RopeId::parse(&rope_id).map_err(rope_error)?;
    let record = state
        .service
        .log_inspection(&rope_id, request)
        .map_err(rope_error)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn log_fall_handler(
    State(state): State<Arc<RopeState>>,
    Path(rope_id): Path<String>,
    Json(request): Json<NewFall>,
) -> Result<(StatusCode, Json<FallRecord>), ApiError> {
    let rope_id = RopeId::parse(&rope_id).map_err(rope_error)?;
    let record = state.service.log_fall(&rope_id, request).map_err(rope_error)?;
    Ok((StatusCode::CREATED, Json(record)))
}
