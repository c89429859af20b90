//! Shared handler state and error mapping.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use crate::auth::AdminCredentials;
use crate::rope::{Clock, RopeError, RopeService};
use crate::store::RopeStore;

/// Rope service over any store and clock
pub type DynRopeService = RopeService<Box<dyn RopeStore>, Box<dyn Clock>>;

/// State shared by public and admin handlers
pub struct RopeState {
    pub service: DynRopeService,
    pub admin: AdminCredentials,
}

impl RopeState {
    pub fn new<S, C>(store: S, clock: C, admin: AdminCredentials) -> Self
    where
        S: RopeStore + 'static,
        C: Clock + 'static,
    {
        Self {
            service: RopeService::new(Box::new(store), Box::new(clock)),
            admin,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&RopeError> for ErrorResponse {
    fn from(err: &RopeError) -> Self {
        Self {
            error: err.public_message(),
            code: err.status_code(),
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a rope error to a response; server faults are logged and kept opaque
pub fn rope_error(err: RopeError) -> ApiError {
    if err.is_client_error() {
        warn!(event = "REQUEST_REJECTED", code = err.status_code(), reason = %err);
    } else {
        let event = match err {
            RopeError::Persistence(_) => "PERSISTENCE_FAILURE",
            _ => "INTERNAL_FAILURE",
        };
        error!(event, detail = %err, "request failed");
    }

    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(&err)))
}
