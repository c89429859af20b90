//! # Ropelog HTTP Server Module
//!
//! This module provides the HTTP API for the rope tracker.
//!
//! # Endpoints
//!
//! - `/` - Liveness banner
//! - `/health` - Health check
//! - `/rope/:rope_id` - Public rope page (NFC tag target)
//! - `/admin/*` - Registration and event logging (Basic auth)

pub mod admin_routes;
pub mod config;
pub mod public_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use server::{build_router, HttpServer};
pub use state::{DynRopeService, ErrorResponse, RopeState};
