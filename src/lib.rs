//! ropelog - climbing rope lifecycle tracking
//!
//! Ropes are registered with their manufacturing metadata, inspected
//! periodically and logged when they hold a fall. Each rope's safety status
//! (ACTIVE, INSPECTION DUE, DAMAGED) is derived from those logs and served
//! on a public per-rope page; registration and logging sit behind a single
//! operator login.

pub mod auth;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod rope;
pub mod store;
