//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with the conversion and status endpoints
//! - Request handlers for subtitle conversion and inspection
//! - Request logging and metrics middleware
//! - CORS and body size limits

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use routes::create_router;
