//! Axum-based HTTP server implementation for the grievance relay.
//!
//! This module sets up the HTTP server, configures routes, and handles
//! image uploads, relaying each one to the Google Gemini API for
//! classification.
//!
//! # Components
//!
//! - `handlers`: Endpoint implementations (classify, health, metrics).
//! - `middleware`: Request ID tracking and CORS.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{HealthResponse, HealthStatus, IMAGE_FIELD};
pub use routes::{create_router, AppState};
