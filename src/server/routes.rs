// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{classify_handler, health_handler, metrics_handler};
use super::middleware::{cors_layer, request_id_layers};
use crate::config::AppConfig;
use crate::error::Result;
use crate::gemini::GeminiClient;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gemini_client: Arc<GeminiClient>,
}

pub fn create_router(config: AppConfig, gemini_client: GeminiClient) -> Result<Router> {
    let max_body_bytes = config.server.max_body_bytes;
    let state = AppState {
        config: Arc::new(config),
        gemini_client: Arc::new(gemini_client),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/classify", post(classify_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        // Replaces axum's 2MB default so phone photos fit
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
