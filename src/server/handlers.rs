// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::{RelayError, Result};
use crate::metrics;
use crate::models::grievance::{classification_request, GrievanceSummary};
use crate::utils::logging::sanitize;
use crate::vision::{normalize_image, UploadedImage};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Name of the multipart file field carrying the image.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

/// Handler for /health. Reports configuration only; never calls upstream.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    let key_check = if state.gemini_client.has_api_key() {
        HealthCheck {
            status: "ok".to_string(),
            message: "API key configured".to_string(),
        }
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "warning".to_string(),
            message: "No API key configured; upstream will reject requests".to_string(),
        }
    };
    checks.insert("api_key".to_string(), key_check);

    let upstream_check = HealthCheck {
        status: "ok".to_string(),
        message: format!(
            "Upstream host: {}",
            state.gemini_client.api_host().unwrap_or_else(|| "unknown".to_string())
        ),
    };
    checks.insert("upstream".to_string(), upstream_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handler for /metrics (Prometheus text format)
pub async fn metrics_handler() -> Response {
    match metrics::gather_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => RelayError::Unhandled(e.to_string()).into_response(),
    }
}

/// Handler for POST /classify
///
/// Always answers with JSON: the upstream body on success, otherwise the
/// error shape produced by [`RelayError`].
pub async fn classify_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Response {
    let start = Instant::now();

    let response = match classify(&state, multipart).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            match &e {
                RelayError::MissingInput => warn!("Rejected classify request: no image file"),
                RelayError::Upstream { status, .. } => {
                    warn!("Upstream rejected classification: HTTP {}", status)
                }
                other => error!("Classification failed: {}", sanitize(&other.to_string())),
            }
            e.into_response()
        }
    };

    metrics::record_request(
        "POST",
        "/classify",
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}

async fn classify(
    state: &AppState,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Value> {
    // 1. Field presence check
    let upload = read_image_field(multipart).await?;

    info!(
        "Received image: file={:?}, declared={:?}, detected={:?}, bytes={}",
        upload.file_name,
        upload.content_type,
        upload.detected_mime_type(),
        upload.bytes.len()
    );

    // 2. Decode and re-encode as JPEG off the async workers
    let quality = state.config.image.jpeg_quality;
    let normalized =
        tokio::task::spawn_blocking(move || normalize_image(&upload, quality)).await??;
    metrics::record_normalized_image(normalized.jpeg_len);

    // 3. Single upstream call with the fixed prompt
    let request = classification_request(normalized.into());
    let body = state.gemini_client.generate_content(&request).await?;

    match GrievanceSummary::from_response(&body) {
        Some(summary) => info!(
            "Classified grievance: title={:?}, category={:?}, known_department={}",
            summary.title,
            summary.category,
            summary.department().is_some()
        ),
        None => debug!("Upstream response carried no parsable grievance summary"),
    }

    Ok(body)
}

/// Find the first `image` file part.
///
/// Only parts with a file name count as files. A body that is not multipart,
/// or a multipart stream that breaks before the image is found, is reported
/// as missing input.
async fn read_image_field(
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<UploadedImage> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Request body is not multipart: {}", e);
        RelayError::MissingInput
    })?;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(RelayError::MissingInput),
            Err(e) => {
                debug!("Malformed multipart body: {}", e);
                return Err(RelayError::MissingInput);
            }
        };

        if field.name() != Some(IMAGE_FIELD) || field.file_name().is_none() {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        // Hitting `max_body_bytes` mid-part lands here as a 500, not a 413
        let bytes = field
            .bytes()
            .await
            .map_err(|e| RelayError::Unhandled(format!("Failed to read image upload: {}", e)))?;

        return Ok(UploadedImage {
            bytes,
            content_type,
            file_name,
        });
    }
}
