//! Configuration data structures for the grievance relay.
//!
//! This module defines the schema for the application settings: the HTTP
//! listener, the upstream Gemini endpoint, JPEG normalization and logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, body limit).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Image normalization settings.
    #[serde(default)]
    pub image: ImageConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `5000`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body in bytes.
    /// Default: 50MB
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Settings for the upstream Gemini API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Full `generateContent` URL of the classification model.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key sent as the `key` query parameter. Not validated at startup.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

/// Settings for JPEG normalization of uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// JPEG encoder quality (1-100).
    /// Default: `75`
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            timeout_seconds: None,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_body_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent"
        .to_string()
}

fn default_jpeg_quality() -> u8 {
    75
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
