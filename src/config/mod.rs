// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::cli::Args;
use crate::error::{RelayError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments and their conventional env vars (`PORT`, `GEMINI_API_KEY`)
    /// 2. Environment variables (`GRIEVANCE_RELAY__SECTION__KEY`)
    /// 3. Config file
    /// 4. Defaults (lowest)
    pub fn load(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => File::from(path.clone()).required(true),
            None => File::with_name(&Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(Environment::with_prefix("GRIEVANCE_RELAY").separator("__"))
            .set_override_option("server.port", args.port.map(i64::from))?
            .set_override_option("gemini.api_key", args.api_key.clone())?
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.image.jpeg_quality) {
            return Err(RelayError::Config(format!(
                "image.jpeg_quality must be between 1 and 100, got {}",
                self.image.jpeg_quality
            )));
        }
        if self.gemini.api_url.trim().is_empty() {
            return Err(RelayError::Config("gemini.api_url must not be empty".to_string()));
        }
        Ok(())
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".grievance-relay")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
