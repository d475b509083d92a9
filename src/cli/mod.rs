// CLI module for grievance-relay
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// grievance-relay - Image-to-Gemini grievance classification relay
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "grievance-relay", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.grievance-relay/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Gemini API key, sent upstream as the `key` query parameter
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}
