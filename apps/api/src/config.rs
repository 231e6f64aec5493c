use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::matching::policy::MatchPolicy;

/// Application configuration loaded from environment variables.
/// All values have defaults; the service starts with no environment at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Directory the versioned report files are written to.
    pub output_dir: PathBuf,
    /// Scoring-policy variant, resolved once at startup (`strict` | `lenient`).
    pub policy: MatchPolicy,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let policy_name = std::env::var("MATCH_POLICY").unwrap_or_else(|_| "strict".to_string());
        let policy = MatchPolicy::from_name(&policy_name)
            .with_context(|| format!("unknown MATCH_POLICY '{policy_name}' (strict | lenient)"))?;

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            output_dir: std::env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| "outputs".to_string())
                .into(),
            policy,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
