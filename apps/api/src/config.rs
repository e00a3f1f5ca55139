use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::recommendation::engine::DEFAULT_RECOMMENDATION_LIMIT;

/// Largest accepted `STORE_LATENCY_SCALE`; a 300 ms read becomes five minutes.
pub const MAX_STORE_LATENCY_SCALE: f64 = 1000.0;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding JSON seed files. Bundled seeds are used when unset.
    pub seed_data_dir: Option<PathBuf>,
    /// Multiplier on the simulated store latency. 0 disables it.
    pub store_latency_scale: f64,
    pub recommendation_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            seed_data_dir: None,
            store_latency_scale: 1.0,
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Config::default();

        let store_latency_scale = match var("STORE_LATENCY_SCALE") {
            Some(raw) => raw
                .parse::<f64>()
                .context("STORE_LATENCY_SCALE must be a number")?,
            None => defaults.store_latency_scale,
        };
        if !store_latency_scale.is_finite() || store_latency_scale < 0.0 {
            bail!("STORE_LATENCY_SCALE must be a non-negative number, got {store_latency_scale}");
        }
        if store_latency_scale > MAX_STORE_LATENCY_SCALE {
            bail!(
                "STORE_LATENCY_SCALE must be at most {MAX_STORE_LATENCY_SCALE}, got {store_latency_scale}"
            );
        }

        Ok(Config {
            port: match var("PORT") {
                Some(raw) => raw
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: var("RUST_LOG").unwrap_or(defaults.rust_log),
            seed_data_dir: var("SEED_DATA_DIR").map(PathBuf::from),
            store_latency_scale,
            recommendation_limit: match var("RECOMMENDATION_LIMIT") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("RECOMMENDATION_LIMIT must be a non-negative integer")?,
                None => defaults.recommendation_limit,
            },
        })
    }
}
