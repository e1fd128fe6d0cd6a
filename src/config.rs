use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub monitoring: MonitoringConfig,
    pub quality: QualityConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: String,
    #[serde(default = "default_json_logs")]
    pub json_logs: bool,
}

fn default_json_logs() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct QualityConfig {
    /// Maximum ids accepted by one batch assessment.
    pub batch_limit: usize,
    /// Upper bound on the statistics sample size.
    pub statistics_max_sample: usize,
    pub default_low_quality_threshold: f64,
    /// How many recent items the low-quality finder re-scores.
    pub low_quality_scan_limit: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            batch_limit: 50,
            statistics_max_sample: 1000,
            default_low_quality_threshold: 0.5,
            low_quality_scan_limit: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

impl AppConfig {
    /// Load configuration from a TOML file, overlaying environment variables.
    ///
    /// `FOOD_QUALITY_DATABASE_PATH` overrides `database.path`.
    pub fn load(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config = Self::parse(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if let Ok(db_path) = std::env::var("FOOD_QUALITY_DATABASE_PATH") {
            config.database.path = db_path;
        }

        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        if config.quality.batch_limit == 0 {
            anyhow::bail!("quality.batch_limit must be at least 1");
        }
        if !(0.0..=1.0).contains(&config.quality.default_low_quality_threshold) {
            anyhow::bail!(
                "quality.default_low_quality_threshold must be between 0 and 1, got {}",
                config.quality.default_low_quality_threshold
            );
        }
        Ok(config)
    }
}
