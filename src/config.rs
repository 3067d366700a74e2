use crate::render::Theme;
use anyhow::Context;
use forecast_insight::interpret::range_ratio;
use forecast_insight::models::ForecastSummary;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

// Per-IP limits for the interpret endpoint
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64, // seconds until one request of the quota is replenished
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 1,
            burst_size: 20,
        }
    }
}

// YAML-serializable configuration structure
#[derive(Serialize, Deserialize, Debug)]
pub struct ConfigYaml {
    pub page_title: Option<String>,
    pub data_path: String,
    pub reload_interval_secs: Option<u64>,
    pub default_theme: Option<String>,
    pub forecast: Option<ForecastSummary>,
    pub rate_limit: Option<RateLimitConfig>,
    pub environment: Option<String>,
    pub port: u16,
}

// Holds application-wide settings
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub page_title: String,
    pub data_path: PathBuf,
    pub reload_interval: Duration,
    pub default_theme: Theme,
    pub forecast: ForecastSummary,
    pub rate_limit: RateLimitConfig,
    pub environment: String,
    pub port: u16,
}

pub type SharedConfig = Arc<AppConfig>;

const DEFAULT_PORT: u16 = 8501;
const DEFAULT_DATA_PATH: &str = "amzn_features_final.csv";
const DEFAULT_RELOAD_INTERVAL_SECS: u64 = 30;

impl AppConfig {
    // Load configuration from YAML file or environment variables
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(config_file) = env::var("CONFIG_FILE") {
            Self::from_yaml(&config_file)
        } else {
            Self::from_env()
        }
    }

    pub fn from_yaml(file_path: &str) -> anyhow::Result<Self> {
        let yaml_content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read config file {}", file_path))?;
        Self::from_yaml_str(&yaml_content)
    }

    pub fn from_yaml_str(yaml_content: &str) -> anyhow::Result<Self> {
        let yaml_config: ConfigYaml =
            serde_yaml::from_str(yaml_content).context("Failed to parse YAML config")?;

        let default_theme = match yaml_config.default_theme {
            Some(name) => name.parse::<Theme>()?,
            None => Theme::default(),
        };

        let config = Self {
            page_title: yaml_config.page_title.unwrap_or_else(default_page_title),
            data_path: PathBuf::from(yaml_config.data_path),
            reload_interval: Duration::from_secs(
                yaml_config.reload_interval_secs.unwrap_or(DEFAULT_RELOAD_INTERVAL_SECS),
            ),
            default_theme,
            forecast: yaml_config.forecast.unwrap_or_default(),
            rate_limit: yaml_config.rate_limit.unwrap_or_default(),
            environment: yaml_config.environment.unwrap_or_else(|| "development".to_string()),
            port: yaml_config.port,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from a key lookup, falling back to defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let demo = ForecastSummary::demo();

        let forecast = ForecastSummary {
            subject_label: lookup("FORECAST_SUBJECT").unwrap_or(demo.subject_label),
            horizon_label: lookup("FORECAST_HORIZON").unwrap_or(demo.horizon_label),
            median_return_pct: parse_or(&lookup, "FORECAST_MEDIAN_RETURN_PCT", demo.median_return_pct)?,
            lower_price: parse_or(&lookup, "FORECAST_LOWER_PRICE", demo.lower_price)?,
            upper_price: parse_or(&lookup, "FORECAST_UPPER_PRICE", demo.upper_price)?,
        };

        let default_theme = match lookup("DEFAULT_THEME") {
            Some(name) => name.parse::<Theme>()?,
            None => Theme::default(),
        };

        let defaults = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            per_second: parse_or(&lookup, "RATE_LIMIT_PER_SECOND", defaults.per_second)?,
            burst_size: parse_or(&lookup, "RATE_LIMIT_BURST", defaults.burst_size)?,
        };

        let config = Self {
            page_title: lookup("PAGE_TITLE").unwrap_or_else(default_page_title),
            data_path: PathBuf::from(lookup("DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())),
            reload_interval: Duration::from_secs(parse_or(
                &lookup,
                "RELOAD_INTERVAL",
                DEFAULT_RELOAD_INTERVAL_SECS,
            )?),
            default_theme,
            forecast,
            rate_limit,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        range_ratio(self.forecast.lower_price, self.forecast.upper_price)
            .context("Configured forecast bounds are invalid")?;
        anyhow::ensure!(!self.reload_interval.is_zero(), "Reload interval must be positive");
        anyhow::ensure!(
            self.rate_limit.per_second > 0 && self.rate_limit.burst_size > 0,
            "Rate limit values must be positive"
        );
        Ok(())
    }
}

fn default_page_title() -> String {
    forecast_insight::api::DEFAULT_TITLE.to_string()
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: '{}' ({})", key, raw, e)),
        None => Ok(default),
    }
}
