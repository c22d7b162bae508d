use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat, Map};
use forecast::{DateBasis, Endpoints, SubmissionPolicy, client};
use serde::Deserialize;
use tracing::{debug, info};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "forecast.toml";

/// Prefix of environment overrides, e.g. `FORECAST__API__BASE_URL`.
const ENV_PREFIX: &str = "FORECAST";

/// Location of the prediction service.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub predict_path: String,
    pub weekly_path: String,
    pub status_path: String,
}

/// Application configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// Overall request timeout; the HTTP client's default when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    pub date_basis: DateBasis,
    pub submission_policy: SubmissionPolicy,
}

impl AppConfig {
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            base_url: self.api.base_url.clone(),
            predict_path: self.api.predict_path.clone(),
            weekly_path: self.api.weekly_path.clone(),
            status_path: self.api.status_path.clone(),
        }
    }
}

/// Loads configuration
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults (the local prediction service)
/// 2. `path`, or `forecast.toml` in the working directory when it exists
/// 3. Environment variables (`FORECAST__*`)
/// 4. `base_url_override`, usually from the command line
pub fn load_config(path: Option<&Path>, base_url_override: Option<&str>) -> Result<AppConfig> {
    load_layered(path, base_url_override, None)
}

// `env` stands in for the process environment when given.
fn load_layered(
    path: Option<&Path>,
    base_url_override: Option<&str>,
    env: Option<Map<String, String>>,
) -> Result<AppConfig> {
    let file = match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            File::from(path).format(FileFormat::Toml).required(true)
        }
        None => {
            debug!("Looking for optional {}", DEFAULT_CONFIG_FILE);
            File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false)
        }
    };

    let builder = base_builder()?
        .add_source(file)
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__").source(env));

    finish(builder, base_url_override)
}

/// Loads configuration from TOML text layered over the defaults, ignoring the environment.
pub fn load_config_from_str(toml: &str, base_url_override: Option<&str>) -> Result<AppConfig> {
    let builder = base_builder()?.add_source(File::from_str(toml, FileFormat::Toml));
    finish(builder, base_url_override)
}

fn base_builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(Config::builder()
        .set_default("api.base_url", client::DEFAULT_BASE_URL)?
        .set_default("api.predict_path", client::PREDICT_PATH)?
        .set_default("api.weekly_path", client::WEEKLY_FORECAST_PATH)?
        .set_default("api.status_path", client::STATUS_PATH)?
        .set_default("date_basis", "utc")?
        .set_default("submission_policy", "latest_wins")?)
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    base_url_override: Option<&str>,
) -> Result<AppConfig> {
    let builder = match base_url_override {
        Some(base_url) => builder.set_override("api.base_url", base_url)?,
        None => builder,
    };

    let app_config: AppConfig = builder
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;

    debug!(?app_config, "Configuration loaded");
    Ok(app_config)
}
