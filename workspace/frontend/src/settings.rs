use forecast::{DateBasis, Endpoints, SubmissionPolicy};
use log::Level;
use serde_json::Value;
use web_sys::window;

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Prediction service host (e.g., "127.0.0.1" or "forecast.example.com")
    pub api_host: String,

    /// Prediction service port (e.g., 8000)
    pub api_port: u16,

    /// Path prefix in front of the service routes (empty by default)
    pub api_path: String,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Which calendar "today" is taken from
    pub date_basis: DateBasis,

    /// What to do with submissions made while a request is pending
    pub submission_policy: SubmissionPolicy,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "127.0.0.1".to_string(),
            api_port: 8000,
            api_path: String::new(),
            api_use_https: false,
            log_level: Level::Info,
            date_basis: DateBasis::Utc,
            submission_policy: SubmissionPolicy::LatestWins,
            debug_mode: false,
        }
    }
}

impl AppSettings {
    /// Create settings from environment/window location
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

                // In development, use more verbose logging
                if settings.debug_mode {
                    settings.log_level = Level::Debug;
                }
            }

            // Try to read from localStorage for custom settings
            if let Ok(Some(storage)) = window.local_storage() {
                if let Ok(Some(api_host)) = storage.get_item("forecast_api_host") {
                    settings.api_host = api_host;
                }

                if let Ok(Some(api_port)) = storage.get_item("forecast_api_port") {
                    if let Ok(port_val) = api_port.parse::<u16>() {
                        settings.api_port = port_val;
                    }
                }

                if let Ok(Some(api_path)) = storage.get_item("forecast_api_path") {
                    settings.api_path = api_path;
                }

                if let Ok(Some(use_https)) = storage.get_item("forecast_api_use_https") {
                    settings.api_use_https = use_https.to_lowercase() == "true";
                }

                if let Ok(Some(log_level)) = storage.get_item("forecast_log_level") {
                    settings.log_level = match log_level.to_lowercase().as_str() {
                        "error" => Level::Error,
                        "warn" => Level::Warn,
                        "info" => Level::Info,
                        "debug" => Level::Debug,
                        "trace" => Level::Trace,
                        _ => settings.log_level,
                    };
                }

                if let Ok(Some(basis)) = storage.get_item("forecast_date_basis") {
                    if let Some(basis) = parse_named(&basis) {
                        settings.date_basis = basis;
                    }
                }

                if let Ok(Some(policy)) = storage.get_item("forecast_submission_policy") {
                    if let Some(policy) = parse_named(&policy) {
                        settings.submission_policy = policy;
                    }
                }
            }
        }

        settings
    }

    /// Get the base API URL (protocol + host + port + path prefix)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!("{}://{}:{}{}", protocol, self.api_host, self.api_port, self.api_path)
    }

    /// Service routes under the configured base URL
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::with_base_url(self.api_base_url())
    }
}

// Settings values use the same names as the configuration files,
// e.g. "reject_while_in_flight".
fn parse_named<T: serde::de::DeserializeOwned>(value: &str) -> Option<T> {
    match serde_json::from_value(Value::String(value.trim().to_lowercase())) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::warn!("Ignoring unknown setting value '{}': {}", value, e);
            None
        }
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
