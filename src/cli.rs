use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::debug;

pub mod commands;

use crate::config::load_config;
use crate::transport::ReqwestTransport;
use crate::view::TerminalView;
use commands::{predict, status, weekly};

#[derive(Parser)]
#[command(name = "forecast-client")]
#[command(about = "Requests sales forecasts from the prediction service")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    ///
    /// Defaults to forecast.toml in the working directory when present.
    #[arg(short, long, global = true, env = "FORECAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the prediction service
    ///
    /// Format: SCHEME://HOST:PORT (e.g., http://127.0.0.1:8000)
    #[arg(short, long, global = true, env = "FORECAST_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Request the predicted sales total for the next 7 days
    Predict {
        /// Anchor date instead of today (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Request the predicted sales for the Monday-to-Sunday week containing a date
    Weekly {
        /// Any date inside the week, today when omitted (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Show the prediction service's welcome message
    Status,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = load_config(self.config.as_deref(), self.base_url.as_deref())?;
        debug!("Prediction service: {}", config.api.base_url);

        let transport = ReqwestTransport::new(config.request_timeout_secs.map(Duration::from_secs))?;
        let view = TerminalView::stdout();

        match self.command {
            Commands::Predict { date } => {
                predict(&config, transport, &view, date).await?;
            }
            Commands::Weekly { date } => {
                weekly(&config, transport, &view, date).await?;
            }
            Commands::Status => {
                status(&config, transport, &view).await?;
            }
        }
        Ok(())
    }
}
