use anyhow::{Result, anyhow};
use forecast::{DisplayMessage, ForecastClient, ResultView, Transport, display_for};
use tracing::{error, info};

use crate::config::AppConfig;

/// Prints the service's welcome message, a quick check that the backend is up.
pub async fn status<T, V>(config: &AppConfig, transport: T, view: V) -> Result<DisplayMessage>
where
    T: Transport,
    V: ResultView,
{
    let client = ForecastClient::new(transport, config.endpoints());
    info!("Checking prediction service at {}", config.endpoints().status_url());
    let result = client.status().await;

    let message = display_for(&result, |status| DisplayMessage::Status {
        message: status.message.clone(),
    });
    view.show(&message);

    if let Err(e) = result {
        error!(kind = e.kind(), "Status request failed: {}", e);
        return Err(anyhow!(e).context("Prediction service is unreachable"));
    }

    Ok(message)
}
