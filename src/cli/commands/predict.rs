use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use forecast::{
    Clock, FixedClock, ForecastClient, ForecastRequestHandler, ResultView, Submission,
    SubmissionStatus, SystemClock, Transport,
};
use tracing::{debug, error, info, trace};

use crate::config::AppConfig;

/// Runs one forecast submission and renders the outcome into `view`.
///
/// The failure text is rendered like any other result; the underlying error
/// is returned as well so the process exits non-zero and logs the cause.
pub async fn predict<T, V>(
    config: &AppConfig,
    transport: T,
    view: V,
    date: Option<NaiveDate>,
) -> Result<Submission>
where
    T: Transport,
    V: ResultView,
{
    trace!("Entering predict command");
    let clock: Box<dyn Clock> = match date {
        Some(date) => {
            debug!("Using fixed anchor date {}", date);
            Box::new(FixedClock(date))
        }
        None => Box::new(SystemClock::new(config.date_basis)),
    };

    let handler = ForecastRequestHandler::new(
        ForecastClient::new(transport, config.endpoints()),
        view,
        clock,
        config.submission_policy,
    );

    info!("Requesting forecast from {}", config.endpoints().predict_url());
    let submission = handler.submit().await;

    if let SubmissionStatus::Failed(e) = &submission.status {
        error!(kind = e.kind(), "Forecast request failed: {}", e);
        return Err(anyhow!(e.clone()).context("Forecast request failed"));
    }

    trace!("predict command completed");
    Ok(submission)
}
