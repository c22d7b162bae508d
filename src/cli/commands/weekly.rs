use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use common::week_containing;
use forecast::{
    Clock, DisplayMessage, ForecastClient, ResultView, SystemClock, Transport, display_for,
};
use tracing::{debug, error, info, trace};

use crate::config::AppConfig;

/// Requests the aggregate for the week containing `date` (today when omitted).
pub async fn weekly<T, V>(
    config: &AppConfig,
    transport: T,
    view: V,
    date: Option<NaiveDate>,
) -> Result<DisplayMessage>
where
    T: Transport,
    V: ResultView,
{
    trace!("Entering weekly command");
    let order_date = date.unwrap_or_else(|| SystemClock::new(config.date_basis).today());
    let week = week_containing(order_date).with_context(|| {
        format!("The week containing {} is outside the supported calendar", order_date)
    })?;
    debug!("Week of {} spans {} to {}", order_date, week.start, week.end);

    let client = ForecastClient::new(transport, config.endpoints());
    info!("Requesting weekly forecast from {}", config.endpoints().weekly_url());
    let result = client.weekly_forecast(order_date).await;

    let message = display_for(&result, |response| DisplayMessage::WeeklyForecast {
        week,
        predicted_sales: response.predicted_sales,
    });
    view.show(&message);

    if let Err(e) = result {
        error!(kind = e.kind(), "Weekly forecast request failed: {}", e);
        return Err(anyhow!(e).context("Weekly forecast request failed"));
    }

    Ok(message)
}
