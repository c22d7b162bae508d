//! Submit handling: one form submission, one forecast request, one render.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::client::{ForecastClient, Reply};
use crate::clock::Clock;
use crate::error::{ForecastError, Result};
use crate::transport::Transport;
use crate::view::{DisplayMessage, ResultView};

/// How overlapping submissions are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPolicy {
    /// Every submission is sent; only the most recently sent one may render.
    #[default]
    LatestWins,
    /// Submissions are refused while one is outstanding and the trigger is disabled.
    RejectWhileInFlight,
}

/// The occurrence that triggers a forecast. Only its default action matters.
pub trait SubmitEvent {
    fn prevent_default(&self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionStatus {
    /// The service answered and the message was rendered
    Rendered(DisplayMessage),
    /// No usable response; the failure message was rendered
    Failed(ForecastError),
    /// A newer submission was issued before this one settled; nothing rendered
    Stale,
    /// Refused because another submission was in flight; nothing sent
    Busy,
}

/// Report of one submit cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub ticket: u64,
    /// Date sent as `start_date`, `None` when nothing was sent
    pub start_date: Option<NaiveDate>,
    pub status: SubmissionStatus,
}

/// Maps a client result onto what the output region should show.
pub fn display_for<T>(
    result: &Result<Reply<T>>,
    accepted: impl FnOnce(&T) -> DisplayMessage,
) -> DisplayMessage {
    match result {
        Ok(Reply::Accepted(payload)) => accepted(payload),
        Ok(Reply::Rejected { detail, .. }) => DisplayMessage::Rejected {
            detail: detail.clone(),
        },
        Err(_) => DisplayMessage::Unavailable,
    }
}

pub struct ForecastRequestHandler<T, V, C> {
    client: ForecastClient<T>,
    view: V,
    clock: C,
    policy: SubmissionPolicy,
    latest_ticket: Cell<u64>,
    in_flight: Cell<usize>,
}

impl<T, V, C> ForecastRequestHandler<T, V, C>
where
    T: Transport,
    V: ResultView,
    C: Clock,
{
    pub fn new(client: ForecastClient<T>, view: V, clock: C, policy: SubmissionPolicy) -> Self {
        Self {
            client,
            view,
            clock,
            policy,
            latest_ticket: Cell::new(0),
            in_flight: Cell::new(0),
        }
    }

    pub fn client(&self) -> &ForecastClient<T> {
        &self.client
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn policy(&self) -> SubmissionPolicy {
        self.policy
    }

    /// Number of submissions currently awaiting a response.
    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    /// Entry point for a submit event.
    ///
    /// The event's default action is suppressed before this returns, so hosts
    /// can call it from inside event dispatch and run the returned future
    /// later on their executor.
    pub fn handle_submit<E>(self: Rc<Self>, event: E) -> impl Future<Output = Submission> + 'static
    where
        E: SubmitEvent,
        T: 'static,
        V: 'static,
        C: 'static,
    {
        event.prevent_default();
        async move { self.submit().await }
    }

    /// Requests the forecast anchored on today and renders the result.
    #[instrument(skip(self), fields(policy = ?self.policy))]
    pub async fn submit(&self) -> Submission {
        if self.policy == SubmissionPolicy::RejectWhileInFlight && self.in_flight.get() > 0 {
            debug!("Submission refused, a request is already in flight");
            return Submission {
                ticket: self.latest_ticket.get(),
                start_date: None,
                status: SubmissionStatus::Busy,
            };
        }

        let ticket = self.latest_ticket.get() + 1;
        self.latest_ticket.set(ticket);
        let start_date = self.clock.today();
        debug!(ticket, %start_date, "Submitting forecast request");

        let result = {
            let _guard = InFlightGuard::enter(self);
            self.client.predict(start_date).await
        };

        if ticket != self.latest_ticket.get() {
            debug!(ticket, latest = self.latest_ticket.get(), "Discarding stale response");
            return Submission {
                ticket,
                start_date: Some(start_date),
                status: SubmissionStatus::Stale,
            };
        }

        let message = display_for(&result, |response| DisplayMessage::Forecast {
            total_predicted_sales: response.total_predicted_sales,
        });
        self.view.show(&message);

        let status = match result {
            Err(error) => {
                warn!(ticket, kind = error.kind(), %error, "Forecast request failed");
                SubmissionStatus::Failed(error)
            }
            Ok(_) => {
                info!(ticket, "Rendered: {}", message);
                SubmissionStatus::Rendered(message)
            }
        };

        Submission {
            ticket,
            start_date: Some(start_date),
            status,
        }
    }
}

// Keeps the in-flight count right even when a submission future is dropped
// before it settles.
struct InFlightGuard<'a, T, V: ResultView, C> {
    handler: &'a ForecastRequestHandler<T, V, C>,
}

impl<'a, T, V: ResultView, C> InFlightGuard<'a, T, V, C> {
    fn enter(handler: &'a ForecastRequestHandler<T, V, C>) -> Self {
        let count = handler.in_flight.get() + 1;
        handler.in_flight.set(count);
        if count == 1 && handler.policy == SubmissionPolicy::RejectWhileInFlight {
            handler.view.set_pending(true);
        }
        Self { handler }
    }
}

impl<T, V: ResultView, C> Drop for InFlightGuard<'_, T, V, C> {
    fn drop(&mut self) {
        let count = self.handler.in_flight.get().saturating_sub(1);
        self.handler.in_flight.set(count);
        if count == 0 && self.handler.policy == SubmissionPolicy::RejectWhileInFlight {
            self.handler.view.set_pending(false);
        }
    }
}
