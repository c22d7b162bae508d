pub mod client;
pub mod clock;
pub mod error;
pub mod handler;
pub mod transport;
pub mod view;

#[cfg(test)]
mod testing;

pub use client::{Endpoints, ForecastClient, Reply};
pub use clock::{Clock, DateBasis, FixedClock, SystemClock};
pub use error::{ForecastError, Result};
pub use handler::{
    ForecastRequestHandler, Submission, SubmissionPolicy, SubmissionStatus, SubmitEvent, display_for,
};
pub use transport::{ApiRequest, JSON_CONTENT_TYPE, Method, RawResponse, Transport};
pub use view::{DisplayMessage, FETCH_FAILED_MESSAGE, ResultView};

/// Returns a handler wired the way the hosts use it most of the time.
///
/// "Today" comes from the system clock on the given `basis`; the client talks
/// to `endpoints` through `transport` and results are rendered into `view`.
pub fn default_handler<T, V>(
    transport: T,
    view: V,
    endpoints: Endpoints,
    basis: DateBasis,
    policy: SubmissionPolicy,
) -> ForecastRequestHandler<T, V, SystemClock>
where
    T: Transport,
    V: ResultView,
{
    ForecastRequestHandler::new(
        ForecastClient::new(transport, endpoints),
        view,
        SystemClock::new(basis),
        policy,
    )
}
