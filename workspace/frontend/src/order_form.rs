//! Binds the forecast handler to the page's order form and result region.

use std::rc::Rc;

use forecast::{
    DisplayMessage, ForecastRequestHandler, ResultView, SubmissionStatus, SubmitEvent, SystemClock,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlFormElement};

use crate::api_client::GlooTransport;
use crate::settings::AppSettings;

/// Id of the form whose submission triggers a forecast.
pub const ORDER_FORM_ID: &str = "orderForm";
/// Id of the element that receives the result heading.
pub const FORECAST_RESULT_ID: &str = "forecastResult";

type BrowserHandler = ForecastRequestHandler<GlooTransport, ElementView, SystemClock>;

/// Newtype so the shared handler can suppress a DOM event's default action.
pub struct DomSubmitEvent(pub Event);

impl SubmitEvent for DomSubmitEvent {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// Replaces the output element's content with a single `<h3>`.
pub struct ElementView {
    document: Document,
    output: Element,
    /// Submit control disabled while a request is pending, if the policy asks for it
    trigger: Option<Element>,
}

impl ElementView {
    pub fn new(document: Document, output: Element, trigger: Option<Element>) -> Self {
        Self {
            document,
            output,
            trigger,
        }
    }

    fn render(&self, text: &str) -> Result<(), JsValue> {
        let heading = self.document.create_element("h3")?;
        heading.set_text_content(Some(text));
        self.output.set_inner_html("");
        self.output.append_child(&heading)?;
        Ok(())
    }
}

impl ResultView for ElementView {
    fn show(&self, message: &DisplayMessage) {
        if let Err(e) = self.render(&message.to_string()) {
            log::error!("Failed to render forecast result: {:?}", e);
        }
    }

    fn set_pending(&self, pending: bool) {
        let Some(trigger) = &self.trigger else {
            return;
        };
        let result = if pending {
            trigger.set_attribute("disabled", "")
        } else {
            trigger.remove_attribute("disabled")
        };
        if let Err(e) = result {
            log::warn!("Failed to toggle submit control: {:?}", e);
        }
    }
}

/// Looks up the form and output elements by id.
pub fn find_elements(document: &Document) -> Result<(HtmlFormElement, Element), JsValue> {
    let form = document
        .get_element_by_id(ORDER_FORM_ID)
        .ok_or_else(|| JsValue::from_str(&format!("No element with id '{}'", ORDER_FORM_ID)))?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| JsValue::from_str(&format!("'{}' is not a form", ORDER_FORM_ID)))?;
    let output = document
        .get_element_by_id(FORECAST_RESULT_ID)
        .ok_or_else(|| JsValue::from_str(&format!("No element with id '{}'", FORECAST_RESULT_ID)))?;
    Ok((form, output))
}

/// Attaches the submit listener for the lifetime of the page.
pub fn bind_order_form(
    document: Document,
    form: HtmlFormElement,
    output: Element,
    settings: &AppSettings,
) -> Result<(), JsValue> {
    let trigger = form.query_selector("[type=submit]")?;
    let view = ElementView::new(document, output, trigger);
    let handler: Rc<BrowserHandler> = Rc::new(forecast::default_handler(
        GlooTransport,
        view,
        settings.endpoints(),
        settings.date_basis,
        settings.submission_policy,
    ));

    let policy = handler.policy();

    let on_submit = Closure::<dyn FnMut(_)>::new(move |event: Event| {
        log::debug!("Order form submitted ({} already in flight)", handler.in_flight());
        let pending = Rc::clone(&handler).handle_submit(DomSubmitEvent(event));
        wasm_bindgen_futures::spawn_local(async move {
            let submission = pending.await;
            match submission.status {
                SubmissionStatus::Failed(e) => {
                    log::warn!("Submission {} failed ({}): {}", submission.ticket, e.kind(), e)
                }
                SubmissionStatus::Stale => {
                    log::debug!("Submission {} superseded", submission.ticket)
                }
                SubmissionStatus::Busy => log::debug!("Submission ignored, request pending"),
                SubmissionStatus::Rendered(_) => {
                    log::trace!("Submission {} rendered", submission.ticket)
                }
            }
        });
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    log::info!(
        "Forecast handler bound to #{} with {:?} policy",
        ORDER_FORM_ID,
        policy
    );
    Ok(())
}
