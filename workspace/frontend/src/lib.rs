#![cfg(target_arch = "wasm32")]

use wasm_bindgen::prelude::*;

pub mod api_client;
pub mod order_form;
pub mod settings;

#[wasm_bindgen(start)]
pub fn run_app() -> Result<(), JsValue> {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Forecast Frontend Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API base URL: {}", settings.api_base_url());
    log::debug!("Debug mode: {}", settings.debug_mode);

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("No document available"))?;
    let (form, output) = order_form::find_elements(&document)?;
    order_form::bind_order_form(document, form, output, &settings)?;

    log::info!("Application initialized successfully");
    Ok(())
}
