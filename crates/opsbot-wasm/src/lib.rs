use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use opsbot_widget::WidgetConfig;

pub mod dom;
pub mod dom_view;
pub mod http;
mod widget;

pub use dom_view::DomView;
pub use http::HttpTransport;

/// Runs once when the module loads: panics and `log` output go to the console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());

    log::info!("opsbot WASM initialized");
}

/// Bind the chat widget to the current page.
///
/// `config_json` optionally overrides [`WidgetConfig`] fields, e.g.
/// `{"endpoint": "/chat", "history_window": 6}`.
#[wasm_bindgen]
pub fn init_chat_widget(config_json: Option<String>) -> Result<(), JsValue> {
    let config = WidgetConfig::from_optional_json(config_json.as_deref())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    log::info!("Initializing chat widget against {}", config.endpoint);
    widget::ChatWidget::new(config)?.start()
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("opsbot needs a browser window"))
}

fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("opsbot needs a page document"))
}
