use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use opsbot_widget::{ChatController, KeyAction, WidgetConfig};

use crate::dom;
use crate::dom_view::DomView;
use crate::http::HttpTransport;

type Controller = ChatController<DomView, HttpTransport>;

/// Event wiring between the page and the controller
pub struct ChatWidget {
    controller: Rc<Controller>,
}

impl ChatWidget {
    pub fn new(config: WidgetConfig) -> Result<Self, JsValue> {
        let view = DomView::bind(&config.elements)?;
        let transport = HttpTransport::from_config(&config);

        Ok(Self {
            controller: Rc::new(ChatController::new(view, transport, config)),
        })
    }

    pub fn start(self) -> Result<(), JsValue> {
        self.setup_auto_resize()?;
        self.setup_keyboard()?;
        self.setup_send_button()?;
        self.setup_clear_button()?;

        let controller = self.controller.clone();
        wasm_bindgen_futures::spawn_local(async move {
            controller.start().await;
        });

        Ok(())
    }

    fn setup_auto_resize(&self) -> Result<(), JsValue> {
        let input = self.controller.view().input().clone();
        let target = input.clone();

        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            dom::fit_to_content(&target);
        }) as Box<dyn FnMut(_)>);

        input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    fn setup_keyboard(&self) -> Result<(), JsValue> {
        let input = self.controller.view().input().clone();
        let controller = self.controller.clone();

        let closure = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            let action = KeyAction::from_key(&event.key(), event.shift_key());
            if action.prevents_default() {
                event.prevent_default();
            }
            if action == KeyAction::Submit {
                spawn_submit(controller.clone());
            }
        }) as Box<dyn FnMut(_)>);

        input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    fn setup_send_button(&self) -> Result<(), JsValue> {
        let controller = self.controller.clone();
        dom::add_click_listener(self.controller.view().send_button(), move || {
            spawn_submit(controller.clone());
        })
    }

    fn setup_clear_button(&self) -> Result<(), JsValue> {
        let controller = self.controller.clone();
        dom::add_click_listener(self.controller.view().clear_button(), move || {
            controller.clear();
        })
    }
}

/// Read the input now and send it on the next tick
fn spawn_submit(controller: Rc<Controller>) {
    let text = controller.view().input_value();
    wasm_bindgen_futures::spawn_local(async move {
        match controller.submit(&text).await {
            Ok(outcome) => log::debug!("Send finished: {:?}", outcome),
            Err(e) => log::warn!("Message not sent: {}", e),
        }
    });
}
