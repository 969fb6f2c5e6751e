use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlTextAreaElement, Window};

use opsbot_types::Sender;
use opsbot_widget::{ChatView, ConnectionStatus, ElementIds};

use crate::dom;

/// [`ChatView`] over the page's elements
pub struct DomView {
    window: Window,
    document: Document,
    input: HtmlTextAreaElement,
    send_button: HtmlButtonElement,
    clear_button: Element,
    messages: Element,
    loading: HtmlElement,
    status: Option<Element>,
}

impl DomView {
    /// Look up every element the widget needs. Only the status badge is
    /// optional.
    pub fn bind(ids: &ElementIds) -> Result<Self, JsValue> {
        let window = crate::window()?;
        let document = crate::document()?;

        let status = ids
            .status
            .as_deref()
            .and_then(|id| document.get_element_by_id(id));
        if status.is_none() {
            log::debug!("No connection status element on this page");
        }

        Ok(Self {
            input: dom::get_textarea_by_id(&document, &ids.input)?,
            send_button: dom::get_button_by_id(&document, &ids.send_button)?,
            clear_button: dom::get_element_by_id(&document, &ids.clear_button)?,
            messages: dom::get_element_by_id(&document, &ids.messages)?,
            loading: dom::get_html_element_by_id(&document, &ids.loading)?,
            status,
            window,
            document,
        })
    }

    pub fn input(&self) -> &HtmlTextAreaElement {
        &self.input
    }

    pub fn input_value(&self) -> String {
        self.input.value()
    }

    pub fn send_button(&self) -> &HtmlButtonElement {
        &self.send_button
    }

    pub fn clear_button(&self) -> &Element {
        &self.clear_button
    }

    fn build_bubble(&self, sender: Sender, html: &str) -> Result<Element, JsValue> {
        let message = dom::create_element_with_class(&self.document, "div", &sender.message_class())?;

        let avatar = dom::create_element_with_class(&self.document, "div", &sender.avatar_class())?;
        avatar.set_inner_html(sender.avatar_icon());

        let content = dom::create_element_with_class(&self.document, "div", "message-content")?;
        let text = dom::create_element_with_class(&self.document, "div", "message-text")?;
        // Callers pass escaped or trusted markup only
        text.set_inner_html(html);

        content.append_child(&text)?;
        message.append_child(&avatar)?;
        message.append_child(&content)?;
        Ok(message)
    }
}

impl ChatView for DomView {
    fn set_controls_enabled(&self, enabled: bool) {
        self.input.set_disabled(!enabled);
        self.send_button.set_disabled(!enabled);
    }

    fn set_loading(&self, visible: bool) {
        if visible {
            dom::show_element(&self.loading);
        } else {
            dom::hide_element(&self.loading);
        }
    }

    fn append_bubble(&self, sender: Sender, html: &str) {
        let appended = self
            .build_bubble(sender, html)
            .and_then(|bubble| self.messages.append_child(&bubble));

        match appended {
            Ok(_) => dom::scroll_to_bottom(&self.messages),
            Err(e) => log::warn!("Failed to render {} message: {:?}", sender.as_str(), e),
        }
    }

    fn clear_transcript(&self) {
        dom::clear_element(&self.messages);
    }

    fn transcript_len(&self) -> usize {
        self.messages.child_element_count() as usize
    }

    fn reset_input(&self) {
        self.input.set_value("");
        dom::reset_height(&self.input);
    }

    fn focus_input(&self) {
        if let Err(e) = self.input.focus() {
            log::warn!("Failed to focus input: {:?}", e);
        }
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.window.confirm_with_message(prompt).unwrap_or_else(|e| {
            log::warn!("Confirmation prompt failed: {:?}", e);
            false
        })
    }

    fn set_status(&self, status: ConnectionStatus) {
        if let Some(element) = &self.status {
            element.set_text_content(Some(status.label()));
            let class = match status {
                ConnectionStatus::Online => "connection-status online",
                ConnectionStatus::Offline => "connection-status offline",
            };
            element.set_class_name(class);
        }
    }
}
