use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use opsbot_types::{ChatRequest, ChatResponse, HealthStatus, Sender};
use opsbot_widget::{ChatController, ChatTransport, ChatView, ConnectionStatus, TransportError, WidgetConfig};

/// Page state recorded by [`MockView`]
pub struct ViewState {
    pub transcript: RefCell<Vec<(Sender, String)>>,
    pub controls_enabled: Cell<bool>,
    pub loading: Cell<bool>,
    pub input_resets: Cell<usize>,
    pub focus_count: Cell<usize>,
    pub confirm_answer: Cell<bool>,
    pub prompts: RefCell<Vec<String>>,
    pub status: Cell<Option<ConnectionStatus>>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            transcript: RefCell::new(Vec::new()),
            controls_enabled: Cell::new(true),
            loading: Cell::new(false),
            input_resets: Cell::new(0),
            focus_count: Cell::new(0),
            confirm_answer: Cell::new(true),
            prompts: RefCell::new(Vec::new()),
            status: Cell::new(None),
        }
    }
}

/// Recording view; clones share the same state
#[derive(Clone, Default)]
pub struct MockView {
    pub state: Rc<ViewState>,
}

impl MockView {
    pub fn bubbles(&self) -> Vec<(Sender, String)> {
        self.state.transcript.borrow().clone()
    }

    pub fn is_idle(&self) -> bool {
        self.state.controls_enabled.get() && !self.state.loading.get()
    }
}

impl ChatView for MockView {
    fn set_controls_enabled(&self, enabled: bool) {
        self.state.controls_enabled.set(enabled);
    }

    fn set_loading(&self, visible: bool) {
        self.state.loading.set(visible);
    }

    fn append_bubble(&self, sender: Sender, html: &str) {
        self.state.transcript.borrow_mut().push((sender, html.to_string()));
    }

    fn clear_transcript(&self) {
        self.state.transcript.borrow_mut().clear();
    }

    fn transcript_len(&self) -> usize {
        self.state.transcript.borrow().len()
    }

    fn reset_input(&self) {
        self.state.input_resets.set(self.state.input_resets.get() + 1);
    }

    fn focus_input(&self) {
        self.state.focus_count.set(self.state.focus_count.get() + 1);
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.state.prompts.borrow_mut().push(prompt.to_string());
        self.state.confirm_answer.get()
    }

    fn set_status(&self, status: ConnectionStatus) {
        self.state.status.set(Some(status));
    }
}

/// Transport answering from a script of canned results
#[derive(Default)]
pub struct MockTransport {
    pub responses: RefCell<VecDeque<Result<ChatResponse, TransportError>>>,
    pub requests: RefCell<Vec<ChatRequest>>,
    pub health: RefCell<Option<Result<HealthStatus, TransportError>>>,
    pub health_calls: Cell<usize>,
    /// Suspend once before answering, like a real network round trip
    pub yield_before_reply: bool,
    /// View to snapshot `(controls_enabled, loading)` from while a request is in flight
    pub observer: Option<MockView>,
    pub observed: RefCell<Vec<(bool, bool)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.respond(Ok(ChatResponse::reply(text)))
    }

    pub fn respond(self, result: Result<ChatResponse, TransportError>) -> Self {
        self.responses.borrow_mut().push_back(result);
        self
    }

    pub fn yielding(mut self) -> Self {
        self.yield_before_reply = true;
        self
    }

    pub fn observing(mut self, view: &MockView) -> Self {
        self.observer = Some(view.clone());
        self
    }

    pub fn with_health(self, result: Result<HealthStatus, TransportError>) -> Self {
        *self.health.borrow_mut() = Some(result);
        self
    }
}

#[async_trait(?Send)]
impl ChatTransport for MockTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        if let Some(view) = &self.observer {
            self.observed
                .borrow_mut()
                .push((view.state.controls_enabled.get(), view.state.loading.get()));
        }
        if self.yield_before_reply {
            tokio::task::yield_now().await;
        }

        let next = self.responses.borrow_mut().pop_front();
        next.unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_string())))
    }

    async fn health(&self) -> Result<HealthStatus, TransportError> {
        self.health_calls.set(self.health_calls.get() + 1);
        self.health
            .borrow()
            .clone()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted health".to_string())))
    }
}

pub fn create_controller(transport: MockTransport) -> (ChatController<MockView, MockTransport>, MockView) {
    let view = MockView::default();
    let controller = ChatController::new(view.clone(), transport, WidgetConfig::default());
    (controller, view)
}
