use std::cell::{Cell, RefCell};

use opsbot_types::{ChatRequest, ChatResponse, Role, Sender};

use crate::config::WidgetConfig;
use crate::error::{TransportError, WidgetError};
use crate::history::ConversationHistory;
use crate::markdown;
use crate::transport::ChatTransport;
use crate::view::{ChatView, ConnectionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    Sending,
}

/// How a completed `submit` ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, nothing happened
    Skipped,
    /// The backend answered; holds the reply text
    Replied(String),
    /// The backend answered with `success: false`
    Rejected,
    /// The request failed or the response could not be read
    Failed(TransportError),
}

/// Mediates between page events, the conversation and the chat backend.
///
/// One controller per widget; it exclusively owns the conversation history.
/// All methods take `&self` so the browser glue can share the controller
/// between event handlers behind an `Rc`.
pub struct ChatController<V, T> {
    view: V,
    transport: T,
    config: WidgetConfig,
    history: RefCell<ConversationHistory>,
    state: Cell<WidgetState>,
}

impl<V: ChatView, T: ChatTransport> ChatController<V, T> {
    pub fn new(view: V, transport: T, config: WidgetConfig) -> Self {
        Self {
            view,
            transport,
            config,
            history: RefCell::new(ConversationHistory::new()),
            state: Cell::new(WidgetState::Idle),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn state(&self) -> WidgetState {
        self.state.get()
    }

    /// Snapshot of the conversation so far
    pub fn history(&self) -> ConversationHistory {
        self.history.borrow().clone()
    }

    /// Page-load behavior: greet, focus the input, probe the backend
    pub async fn start(&self) {
        if self.view.transcript_len() == 0 {
            self.render_welcome();
        }
        self.view.focus_input();

        if self.config.health_endpoint.is_some() {
            self.check_health().await;
        }
    }

    /// Send one message and render the answer.
    ///
    /// Returns `Err(WidgetError::Busy)` without touching anything when a
    /// previous send has not finished yet.
    pub async fn submit(&self, input: &str) -> Result<SendOutcome, WidgetError> {
        let message = input.trim();
        if message.is_empty() {
            return Ok(SendOutcome::Skipped);
        }
        if self.state.get() == WidgetState::Sending {
            log::warn!("Ignoring message while another one is in flight");
            return Err(WidgetError::Busy);
        }

        let _guard = SendGuard::begin(&self.view, &self.state);

        self.render_message(message, Sender::User);
        let request = {
            let mut history = self.history.borrow_mut();
            history.push(Role::User, message);
            ChatRequest {
                message: message.to_string(),
                history: history.window(self.config.history_window),
            }
        };
        self.view.reset_input();

        log::debug!(
            "Sending message to {} with {} history entries",
            self.config.endpoint,
            request.history.len()
        );

        let outcome = match self.transport.send(&request).await {
            Ok(ChatResponse {
                success: true,
                message: Some(reply),
                ..
            }) => {
                self.render_message(&reply, Sender::Bot);
                self.history.borrow_mut().push(Role::Assistant, reply.clone());
                SendOutcome::Replied(reply)
            }
            // A successful reply must carry its text
            Ok(ChatResponse { success: true, .. }) => self.connection_failed(TransportError::Decode(
                "successful response is missing its message".to_string(),
            )),
            Ok(response) => {
                log::warn!(
                    "Chat backend reported failure: {}",
                    response.error.as_deref().unwrap_or("no details")
                );
                self.render_message(&self.config.error_reply, Sender::Bot);
                SendOutcome::Rejected
            }
            Err(e) => self.connection_failed(e),
        };

        Ok(outcome)
    }

    /// Render `text` as markdown into a new bubble
    pub fn render_message(&self, text: &str, sender: Sender) {
        self.view.append_bubble(sender, &markdown::render_markdown(text));
    }

    /// Ask for confirmation, then forget the conversation and greet again.
    /// Returns whether anything was cleared.
    pub fn clear(&self) -> bool {
        if !self.view.confirm(&self.config.clear_prompt) {
            return false;
        }

        self.history.borrow_mut().clear();
        self.view.clear_transcript();
        self.render_welcome();
        log::info!("Conversation cleared");
        true
    }

    pub async fn check_health(&self) -> ConnectionStatus {
        let status = match self.transport.health().await {
            Ok(health) if health.is_healthy() => {
                log::info!("Backend {} is healthy", health.service);
                ConnectionStatus::Online
            }
            Ok(health) => {
                log::warn!("Backend reported status {}", health.status);
                ConnectionStatus::Offline
            }
            Err(e) => {
                log::error!("Health check failed: {}", e);
                ConnectionStatus::Offline
            }
        };

        self.view.set_status(status);
        status
    }

    fn connection_failed(&self, error: TransportError) -> SendOutcome {
        log::error!("Chat request failed: {}", error);
        self.render_message(&self.config.connect_error_reply, Sender::Bot);
        SendOutcome::Failed(error)
    }

    fn render_welcome(&self) {
        self.view.append_bubble(Sender::Bot, &self.config.welcome_html);
    }
}

/// Holds the widget in `Sending`; dropping it restores the idle page state
/// on every exit path, including a dropped future.
struct SendGuard<'a, V: ChatView> {
    view: &'a V,
    state: &'a Cell<WidgetState>,
}

impl<'a, V: ChatView> SendGuard<'a, V> {
    fn begin(view: &'a V, state: &'a Cell<WidgetState>) -> Self {
        state.set(WidgetState::Sending);
        view.set_controls_enabled(false);
        view.set_loading(true);
        Self { view, state }
    }
}

impl<V: ChatView> Drop for SendGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_controls_enabled(true);
        self.view.set_loading(false);
        self.view.focus_input();
        self.state.set(WidgetState::Idle);
    }
}
