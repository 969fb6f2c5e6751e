//! Chat widget core for opsbot
//!
//! Everything here is independent of the browser: the controller talks to
//! the page through [`ChatView`] and to the backend through [`ChatTransport`].

pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod input;
pub mod markdown;
pub mod transport;
pub mod view;

pub use config::{ElementIds, WidgetConfig};
pub use controller::{ChatController, SendOutcome, WidgetState};
pub use error::{TransportError, WidgetError};
pub use history::ConversationHistory;
pub use input::KeyAction;
pub use transport::ChatTransport;
pub use view::{ChatView, ConnectionStatus};
