use async_trait::async_trait;

use opsbot_types::{ChatRequest, ChatResponse, HealthStatus};

use crate::error::TransportError;

/// Connection to the chat backend.
///
/// Futures are not `Send`: the browser implementation runs on the single
/// page thread.
#[async_trait(?Send)]
pub trait ChatTransport {
    /// Post one message with its history window. The HTTP status is not
    /// inspected; any body that parses as a [`ChatResponse`] is returned.
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;

    async fn health(&self) -> Result<HealthStatus, TransportError>;
}
