use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WidgetError {
    #[error("a message is already being sent")]
    Busy,
    #[error("invalid widget configuration: {0}")]
    Config(String),
}

/// Failure to get a readable answer out of the backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("request failed: {0}")]
    Network(String),
    #[error("failed to parse response: {0}")]
    Decode(String),
}
