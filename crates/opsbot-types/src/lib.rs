//! Wire types for opsbot
//!
//! This crate provides the request/response shapes exchanged with the chat
//! backend and the small set of fixed values shared by the widget crates.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Chat endpoint on the serving host
pub const CHAT_ENDPOINT: &str = "/api/chat";

/// Health probe endpoint on the serving host
pub const HEALTH_ENDPOINT: &str = "/api/health";

/// Number of most recent history entries sent along with each message
pub const HISTORY_WINDOW: usize = 10;

/// Bot reply shown when the backend answers with `success: false`
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Bot reply shown when the request fails or the response cannot be read
pub const CONNECT_ERROR_REPLY: &str = "Sorry, I couldn't connect to the server. Please try again.";

/// Prompt shown before the transcript is cleared
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear the chat history?";

/// Greeting rendered on an empty transcript. This is trusted markup.
///
/// Kept on one line on purpose: the list supplies the layout, so no `<br>`
/// breaks are wanted between its lines.
pub const WELCOME_HTML: &str = concat!(
    "👋 Hello! I'm your DevOps assistant. I can help you with:",
    "<ul>",
    "<li>Docker &amp; Kubernetes</li>",
    "<li>CI/CD Pipelines</li>",
    "<li>Infrastructure as Code (Terraform, Ansible)</li>",
    "<li>Cloud Platforms (AWS, Azure, GCP)</li>",
    "<li>Monitoring &amp; Logging</li>",
    "<li>Best Practices &amp; Troubleshooting</li>",
    "</ul>",
    "Ask me anything! 🚀",
);

// ============================================================================
// Conversation Types
// ============================================================================

/// Author of a history entry, as the backend sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl HistoryEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Author of a rendered bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }

    /// Class list for the outer bubble element
    pub fn message_class(&self) -> String {
        format!("message {}-message", self.as_str())
    }

    /// Class list for the avatar element
    pub fn avatar_class(&self) -> String {
        format!("message-avatar {}-avatar", self.as_str())
    }

    /// Icon markup placed inside the avatar
    pub fn avatar_icon(&self) -> &'static str {
        match self {
            Sender::User => r#"<i class="fas fa-user"></i>"#,
            Sender::Bot => r#"<i class="fas fa-robot"></i>"#,
        }
    }
}

// ============================================================================
// API Types
// ============================================================================

/// Body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<HistoryEntry>,
}

/// Treats `null` the same as a missing field
fn deserialize_bool_or_null<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Body returned by `POST /api/chat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(deserialize_with = "deserialize_bool_or_null", default)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn reply(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Body returned by `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = ChatRequest {
            message: "Hello".to_string(),
            history: vec![HistoryEntry::user("Hello")],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "message": "Hello",
                "history": [{"role": "user", "content": "Hello"}]
            })
        );
    }

    #[test]
    fn test_response_without_message() {
        let response: ChatResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.message, None);
    }

    #[test]
    fn test_backend_failure_body() {
        let body = r#"{"error": "An error occurred processing your request", "success": false}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(!response.success);
        assert!(response.error.is_some());
    }

    #[test]
    fn test_missing_or_null_success_is_false() {
        let response: ChatResponse = serde_json::from_str(r#"{"error": "No message provided"}"#).unwrap();
        assert!(!response.success);

        let response: ChatResponse = serde_json::from_str(r#"{"success": null, "message": "x"}"#).unwrap();
        assert!(!response.success);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result = serde_json::from_str::<HistoryEntry>(r#"{"role": "system", "content": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_sender_classes() {
        assert_eq!(Sender::Bot.message_class(), "message bot-message");
        assert_eq!(Sender::User.avatar_class(), "message-avatar user-avatar");
        assert!(Sender::Bot.avatar_icon().contains("fa-robot"));
    }

    #[test]
    fn test_health_status() {
        let status: HealthStatus =
            serde_json::from_str(r#"{"status": "healthy", "service": "devops-chatbot"}"#).unwrap();
        assert!(status.is_healthy());
        assert_eq!(status.service, "devops-chatbot");
    }

    #[test]
    fn test_welcome_is_single_line_markup() {
        assert!(!WELCOME_HTML.contains('\n'));
        assert!(WELCOME_HTML.contains("<ul>") && WELCOME_HTML.contains("</ul>"));
        assert_eq!(WELCOME_HTML.matches("<li>").count(), 6);
    }
}
