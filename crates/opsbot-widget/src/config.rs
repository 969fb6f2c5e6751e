use serde::{Deserialize, Serialize};

use opsbot_types::{
    CHAT_ENDPOINT, CLEAR_PROMPT, CONNECT_ERROR_REPLY, ERROR_REPLY, HEALTH_ENDPOINT, HISTORY_WINDOW,
    WELCOME_HTML,
};

use crate::error::WidgetError;

/// Ids of the page elements the widget binds to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub input: String,
    pub send_button: String,
    pub clear_button: String,
    pub messages: String,
    pub loading: String,
    /// Connection badge; skipped when absent from the page
    pub status: Option<String>,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            input: "userInput".to_string(),
            send_button: "sendButton".to_string(),
            clear_button: "clearButton".to_string(),
            messages: "messages".to_string(),
            loading: "loading".to_string(),
            status: Some("connectionStatus".to_string()),
        }
    }
}

/// Widget settings. Every field has a default, so a partial JSON object is
/// enough to override a single value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub endpoint: String,
    /// `None` disables the startup health probe
    pub health_endpoint: Option<String>,
    pub history_window: usize,
    pub elements: ElementIds,
    pub clear_prompt: String,
    pub error_reply: String,
    pub connect_error_reply: String,
    pub welcome_html: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: CHAT_ENDPOINT.to_string(),
            health_endpoint: Some(HEALTH_ENDPOINT.to_string()),
            history_window: HISTORY_WINDOW,
            elements: ElementIds::default(),
            clear_prompt: CLEAR_PROMPT.to_string(),
            error_reply: ERROR_REPLY.to_string(),
            connect_error_reply: CONNECT_ERROR_REPLY.to_string(),
            welcome_html: WELCOME_HTML.to_string(),
        }
    }
}

impl WidgetConfig {
    pub fn from_json(json: &str) -> Result<Self, WidgetError> {
        let config: WidgetConfig =
            serde_json::from_str(json).map_err(|e| WidgetError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse an optional override, falling back to the defaults
    pub fn from_optional_json(json: Option<&str>) -> Result<Self, WidgetError> {
        match json.map(str::trim) {
            Some(json) if !json.is_empty() => Self::from_json(json),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), WidgetError> {
        if self.endpoint.trim().is_empty() {
            return Err(WidgetError::Config("endpoint must not be empty".to_string()));
        }
        if let Some(health) = &self.health_endpoint {
            if health.trim().is_empty() {
                return Err(WidgetError::Config(
                    "health_endpoint must be null or a path".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.endpoint, "/api/chat");
        assert_eq!(config.history_window, 10);
        assert_eq!(config.elements.input, "userInput");
        assert_eq!(config.health_endpoint.as_deref(), Some("/api/health"));
    }

    #[test]
    fn test_partial_override() {
        let config =
            WidgetConfig::from_json(r#"{"history_window": 4, "elements": {"messages": "log"}}"#)
                .unwrap();
        assert_eq!(config.history_window, 4);
        assert_eq!(config.elements.messages, "log");
        assert_eq!(config.elements.send_button, "sendButton");
        assert_eq!(config.endpoint, "/api/chat");
    }

    #[test]
    fn test_null_disables_health_probe() {
        let config = WidgetConfig::from_json(r#"{"health_endpoint": null}"#).unwrap();
        assert_eq!(config.health_endpoint, None);
    }

    #[test]
    fn test_missing_or_blank_json_uses_defaults() {
        assert_eq!(WidgetConfig::from_optional_json(None).unwrap(), WidgetConfig::default());
        assert_eq!(WidgetConfig::from_optional_json(Some("  ")).unwrap(), WidgetConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            WidgetConfig::from_json("{not json"),
            Err(WidgetError::Config(_))
        ));
        assert!(matches!(
            WidgetConfig::from_json(r#"{"endpoint": " "}"#),
            Err(WidgetError::Config(_))
        ));
    }
}
