use async_trait::async_trait;
use gloo_net::http::Request;

use opsbot_types::{ChatRequest, ChatResponse, HealthStatus};
use opsbot_widget::{ChatTransport, TransportError, WidgetConfig};

/// [`ChatTransport`] over `fetch`
pub struct HttpTransport {
    endpoint: String,
    health_endpoint: Option<String>,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, health_endpoint: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            health_endpoint,
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.endpoint.clone(), config.health_endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn health_endpoint(&self) -> Option<&str> {
        self.health_endpoint.as_deref()
    }
}

#[async_trait(?Send)]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let response = Request::post(&self.endpoint)
            .json(request)
            .map_err(|e| TransportError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        log::debug!("{} answered with status {}", self.endpoint, response.status());

        // Error statuses still carry a JSON body with `success: false`
        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn health(&self) -> Result<HealthStatus, TransportError> {
        let endpoint = self
            .health_endpoint
            .as_deref()
            .ok_or_else(|| TransportError::Network("no health endpoint configured".to_string()))?;

        let response = Request::get(endpoint)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
