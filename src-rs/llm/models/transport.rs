use serde_json::Value;
use std::time::Duration;

use crate::config::TransportConfig;

/// Errors that abort a request. Never masked by the orchestrator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("failed to decode response JSON: {0}")]
    Decode(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Headers for a single request, built once per call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: Vec<(String, String)>,
}

impl RequestHeaders {
    pub const CONTENT_TYPE: &'static str = "Content-Type";
    pub const AUTHORIZATION: &'static str = "Authorization";

    /// JSON content type always; bearer auth only for a non-empty key.
    pub fn for_api_key(api_key: &str) -> Self {
        let mut entries = vec![(
            Self::CONTENT_TYPE.to_string(),
            "application/json".to_string(),
        )];
        if !api_key.is_empty() {
            entries.push((Self::AUTHORIZATION.to_string(), format!("Bearer {}", api_key)));
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Raw reply as handed back by a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Fails for any status >= 400.
    pub fn status_check(self) -> Result<Self, TransportError> {
        if self.status >= 400 {
            return Err(TransportError::Status {
                status: self.status,
                body: self.body,
            });
        }
        Ok(self)
    }

    pub fn decode_json(&self) -> Result<Value, TransportError> {
        serde_json::from_str(&self.body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Performs one HTTP POST with a JSON body.
pub trait Transport: Send + Sync {
    fn post(
        &self,
        url: &str,
        headers: &RequestHeaders,
        body: &Value,
    ) -> Result<TransportResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(
        &self,
        url: &str,
        headers: &RequestHeaders,
        body: &Value,
    ) -> Result<TransportResponse, TransportError> {
        (**self).post(url, headers, body)
    }
}

/// Blocking reqwest transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        // None disables reqwest's default 30s blocking timeout.
        let http_client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self { http_client })
    }

    pub fn from_config(config: &TransportConfig) -> Result<Self, TransportError> {
        Self::new(config.timeout())
    }
}

impl Transport for ReqwestTransport {
    fn post(
        &self,
        url: &str,
        headers: &RequestHeaders,
        body: &Value,
    ) -> Result<TransportResponse, TransportError> {
        let mut request = self.http_client.post(url);
        for (name, value) in headers.iter() {
            request = request.header(name, value);
        }

        let response = request
            .json(body)
            .send()
            .map_err(|e| TransportError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let text = response.text().map_err(|e| TransportError::Network {
            url: url.to_string(),
            message: format!("failed to read response body: {}", e),
        })?;

        Ok(TransportResponse::new(status, text))
    }
}
