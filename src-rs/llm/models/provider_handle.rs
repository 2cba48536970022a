use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::cons::provider_cons::ProviderKind;
use crate::llm::utils::string_util::log_preview;

pub use super::provider_base::{
    build_payload, normalize, normalize_text, BuildError, Message, NormalizeError, PayloadBody,
    RequestSpec,
};
pub use super::transport::{
    ReqwestTransport, RequestHeaders, Transport, TransportError, TransportResponse,
};

const LOG_PREVIEW_BYTES: usize = 120;

/// Failures that abort a request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Where and as whom a request goes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub model: Option<String>,
}

impl Endpoint {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>, model: Option<&str>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.map(str::to_string),
        }
    }

    pub fn provider(&self) -> ProviderKind {
        ProviderKind::from_endpoint(&self.api_url)
    }
}

/// Drives one prompt through classify, build, send and normalize.
///
/// Exactly one HTTP request is issued per call. Build and transport failures
/// are returned as [`RequestError`]; a reply that does not have the expected
/// shape is not an error at this level.
#[derive(Debug, Clone)]
pub struct LlmRequestHandler<T: Transport> {
    transport: T,
}

impl LlmRequestHandler<ReqwestTransport> {
    pub fn from_config(config: &AppConfig) -> Result<Self, TransportError> {
        Ok(Self::new(ReqwestTransport::from_config(&config.transport)?))
    }
}

impl<T: Transport> LlmRequestHandler<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `prompt` and returns the typed normalization result, leaving the
    /// choice of surfacing or suppressing a malformed reply to the caller.
    pub fn dispatch(
        &self,
        api_url: &str,
        api_key: &str,
        prompt: &str,
        model: Option<&str>,
    ) -> Result<Result<String, NormalizeError>, RequestError> {
        let provider = ProviderKind::from_endpoint(api_url);
        if !provider.is_supported() {
            log::error!("No supported provider behind endpoint {}", api_url);
            return Err(BuildError::UnsupportedProvider(provider).into());
        }
        log::debug!("Classified endpoint {} as {}", api_url, provider);

        let spec = RequestSpec::new(provider, prompt, model);
        let body = build_payload(&spec)
            .and_then(|payload| payload.to_value())
            .map_err(|e| {
                log::error!("Cannot build payload for {}: {}", api_url, e);
                e
            })?;
        log::debug!(
            "Built {} payload (model: {:?}, prompt: {})",
            provider,
            spec.model_name(),
            log_preview(&spec.prompt, LOG_PREVIEW_BYTES)
        );

        let headers = RequestHeaders::for_api_key(api_key);

        let envelope = self
            .transport
            .post(api_url, &headers, &body)
            .and_then(TransportResponse::status_check)
            .and_then(|resp| resp.decode_json())
            .map_err(|e| {
                log::warn!("LLM request to {} failed: {}", api_url, e);
                e
            })?;
        log::debug!("Received {} response from {}", provider, api_url);

        let normalized = normalize(provider, &envelope);
        match &normalized {
            Ok(text) => log::debug!(
                "Normalized {} response: {}",
                provider,
                log_preview(text, LOG_PREVIEW_BYTES)
            ),
            Err(e) => log::warn!(
                "Failed to normalize {} response at '{}': {}",
                provider,
                e.path,
                e
            ),
        }
        Ok(normalized)
    }

    /// Sends `prompt` and returns the answer text, or the
    /// `"[Parse error]: ..."` sentinel when the reply is malformed.
    pub fn send(
        &self,
        api_url: &str,
        api_key: &str,
        prompt: &str,
        model: Option<&str>,
    ) -> Result<String, RequestError> {
        Ok(self
            .dispatch(api_url, api_key, prompt, model)?
            .unwrap_or_else(|e| e.sentinel()))
    }

    pub fn send_to(&self, endpoint: &Endpoint, prompt: &str) -> Result<String, RequestError> {
        self.send(
            &endpoint.api_url,
            &endpoint.api_key,
            prompt,
            endpoint.model.as_deref(),
        )
    }
}
