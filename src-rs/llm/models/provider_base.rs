use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cons::provider_cons::ProviderKind;

use super::gemini::{self, GeminiRequest};
use super::ollama::{self, OllamaGenerateRequest};
use super::openai::{self, ChatCompletionsRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One prompt bound to a provider, built per call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub provider: ProviderKind,
    pub prompt: String,
    pub model: Option<String>,
}

impl RequestSpec {
    pub fn new(provider: ProviderKind, prompt: impl Into<String>, model: Option<&str>) -> Self {
        Self {
            provider,
            prompt: prompt.into(),
            model: model.map(str::to_string),
        }
    }

    /// The caller-supplied model, treating an empty or blank name as absent.
    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().filter(|m| !m.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(ProviderKind),

    #[error("failed to serialize {0} payload: {1}")]
    Serialize(ProviderKind, String),
}

/// Provider-specific request body. Serializes to the provider's wire shape
/// without any variant tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PayloadBody {
    OpenAI(ChatCompletionsRequest),
    Gemini(GeminiRequest),
    Ollama(OllamaGenerateRequest),
}

impl PayloadBody {
    pub fn provider(&self) -> ProviderKind {
        match self {
            PayloadBody::OpenAI(_) => ProviderKind::OpenAI,
            PayloadBody::Gemini(_) => ProviderKind::Gemini,
            PayloadBody::Ollama(_) => ProviderKind::Ollama,
        }
    }

    pub fn to_value(&self) -> Result<Value, BuildError> {
        serde_json::to_value(self).map_err(|e| BuildError::Serialize(self.provider(), e.to_string()))
    }
}

pub fn build_payload(spec: &RequestSpec) -> Result<PayloadBody, BuildError> {
    let model = spec.model_name();
    match spec.provider {
        ProviderKind::OpenAI => Ok(PayloadBody::OpenAI(openai::request_body(&spec.prompt, model))),
        ProviderKind::Gemini => Ok(PayloadBody::Gemini(gemini::request_body(&spec.prompt))),
        ProviderKind::Ollama => Ok(PayloadBody::Ollama(ollama::request_body(&spec.prompt, model))),
        ProviderKind::Unknown => Err(BuildError::UnsupportedProvider(spec.provider)),
    }
}

/// A step along a response extraction path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    Key(&'static str),
    Index(usize),
}

pub fn render_path(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for seg in segments {
        match seg {
            PathSegment::Key(k) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(k);
            }
            PathSegment::Index(i) => out.push_str(&format!("[{}]", i)),
        }
    }
    out
}

/// Structural failure while pulling the answer text out of a provider reply.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{detail}")]
pub struct NormalizeError {
    pub provider: ProviderKind,
    /// Path walked up to and including the failing segment.
    pub path: String,
    pub detail: String,
}

impl NormalizeError {
    pub const SENTINEL_PREFIX: &'static str = "[Parse error]: ";

    /// Display-safe rendering handed to callers that only deal in text.
    pub fn sentinel(&self) -> String {
        format!("{}{}", Self::SENTINEL_PREFIX, self.detail)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn extract_text<'a>(
    provider: ProviderKind,
    envelope: &'a Value,
    path: &[PathSegment],
) -> Result<&'a str, NormalizeError> {
    let fail = |upto: usize, detail: String| NormalizeError {
        provider,
        path: render_path(&path[..upto]),
        detail,
    };

    let mut current = envelope;
    for (i, seg) in path.iter().enumerate() {
        let walked = render_path(&path[..=i]);
        current = match (seg, current) {
            (PathSegment::Key(key), Value::Object(map)) => map
                .get(*key)
                .ok_or_else(|| fail(i + 1, format!("missing key '{}' at '{}'", key, walked)))?,
            (PathSegment::Index(idx), Value::Array(items)) => items.get(*idx).ok_or_else(|| {
                fail(
                    i + 1,
                    format!(
                        "index {} out of range at '{}' (array has {} items)",
                        idx,
                        walked,
                        items.len()
                    ),
                )
            })?,
            (PathSegment::Key(_), other) => {
                return Err(fail(
                    i + 1,
                    format!("expected object before '{}', found {}", walked, json_type_name(other)),
                ))
            }
            (PathSegment::Index(_), other) => {
                return Err(fail(
                    i + 1,
                    format!("expected array before '{}', found {}", walked, json_type_name(other)),
                ))
            }
        };
    }

    current.as_str().ok_or_else(|| {
        fail(
            path.len(),
            format!(
                "expected string at '{}', found {}",
                render_path(path),
                json_type_name(current)
            ),
        )
    })
}

/// Pulls the answer text out of a decoded provider reply.
///
/// Unknown providers have no extraction path; their whole envelope comes back
/// as compact JSON text.
pub fn normalize(provider: ProviderKind, envelope: &Value) -> Result<String, NormalizeError> {
    let path = match provider {
        ProviderKind::OpenAI => openai::RESPONSE_TEXT_PATH,
        ProviderKind::Gemini => gemini::RESPONSE_TEXT_PATH,
        ProviderKind::Ollama => ollama::RESPONSE_TEXT_PATH,
        ProviderKind::Unknown => return Ok(envelope.to_string()),
    };
    extract_text(provider, envelope, path).map(str::to_string)
}

/// Like [`normalize`] but never fails: structural errors become the
/// `"[Parse error]: ..."` sentinel string.
pub fn normalize_text(provider: ProviderKind, envelope: &Value) -> String {
    match normalize(provider, envelope) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Failed to normalize {} response at '{}': {}", provider, e.path, e);
            e.sentinel()
        }
    }
}
