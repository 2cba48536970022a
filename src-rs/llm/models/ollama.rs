use serde::{Deserialize, Serialize};

use crate::cons::provider_cons::OLLAMA_DEFAULT_MODEL;
use crate::llm::models::provider_base::PathSegment;

pub const RESPONSE_TEXT_PATH: &[PathSegment] = &[PathSegment::Key("response")];

/// Body of an Ollama `/api/generate` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaGenerateRequest {
    pub model: String,
    pub prompt: String,
}

pub fn request_body(prompt: &str, model: Option<&str>) -> OllamaGenerateRequest {
    OllamaGenerateRequest {
        model: model.unwrap_or(OLLAMA_DEFAULT_MODEL).to_string(),
        prompt: prompt.to_string(),
    }
}
