use serde::{Deserialize, Serialize};

use crate::llm::models::provider_base::PathSegment;

/// `candidates[0].content.parts[0].text`
pub const RESPONSE_TEXT_PATH: &[PathSegment] = &[
    PathSegment::Key("candidates"),
    PathSegment::Index(0),
    PathSegment::Key("content"),
    PathSegment::Key("parts"),
    PathSegment::Index(0),
    PathSegment::Key("text"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiPart {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,
}

/// Body of a `generateContent` request. The model is part of the endpoint
/// path, not the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
}

pub fn request_body(prompt: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            parts: vec![GeminiPart {
                text: prompt.to_string(),
            }],
        }],
    }
}
