use serde::{Deserialize, Serialize};

use crate::cons::provider_cons::{OPENAI_DEFAULT_MODEL, OPENAI_TEMPERATURE};
use crate::llm::models::provider_base::{Message, PathSegment};

/// `choices[0].message.content`
pub const RESPONSE_TEXT_PATH: &[PathSegment] = &[
    PathSegment::Key("choices"),
    PathSegment::Index(0),
    PathSegment::Key("message"),
    PathSegment::Key("content"),
];

/// Body of a chat-completions request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionsRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f64,
}

pub fn request_body(prompt: &str, model: Option<&str>) -> ChatCompletionsRequest {
    ChatCompletionsRequest {
        model: model.unwrap_or(OPENAI_DEFAULT_MODEL).to_string(),
        messages: vec![Message::user(prompt)],
        temperature: OPENAI_TEMPERATURE,
    }
}
