use serde::{Deserialize, Serialize};

pub const OPENAI_HOST_MARKER: &str = "openai.com";
pub const GEMINI_HOST_MARKER: &str = "generativelanguage.googleapis.com";
pub const OLLAMA_HOST_MARKERS: [&str; 2] = ["ollama", "localhost"];

pub const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const OLLAMA_DEFAULT_MODEL: &str = "llama2";

/// Fixed sampling temperature for chat-completions requests.
pub const OPENAI_TEMPERATURE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAI,
    Gemini,
    Ollama,
    Unknown,
}

impl ProviderKind {
    /// Returns the identifier used in logs and configuration (e.g., "openai", "ollama")
    pub fn provider_name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Ollama => "ollama",
            ProviderKind::Unknown => "unknown",
        }
    }

    /// Classifies an endpoint URL by substring tests on its lower-cased host.
    ///
    /// Rules are checked in order (OpenAI, Gemini, Ollama) so a host matching
    /// several markers resolves to the first one. Anything without a parseable
    /// host, including the empty string, is `Unknown`.
    pub fn from_endpoint(api_url: &str) -> Self {
        let host = endpoint_host(api_url);

        if host.contains(OPENAI_HOST_MARKER) {
            return ProviderKind::OpenAI;
        }
        if host.contains(GEMINI_HOST_MARKER) {
            return ProviderKind::Gemini;
        }
        if OLLAMA_HOST_MARKERS.iter().any(|m| host.contains(m)) {
            return ProviderKind::Ollama;
        }
        ProviderKind::Unknown
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ProviderKind::Unknown)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.provider_name())
    }
}

fn endpoint_host(api_url: &str) -> String {
    url::Url::parse(api_url.trim())
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .unwrap_or_default()
}
