// Provider request/response shapes and the request orchestrator

pub mod provider_handle;
pub mod provider_base;
pub mod transport;

pub mod gemini;
pub mod ollama;
pub mod openai;
