use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One ticket as the model wrote it. No field is required; every key of the
/// source object is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket {
    pub fields: Map<String, Value>,
}

impl Ticket {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn first_str(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|k| self.fields.get(*k))
            .find_map(|v| v.as_str())
    }

    pub fn title(&self) -> Option<&str> {
        self.first_str(&["title"])
    }

    pub fn description(&self) -> Option<&str> {
        self.first_str(&["description", "beschreibung"])
    }

    pub fn requirements(&self) -> Option<&str> {
        self.first_str(&["requirements", "anforderungen"])
    }

    pub fn file_path(&self) -> Option<&str> {
        self.first_str(&["file_path", "filePath"])
    }
}

impl From<Map<String, Value>> for Ticket {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionError {
    #[error("no JSON array found in model reply. Raw reply:\n{raw}")]
    NoArrayFound { raw: String },

    #[error("failed to parse ticket array: {detail}\nExtracted JSON:\n{json}")]
    MalformedJson { detail: String, json: String },
}

/// Byte range of the candidate array in `text`: from the first `[` through
/// the last `]`, inclusive. `None` when either bracket is missing or the last
/// `]` comes before the first `[`.
pub fn array_span(text: &str) -> Option<(usize, usize)> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some((start, end + 1))
}

/// Recovers the ticket array from a free-form model reply.
///
/// The reply is expected to hold one JSON array, possibly wrapped in prose or
/// a fenced block. The first `[` and the last `]` of the trimmed reply are
/// taken as its bounds; stray brackets in the surrounding prose will break
/// this. Elements must be JSON objects; their fields are not checked.
pub fn extract_tickets(raw: &str) -> Result<Vec<Ticket>, ExtractionError> {
    let trimmed = raw.trim();

    let Some((start, end)) = array_span(trimmed) else {
        log::warn!("No JSON array in model reply ({} chars)", trimmed.len());
        return Err(ExtractionError::NoArrayFound {
            raw: trimmed.to_string(),
        });
    };

    let json_str = &trimmed[start..end];
    let tickets: Vec<Ticket> = serde_json::from_str(json_str).map_err(|e| {
        log::warn!("Ticket array failed to parse: {}", e);
        ExtractionError::MalformedJson {
            detail: e.to_string(),
            json: json_str.to_string(),
        }
    })?;

    log::debug!("Extracted {} tickets", tickets.len());
    Ok(tickets)
}
