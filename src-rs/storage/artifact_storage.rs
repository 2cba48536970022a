use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::project_storage::{ProjectWorkspace, TIMESTAMP_FORMAT};
use super::{atomic_write, join_relative};
use crate::llm::prompts::test_file_name;
use crate::llm::utils::ticket_extractor::Ticket;

pub const FALLBACK_RESPONSES_DIR: &str = "responses";

lazy_static! {
    static ref CODE_FENCE: Regex = Regex::new(r"```[^\n]*\n([\s\S]*?)```").unwrap();
}

/// Code inside Markdown fences, blocks joined by `\n`. Text without fences is
/// taken as-is. Line endings are normalised to `\n`.
pub fn extract_code(markdown: &str) -> String {
    let blocks: Vec<&str> = CODE_FENCE
        .captures_iter(markdown)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    let code = if blocks.is_empty() {
        markdown.to_string()
    } else {
        blocks.join("\n")
    };
    code.replace("\r\n", "\n")
}

/// One logged prompt/reply pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub timestamp: String,
    pub input: String,
    pub response: String,
}

impl ProjectWorkspace {
    /// `docs/plan.txt`
    pub fn save_plan(&self, plan_text: &str) -> Result<PathBuf> {
        let path = self.docs_dir().join("plan.txt");
        atomic_write(&path, plan_text).context("failed to save plan")?;
        Ok(path)
    }

    /// `tickets/tickets.json`, pretty-printed.
    pub fn save_tickets(&self, tickets: &[Ticket]) -> Result<PathBuf> {
        let path = self.tickets_dir().join("tickets.json");
        let json = serde_json::to_string_pretty(tickets).context("failed to serialize tickets")?;
        atomic_write(&path, &json).context("failed to save tickets")?;
        Ok(path)
    }

    /// `src/<file_path>`, holding the fenced code of `code_md`.
    pub fn save_code(&self, file_path: &str, code_md: &str) -> Result<PathBuf> {
        let path = join_relative(&self.src_dir(), file_path)?;
        atomic_write(&path, &extract_code(code_md))
            .with_context(|| format!("failed to save code for {}", file_path))?;
        Ok(path)
    }

    /// `tests/test_<stem>.py`, written verbatim.
    pub fn save_tests(&self, file_path: &str, tests_md: &str) -> Result<PathBuf> {
        let path = self.tests_dir().join(test_file_name(file_path));
        atomic_write(&path, tests_md)
            .with_context(|| format!("failed to save tests for {}", file_path))?;
        Ok(path)
    }

    /// `logs/response_<ts>.json`
    pub fn save_response(&self, user_input: &str, response: &str) -> Result<PathBuf> {
        write_response(&self.logs_dir(), user_input, response)
    }
}

/// Logs a prompt/reply pair into the project's `logs/`, or into
/// `./responses/` when there is no project.
pub fn save_response_in(
    project: Option<&ProjectWorkspace>,
    user_input: &str,
    response: &str,
) -> Result<PathBuf> {
    if let Some(p) = project {
        return p.save_response(user_input, response);
    }
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    save_response_under(None, &cwd, user_input, response)
}

/// [`save_response_in`] with the fallback rooted at `base` instead of the
/// working directory.
pub(crate) fn save_response_under(
    project: Option<&ProjectWorkspace>,
    base: &Path,
    user_input: &str,
    response: &str,
) -> Result<PathBuf> {
    match project {
        Some(p) => p.save_response(user_input, response),
        None => write_response(&base.join(FALLBACK_RESPONSES_DIR), user_input, response),
    }
}

fn write_response(dir: &Path, user_input: &str, response: &str) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let record = ResponseRecord {
        timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        input: user_input.to_string(),
        response: response.to_string(),
    };
    // Millis keep same-second responses from overwriting each other.
    let path = dir.join(format!(
        "response_{}_{}.json",
        record.timestamp,
        now.format("%3f")
    ));
    let json = serde_json::to_string_pretty(&record).context("failed to serialize response")?;
    atomic_write(&path, &json).context("failed to save response log")?;
    Ok(path)
}
