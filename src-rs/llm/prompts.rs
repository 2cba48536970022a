//! Prompt text for each pipeline stage.

use std::path::Path;

use crate::llm::utils::ticket_extractor::Ticket;

/// Asks for bare JSON output.
pub const JSON_ONLY_NOTE: &str = "You are a JSON generator. \
Return **only** a single valid JSON object or array, \
with no code, comments or Markdown fences.";

/// Test-file instructions; `{module}` is replaced with the module name.
pub const TEST_FILE_NOTE: &str = "You are a pytest assistant. \
Write a test file for module `{module}`. \
Answer **only** with `import ...` lines and `def test_...` functions, \
without further comments, explanations or example implementations.";

/// Target language for generated code, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeLanguage {
    Java,
    Python,
}

impl CodeLanguage {
    pub fn from_path(file_path: &str) -> Self {
        let ext = Path::new(file_path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("java") => CodeLanguage::Java,
            _ => CodeLanguage::Python,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CodeLanguage::Java => "Java",
            CodeLanguage::Python => "Python",
        }
    }
}

pub fn plan_prompt(project_desc: &str) -> String {
    format!(
        "Create a detailed, step-by-step project plan for the following project:\n\
         {}\n\
         Use clear headings and numbered steps.",
        project_desc
    )
}

pub fn tickets_prompt(plan_text: &str) -> String {
    format!(
        "Based on this project plan:\n{}\n\
         Please return **only** a plain JSON array of tickets, \
         each with the fields title, description, requirements and file_path.",
        plan_text
    )
}

pub fn code_prompt(file_path: &str, description: &str, requirements: &str) -> String {
    let lang = CodeLanguage::from_path(file_path);
    format!(
        "Implement the following ticket in {}:\n\
         File: {}\n\
         Description: {}\n\
         Requirements:\n{}",
        lang.display_name(),
        file_path,
        description,
        requirements
    )
}

/// Test file name for the module at `file_path`: `test_<stem>.py`.
pub fn test_file_name(file_path: &str) -> String {
    let stem = Path::new(file_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("module");
    format!("test_{}.py", stem)
}

pub fn tests_prompt(file_path: &str, title: &str, description: &str, requirements: &str) -> String {
    format!(
        "Write unit tests for the ticket.\n\
         File: {}\n\
         Title: {}\n\
         Description: {}\n\
         Requirements:\n{}\n\
         Save the tests in {}",
        file_path,
        title,
        description,
        requirements,
        test_file_name(file_path)
    )
}

pub fn ticket_code_prompt(ticket: &Ticket, file_path: &str) -> String {
    code_prompt(
        file_path,
        ticket.description().unwrap_or_default(),
        ticket.requirements().unwrap_or_default(),
    )
}

pub fn ticket_tests_prompt(ticket: &Ticket, file_path: &str, title: &str) -> String {
    tests_prompt(
        file_path,
        title,
        ticket.description().unwrap_or_default(),
        ticket.requirements().unwrap_or_default(),
    )
}

/// Asks for a complete rewrite of `file_path` given its current content.
pub fn code_file_prompt(file_path: &str, existing_code: &str, ticket_description: &str) -> String {
    let file_ext = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    format!(
        "You are a pure code generator. \
         You receive the complete file `{path}` as context:\n\n\
         ```{ext}\n{code}\n```\n\n\
         Ticket description:\n```{desc}\n```\n\n\
         Return **the complete** file, including all existing imports \
         and the changes required by the ticket. \
         Answer **only** with the code between ```{ext} ... ```.",
        path = file_path,
        ext = file_ext,
        code = existing_code,
        desc = ticket_description
    )
}

pub fn test_file_note(module: &str) -> String {
    TEST_FILE_NOTE.replace("{module}", module)
}
