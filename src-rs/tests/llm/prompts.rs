use crate::llm::prompts::*;
use crate::llm::utils::ticket_extractor::Ticket;
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_follows_extension() {
        assert_eq!(CodeLanguage::from_path("src/Main.java"), CodeLanguage::Java);
        assert_eq!(CodeLanguage::from_path("src/Main.JAVA"), CodeLanguage::Java);
        assert_eq!(CodeLanguage::from_path("core/api_types.py"), CodeLanguage::Python);
        assert_eq!(CodeLanguage::from_path("README"), CodeLanguage::Python);
    }

    #[test]
    fn code_prompt_names_language_file_and_requirements() {
        let p = code_prompt("core/App.java", "Build the app", "- must compile");
        assert!(p.contains("in Java:"));
        assert!(p.contains("File: core/App.java"));
        assert!(p.contains("Description: Build the app"));
        assert!(p.ends_with("Requirements:\n- must compile"));
    }

    #[test]
    fn tests_prompt_names_test_file() {
        let p = tests_prompt("core/api_types.py", "Types", "desc", "reqs");
        assert!(p.contains("Title: Types"));
        assert!(p.ends_with("Save the tests in test_api_types.py"));
        assert_eq!(test_file_name("a/b/c.py"), "test_c.py");
    }

    #[test]
    fn tickets_prompt_asks_for_json_array() {
        let p = tickets_prompt("1. Do things");
        assert!(p.contains("1. Do things"));
        assert!(p.contains("JSON array"));
        assert!(p.contains("file_path"));
    }

    #[test]
    fn plan_prompt_embeds_description() {
        assert!(plan_prompt("My project\nDoes stuff").contains("My project\nDoes stuff"));
    }

    #[test]
    fn ticket_prompts_tolerate_missing_fields() {
        let ticket: Ticket = serde_json::from_value(json!({ "file_path": "x.py" })).unwrap();
        let p = ticket_code_prompt(&ticket, "x.py");
        assert!(p.contains("Description: \n"));
        let p = ticket_tests_prompt(&ticket, "x.py", "T");
        assert!(p.contains("Title: T"));
    }

    #[test]
    fn code_file_prompt_fences_existing_code() {
        let p = code_file_prompt("core/a.py", "print(1)", "add logging");
        assert!(p.contains("```py\nprint(1)\n```"));
        assert!(p.contains("```add logging\n```"));
        assert!(p.contains("`core/a.py`"));
    }

    #[test]
    fn test_file_note_substitutes_module() {
        let note = test_file_note("api_types");
        assert!(note.contains("`api_types`"));
        assert!(!note.contains("{module}"));
    }
}
