use crate::llm::utils::ticket_extractor::{array_span, extract_tickets, ExtractionError, Ticket};
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_array_from_fenced_block_with_prose() {
        let raw = "intro\n```json\n[{\"title\":\"T\"}]\n```\noutro";
        let tickets = extract_tickets(raw).unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(serde_json::to_value(&tickets).unwrap(), json!([{ "title": "T" }]));
    }

    #[test]
    fn keeps_array_order_and_all_fields() {
        let raw = r#"  [
            {"title": "A", "description": "first", "requirements": "r1", "file_path": "core/a.py", "extra": 1},
            {"title": "B", "beschreibung": "zweites", "anforderungen": "r2", "file_path": "core/b.py"},
            {"title": "C"}
        ]  "#;
        let tickets = extract_tickets(raw).unwrap();
        let titles: Vec<_> = tickets.iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec![Some("A"), Some("B"), Some("C")]);

        assert_eq!(tickets[0].description(), Some("first"));
        assert_eq!(tickets[0].get("extra"), Some(&json!(1)));
        assert_eq!(tickets[1].description(), Some("zweites"));
        assert_eq!(tickets[1].requirements(), Some("r2"));
        assert_eq!(tickets[1].file_path(), Some("core/b.py"));
        assert_eq!(tickets[2].file_path(), None);
    }

    #[test]
    fn empty_array_is_an_empty_list() {
        assert!(extract_tickets("Nothing to do: []").unwrap().is_empty());
    }

    #[test]
    fn no_brackets_is_no_array_found_with_full_text() {
        let err = extract_tickets("  no brackets here \n").unwrap_err();
        assert_eq!(
            err,
            ExtractionError::NoArrayFound {
                raw: "no brackets here".to_string()
            }
        );
        assert!(err.to_string().contains("no brackets here"));
    }

    #[test]
    fn missing_closing_bracket_is_no_array_found() {
        let err = extract_tickets("here it comes: [{\"title\": \"T\"}").unwrap_err();
        assert!(matches!(err, ExtractionError::NoArrayFound { .. }));
    }

    #[test]
    fn closing_bracket_before_opening_is_no_array_found() {
        let err = extract_tickets("oops] and then [").unwrap_err();
        assert!(matches!(err, ExtractionError::NoArrayFound { .. }));
    }

    #[test]
    fn bad_json_is_malformed_with_sliced_text() {
        let err = extract_tickets("Sure! [{bad json}] Hope that helps.").unwrap_err();
        match &err {
            ExtractionError::MalformedJson { detail, json } => {
                assert_eq!(json, "[{bad json}]");
                assert!(!detail.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("[{bad json}]"));
    }

    #[test]
    fn non_object_elements_are_malformed() {
        let err = extract_tickets("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedJson { .. }));
    }

    #[test]
    fn stray_bracket_in_prose_breaks_the_heuristic() {
        let raw = "See [1] for details.\n[{\"title\":\"T\"}]";
        let err = extract_tickets(raw).unwrap_err();
        match err {
            ExtractionError::MalformedJson { json, .. } => {
                assert!(json.starts_with("[1]"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn array_span_is_inclusive() {
        let text = "ab[c]d";
        let (start, end) = array_span(text).unwrap();
        assert_eq!(&text[start..end], "[c]");
        assert_eq!(array_span("abc"), None);
        assert_eq!(array_span("]["), None);
    }

    #[test]
    fn ticket_roundtrips_transparently() {
        let ticket: Ticket = serde_json::from_value(json!({ "title": "T", "file_path": "x.py" })).unwrap();
        assert_eq!(ticket.title(), Some("T"));
        assert_eq!(serde_json::to_value(&ticket).unwrap(), json!({ "title": "T", "file_path": "x.py" }));
    }
}
