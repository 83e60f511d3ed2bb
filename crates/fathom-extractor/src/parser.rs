//! Recover an already-structured document from model output
//!
//! Vision models asked for JSON mostly return JSON — sometimes bare,
//! sometimes wrapped in a markdown code fence, sometimes buried in
//! commentary. Three recovery strategies run in order, each silently
//! falling through on a decode failure; only when all three miss does the
//! caller fall back to heuristic text extraction.

use fathom_domain::DocumentRecord;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static FENCED_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("fence pattern"));

/// Try to read `text` as an existing JSON document.
///
/// Attempts, in order: the whole input, the first fenced code block, and the
/// first-`{`-to-last-`}` substring. Only a JSON object counts — arrays and
/// scalars fall through to the next strategy.
pub fn recover_document(text: &str) -> Option<DocumentRecord> {
    if let Some(document) = decode_object(text) {
        return Some(document);
    }

    if let Some(caps) = FENCED_BLOCK_RE.captures(text) {
        if let Some(document) = decode_object(&caps[1]) {
            return Some(document);
        }
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            if let Some(document) = decode_object(&text[start..=end]) {
                return Some(document);
            }
        }
    }

    None
}

/// Whether `text` already carries a structured document, in any of the
/// forms [`recover_document`] accepts.
pub fn looks_like_json(text: &str) -> bool {
    recover_document(text).is_some()
}

fn decode_object(text: &str) -> Option<DocumentRecord> {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_bare_object() {
        let doc = recover_document(r#"{"vessel_name": "MV TEST"}"#).unwrap();
        assert_eq!(doc["vessel_name"], "MV TEST");
    }

    #[test]
    fn test_recovers_fenced_object() {
        let text = "Here are the tables you asked for:\n\
                    ```json\n{\"vessel_name\": \"MV TEST\"}\n```\nLet me know!";
        let doc = recover_document(text).unwrap();
        assert_eq!(doc["vessel_name"], "MV TEST");
    }

    #[test]
    fn test_recovers_fence_without_language_tag() {
        let text = "```\n{\"date\": \"2025-06-18\"}\n```";
        let doc = recover_document(text).unwrap();
        assert_eq!(doc["date"], "2025-06-18");
    }

    #[test]
    fn test_recovers_embedded_object() {
        let text = "The extracted data is {\"vessel_flag\": \"U.S.\"} as requested.";
        let doc = recover_document(text).unwrap();
        assert_eq!(doc["vessel_flag"], "U.S.");
    }

    #[test]
    fn test_array_is_not_a_document() {
        assert!(recover_document(r#"[{"vessel_name": "MV TEST"}]"#).is_none());
    }

    #[test]
    fn test_scalar_is_not_a_document() {
        assert!(recover_document("\"just a string\"").is_none());
        assert!(recover_document("42").is_none());
    }

    #[test]
    fn test_plain_text_is_not_a_document() {
        assert!(recover_document("Vessel Name: MATSON ANCHORAGE").is_none());
        assert!(!looks_like_json("Vessel Name: MATSON ANCHORAGE"));
    }

    #[test]
    fn test_braces_around_invalid_json_fall_through() {
        assert!(recover_document("set {a, b} is unordered").is_none());
    }

    #[test]
    fn test_looks_like_json_accepts_document() {
        assert!(looks_like_json(
            r#"{"arrival_tanks": [], "departure_tanks": [], "products": []}"#
        ));
    }

    #[test]
    fn test_nested_braces_resolve_to_outermost() {
        let text = "prefix {\"a\": {\"b\": 1}} suffix";
        let doc = recover_document(text).unwrap();
        assert_eq!(doc["a"]["b"], 1);
    }
}
