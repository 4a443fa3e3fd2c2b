//! Progress backup files.
//!
//! The file format is exactly the persisted progress record: one flat JSON
//! object mapping question id to answer text.

use crate::responses::ResponseMap;
use chrono::NaiveDate;
use serde_json::Value;
use sg_domain::error::{Error, Result};

/// Shown when an import is rejected.
pub const IMPORT_FAILED_MESSAGE: &str =
    "Could not import file. Please ensure it is a valid progress backup file.";

/// Result of parsing a backup document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub responses: ResponseMap,
    /// Keys whose values were not strings and were skipped.
    pub dropped: Vec<String>,
}

pub fn export_document(responses: &ResponseMap) -> Result<String> {
    Ok(serde_json::to_string(responses)?)
}

/// Parse a backup document.
///
/// Anything other than a top-level JSON object is an
/// [`Error::ImportFormat`]. Non-string values inside the object are dropped.
pub fn parse_document(document: &str) -> Result<ImportOutcome> {
    let value: Value = serde_json::from_str(document)
        .map_err(|e| Error::ImportFormat(format!("not valid JSON: {e}")))?;

    let Value::Object(entries) = value else {
        return Err(Error::ImportFormat(format!(
            "expected a JSON object, found {}",
            kind_of(&value)
        )));
    };

    let mut responses = ResponseMap::new();
    let mut dropped = Vec::new();
    for (key, value) in entries {
        match value {
            Value::String(answer) => responses.set(key, answer),
            other => {
                tracing::warn!(key = %key, kind = kind_of(&other), "dropping non-string answer on import");
                dropped.push(key);
            }
        }
    }

    Ok(ImportOutcome { responses, dropped })
}

/// `strategos-progress-YYYY-MM-DD.json`
pub fn default_file_name(date: NaiveDate) -> String {
    format!("strategos-progress-{}.json", date.format("%Y-%m-%d"))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_then_parse_preserves_map() {
        let mut responses = ResponseMap::new();
        responses.set("q_goals", "Grow \"fast\"\nand well");
        responses.set("q_kpis", "");
        let doc = export_document(&responses).unwrap();
        let outcome = parse_document(&doc).unwrap();
        assert_eq!(outcome.responses, responses);
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn empty_map_round_trips() {
        let doc = export_document(&ResponseMap::new()).unwrap();
        assert_eq!(doc, "{}");
        assert!(parse_document(&doc).unwrap().responses.is_empty());
    }

    #[test]
    fn non_object_documents_are_rejected() {
        for doc in [r#""text""#, "42", "[1,2]", "null", "true", "{oops"] {
            let err = parse_document(doc).unwrap_err();
            assert!(matches!(err, Error::ImportFormat(_)), "{doc}: {err}");
        }
    }

    #[test]
    fn non_string_values_are_dropped() {
        let outcome = parse_document(r#"{"q_goals":"grow","q_kpis":3,"q_trends":null}"#).unwrap();
        assert_eq!(outcome.responses.len(), 1);
        assert_eq!(outcome.responses.answer("q_goals"), Some("grow"));
        let mut dropped = outcome.dropped;
        dropped.sort();
        assert_eq!(dropped, ["q_kpis", "q_trends"]);
    }

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
        assert_eq!(default_file_name(date), "strategos-progress-2026-01-09.json");
    }
}
