use crate::utils::{Result, TranslatorError};
use serde_json::Value as JsonValue;

pub const TRANSLATION_FIELD: &str = "german_translation";
pub const KEY_FIELD: &str = "key";

/// Markers a model tends to wrap JSON in. Order matters: the tagged fence goes first.
const FENCE_MARKERS: &[&str] = &["```json", "```"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReply {
    Translation {
        text: String,
        echoed_key: Option<String>,
    },
    /// Valid JSON object without the translation field.
    MissingField,
}

/// First stage: trim and drop code fence markers wherever they occur.
pub fn strip_code_fences(raw: &str) -> String {
    FENCE_MARKERS
        .iter()
        .fold(raw.trim().to_string(), |acc, marker| acc.replace(marker, ""))
}

/// Second stage: parse the cleaned text as a JSON object.
///
/// Syntax errors and non-object replies are errors; the caller decides what they become.
pub fn parse_reply(cleaned: &str) -> Result<ParsedReply> {
    let value: JsonValue = serde_json::from_str(cleaned)?;

    let object = value.as_object().ok_or_else(|| {
        TranslatorError::UnexpectedReply(format!("expected a JSON object, got {}", json_kind(&value)))
    })?;

    let echoed_key = object.get(KEY_FIELD).map(json_to_text);

    Ok(match object.get(TRANSLATION_FIELD) {
        Some(field) => ParsedReply::Translation {
            text: json_to_text(field),
            echoed_key,
        },
        None => ParsedReply::MissingField,
    })
}

pub fn parse_response(raw: &str) -> Result<ParsedReply> {
    parse_reply(&strip_code_fences(raw))
}

fn json_to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
