//! Best-effort recovery of a JSON object from free-form model output
//!
//! Local models asked for JSON tend to wrap it in commentary, fence it in
//! markdown, or leave a trailing comma behind. The pipeline here tries a fixed
//! sequence of steps and stops at the first one that succeeds:
//!
//! 1. take the body of the first fenced code block (with or without a `json` tag)
//! 2. otherwise take everything from the first `{` to the last `}`
//! 3. parse the candidate
//! 4. on failure, drop trailing commas before `}` / `]` and parse once more
//! 5. unwrap a single-element array holding one object
//! 6. deserialize into the caller's type
//!
//! Nothing else is repaired.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*([\s\S]+?)```").expect("valid fence pattern"));

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("valid trailing comma pattern"));

/// Failure of one of the repair steps
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Neither a fenced block nor a `{ ... }` span was found
    #[error("No JSON block found in model output")]
    NoJsonFound,

    /// The candidate stayed invalid after the trailing-comma repair
    #[error("Failed to parse JSON: {source}\nRaw: {candidate}")]
    InvalidJson {
        source: serde_json::Error,
        candidate: String,
    },

    /// Valid JSON that does not fit the requested structure
    #[error("Output does not match the expected structure: {0}")]
    Validation(#[source] serde_json::Error),
}

/// Locate the JSON candidate inside `text`.
pub fn extract_json_candidate(text: &str) -> Result<&str, ParseError> {
    if let Some(inner) = FENCED_BLOCK.captures(text).and_then(|caps| caps.get(1)) {
        return Ok(inner.as_str().trim());
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => Ok(&text[start..=end]),
        _ => Err(ParseError::NoJsonFound),
    }
}

/// Remove commas that directly precede a closing brace or bracket.
pub fn strip_trailing_commas(candidate: &str) -> String {
    TRAILING_COMMA.replace_all(candidate, "$1").into_owned()
}

/// Parse a candidate, retrying once with trailing commas stripped.
pub fn parse_json_candidate(candidate: &str) -> Result<Value, ParseError> {
    match serde_json::from_str(candidate) {
        Ok(value) => Ok(value),
        Err(source) => serde_json::from_str(&strip_trailing_commas(candidate)).map_err(|_| {
            ParseError::InvalidJson {
                source,
                candidate: candidate.to_string(),
            }
        }),
    }
}

/// Unwrap `[{...}]` to `{...}`; any other value passes through.
fn unwrap_single_object(value: Value) -> Value {
    match value {
        Value::Array(mut items) if items.len() == 1 && items[0].is_object() => items.remove(0),
        other => other,
    }
}

/// Recover a JSON value from model output without validating its shape.
pub fn repair_json(text: &str) -> Result<Value, ParseError> {
    let candidate = extract_json_candidate(text)?;
    let parsed = parse_json_candidate(candidate)?;
    Ok(unwrap_single_object(parsed))
}

/// Recover JSON from model output and deserialize it into `T`.
pub fn try_parse_output<T: DeserializeOwned>(text: &str) -> Result<T, ParseError> {
    let value = repair_json(text)?;
    serde_json::from_value(value).map_err(ParseError::Validation)
}
