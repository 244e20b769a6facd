//! Purpose: Provide the internal JSON decode entrypoints and parse-failure categories.
//! Exports: `from_slice`, `record_from_slice`, `ParseFailure`, `ParseFailureCategory`.
//! Role: Parser boundary that turns payload bytes into a flat key -> value record.
//! Invariants: A payload whose top level is not an object is rejected, never coerced.
//! Invariants: Category labels are stable; hints never echo payload contents.
//! Notes: Error mapping is done by callsites so domain context stays explicit.

use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_json::{Map, Value};
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
    NotObject,
}

impl ParseFailureCategory {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Io => "io",
            ParseFailureCategory::NotObject => "not-object",
        }
    }
}

#[derive(Debug)]
pub(crate) enum ParseFailure {
    Json(serde_json::Error),
    NotObject { found: &'static str },
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::Json(err) => write!(f, "{err}"),
            ParseFailure::NotObject { found } => {
                write!(f, "expected a JSON object at the top level, found {found}")
            }
        }
    }
}

impl StdError for ParseFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ParseFailure::Json(err) => Some(err),
            ParseFailure::NotObject { .. } => None,
        }
    }
}

pub(crate) fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(input)
}

pub(crate) fn record_from_slice(input: &[u8]) -> Result<Map<String, Value>, ParseFailure> {
    match from_slice::<Value>(input).map_err(ParseFailure::Json)? {
        Value::Object(map) => Ok(map),
        other => Err(ParseFailure::NotObject {
            found: value_kind(&other),
        }),
    }
}

pub(crate) fn categorize(failure: &ParseFailure) -> ParseFailureCategory {
    match failure {
        ParseFailure::Json(err) => categorize_error(err),
        ParseFailure::NotObject { .. } => ParseFailureCategory::NotObject,
    }
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof => ParseFailureCategory::Eof,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub(crate) fn hint_for_failure(failure: &ParseFailure, context: &str) -> String {
    let category = categorize(failure);
    let advice = match category {
        ParseFailureCategory::Syntax => "check the payload is valid JSON",
        ParseFailureCategory::Eof => "the payload ended early; check it is complete",
        ParseFailureCategory::Data => "the JSON is well formed but has an unexpected shape",
        ParseFailureCategory::Io => "the payload could not be read",
        ParseFailureCategory::NotObject => "wrap the fields in a top-level JSON object",
    };
    format!(
        "parse category: {}; context: {context}; {advice}",
        category.label()
    )
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
