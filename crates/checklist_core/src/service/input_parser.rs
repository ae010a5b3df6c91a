//! Pasted-text parsing into input records.
//!
//! # Responsibility
//! - Parse raw text as a JSON array of `{line, name}` objects.
//! - Report the first structural problem with its element index.
//!
//! # Invariants
//! - Parsing is all-or-nothing: one bad element rejects the whole paste.
//! - Whitespace-only text means "cleared", not an error.
//! - Only `line` and `name` are read; other keys are ignored.

use crate::model::record::InputRecord;
use log::{debug, warn};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field names required on every pasted element.
pub const FIELD_LINE: &str = "line";
pub const FIELD_NAME: &str = "name";

/// Outcome of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    /// Text was empty or whitespace only.
    Cleared,
    /// Text held a valid array (possibly empty).
    Records(Vec<InputRecord>),
}

/// Error for structurally invalid pasted text.
#[derive(Debug)]
pub enum InputError {
    /// Text is not JSON at all.
    InvalidJson(serde_json::Error),
    /// Top-level JSON value is not an array.
    NotAnArray,
    /// Element is not an object or lacks a required field.
    MissingField { index: usize, field: &'static str },
    /// Required field holds something other than a string or number.
    InvalidFieldType { index: usize, field: &'static str },
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "invalid JSON format: {err}"),
            Self::NotAnArray => write!(f, "input must be an array of objects"),
            Self::MissingField { index, field } => write!(
                f,
                "item {index} must be an object with \"line\" and \"name\" properties (missing `{field}`)"
            ),
            Self::InvalidFieldType { index, field } => write!(
                f,
                "item {index} has a non-text `{field}`; expected a string or number"
            ),
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for InputError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value)
    }
}

/// Parses pasted text into input records.
///
/// # Errors
/// - [`InputError::InvalidJson`] when the text is not JSON.
/// - [`InputError::NotAnArray`] when the top-level value is not an array.
/// - [`InputError::MissingField`] / [`InputError::InvalidFieldType`] for the
///   first offending element.
pub fn parse_input(text: &str) -> Result<ParsedInput, InputError> {
    if text.trim().is_empty() {
        debug!("event=input_cleared module=parser status=ok");
        return Ok(ParsedInput::Cleared);
    }

    let value: Value = serde_json::from_str(text).inspect_err(|err| {
        warn!(
            "event=input_rejected module=parser status=error reason=invalid_json line={} column={}",
            err.line(),
            err.column()
        );
    })?;

    let Value::Array(items) = value else {
        warn!("event=input_rejected module=parser status=error reason=not_array");
        return Err(InputError::NotAnArray);
    };

    let records = items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_item(index, item))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|err| {
            warn!("event=input_rejected module=parser status=error reason=invalid_item detail={err}");
        })?;

    debug!(
        "event=input_parsed module=parser status=ok count={}",
        records.len()
    );
    Ok(ParsedInput::Records(records))
}

fn parse_item(index: usize, item: &Value) -> Result<InputRecord, InputError> {
    let Value::Object(object) = item else {
        return Err(InputError::MissingField {
            index,
            field: FIELD_LINE,
        });
    };

    Ok(InputRecord {
        line: text_field(index, object, FIELD_LINE)?,
        name: text_field(index, object, FIELD_NAME)?,
    })
}

fn text_field(
    index: usize,
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<String, InputError> {
    match object.get(field) {
        None => Err(InputError::MissingField { index, field }),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(_) => Err(InputError::InvalidFieldType { index, field }),
    }
}
