use serde_json::{Map, Value};

use crate::modules::homework::Submission;

/// Structural problem with a homework API payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("API response is not a JSON object: got {found}")]
    NotAnObject { found: &'static str },
    #[error("API response has no '{field}' key")]
    MissingField { field: &'static str },
    #[error("'{field}' in API response is {found}, expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl ValidationError {
    /// Name of the offending field; `response` for the payload root.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotAnObject { .. } => "response",
            Self::MissingField { field } | Self::WrongType { field, .. } => field,
        }
    }
}

/// Result of a successful shape check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckedResponse {
    Latest(Submission),
    /// `homeworks` is an empty list: nothing submitted in the window.
    Empty,
}

/// Checks the payload shape and extracts the most recent submission.
pub fn validate(payload: &Value) -> Result<CheckedResponse, ValidationError> {
    let root = payload.as_object().ok_or(ValidationError::NotAnObject {
        found: json_type(payload),
    })?;

    let homeworks = root
        .get("homeworks")
        .ok_or(ValidationError::MissingField { field: "homeworks" })?;

    let homeworks = homeworks.as_array().ok_or(ValidationError::WrongType {
        field: "homeworks",
        expected: "an array",
        found: json_type(homeworks),
    })?;

    let Some(first) = homeworks.first() else {
        return Ok(CheckedResponse::Empty);
    };

    let record = first.as_object().ok_or(ValidationError::WrongType {
        field: "homeworks[0]",
        expected: "an object",
        found: json_type(first),
    })?;

    let mut metadata = record.clone();
    // Practicum names the field `homework_name`
    let name = take_string(&mut metadata, &["name", "homework_name"], "name")?;
    let status = take_string(&mut metadata, &["status"], "status")?;

    Ok(CheckedResponse::Latest(Submission {
        name,
        status,
        metadata,
    }))
}

/// Server clock returned next to `homeworks`, if any.
pub fn current_date(payload: &Value) -> Option<i64> {
    payload.get("current_date").and_then(Value::as_i64)
}

fn take_string(
    record: &mut Map<String, Value>,
    keys: &[&str],
    field: &'static str,
) -> Result<String, ValidationError> {
    let key = keys
        .iter()
        .find(|key| record.contains_key(**key))
        .ok_or(ValidationError::MissingField { field })?;

    match record.remove(*key) {
        Some(Value::String(value)) => Ok(value),
        Some(other) => Err(ValidationError::WrongType {
            field,
            expected: "a string",
            found: json_type(&other),
        }),
        None => Err(ValidationError::MissingField { field }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
