//! Turning edited leaf text back into a typed value.
//!
//! The four primitive kinds are strict: text that does not read as the
//! declared type is rejected. Anything else is lenient and falls back to a
//! plain string, so `Other` never fails.

use serde_json::{Number, Value};

use crate::errors::EditError;
use crate::types::ValueType;

/// Largest integer an `f64` represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Declared type of the leaf being edited, as far as coercion cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    String,
    Number,
    Boolean,
    Null,
    Other,
}

impl From<ValueType> for LeafKind {
    fn from(ty: ValueType) -> Self {
        match ty {
            ValueType::String => LeafKind::String,
            ValueType::Number => LeafKind::Number,
            ValueType::Boolean => LeafKind::Boolean,
            ValueType::Null => LeafKind::Null,
            ValueType::Object | ValueType::Array => LeafKind::Other,
        }
    }
}

/// Coerce raw edited text to a value of the declared kind.
///
/// # Errors
///
/// - `EditError::InvalidNumber` - `Number` text is not a finite numeric literal
/// - `EditError::InvalidBoolean` - `Boolean` text is not `true`/`false`
///   (case-insensitive, surrounding whitespace ignored)
///
/// # Example
///
/// ```
/// use json_edit::{coerce, LeafKind};
/// use serde_json::json;
///
/// assert_eq!(coerce(" TRUE ", LeafKind::Boolean).unwrap(), json!(true));
/// assert_eq!(coerce("42", LeafKind::Number).unwrap(), json!(42));
/// assert_eq!(coerce("whatever", LeafKind::Null).unwrap(), json!(null));
/// assert_eq!(coerce("[1, 2", LeafKind::Other).unwrap(), json!("[1, 2"));
/// ```
pub fn coerce(raw: &str, kind: LeafKind) -> Result<Value, EditError> {
    match kind {
        LeafKind::String => Ok(Value::String(raw.to_string())),
        LeafKind::Number => parse_number(raw),
        LeafKind::Boolean => match raw.trim().to_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(EditError::InvalidBoolean(raw.to_string())),
        },
        LeafKind::Null => Ok(Value::Null),
        LeafKind::Other => {
            Ok(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
        }
    }
}

fn parse_number(raw: &str) -> Result<Value, EditError> {
    let invalid = || EditError::InvalidNumber(raw.to_string());
    let text = raw.trim();
    if let Ok(i) = text.parse::<i64>() {
        return Ok(Value::from(i));
    }
    if let Ok(u) = text.parse::<u64>() {
        return Ok(Value::from(u));
    }
    let f: f64 = text.parse().map_err(|_| invalid())?;
    // Whole floats print as integers, so "1e3" saves as 1000 rather than 1000.0
    if f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER {
        return Ok(Value::from(f as i64));
    }
    Number::from_f64(f).map(Value::Number).ok_or_else(invalid)
}
