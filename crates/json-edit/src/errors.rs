//! Error types for the editor

use json_edit_path::PathError;
use thiserror::Error;

/// Why a save attempt failed.
///
/// The `Display` text is what the session shows to the user. Every variant
/// leaves the authoritative document untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("Invalid boolean: {0:?} (expected true or false)")]
    InvalidBoolean(String),

    #[error("Invalid JSON: {0}")]
    InvalidFragment(String),

    #[error("Could not apply edit: {0}")]
    ApplyFailed(String),

    #[error("No edit in progress")]
    NotEditing,
}

impl From<PathError> for EditError {
    fn from(e: PathError) -> Self {
        EditError::ApplyFailed(e.to_string())
    }
}
