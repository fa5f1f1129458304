//! # json-edit
//!
//! Path-addressed editing of a JSON document.
//!
//! ## Architecture
//!
//! ```text
//! selection (rows + path) ──project──▶ edit text
//!                                          │ user edits
//!                                          ▼
//!            leaf: coerce to original type / composite: parse fragment
//!                                          │
//!                                          ▼
//! current document text ──apply at path──▶ new document text ──▶ collaborators
//! ```
//!
//! The document is never changed in place: every save parses the current
//! text, rebuilds the nodes along the path and serializes a new text that
//! replaces the old one wholesale. A failed save leaves it untouched.
//!
//! ## Usage
//!
//! ```
//! use json_edit::{project, save, Selection};
//! use json_edit_path::PathStep;
//!
//! let doc = r#"{"customer": {"name": "Ada", "age": 36}}"#;
//! let path = vec![PathStep::from("customer"), PathStep::from("age")];
//! let selection = Selection::from_document(&serde_json::from_str(doc).unwrap(), path).unwrap();
//!
//! assert_eq!(project(&selection), "36");
//! let new_doc = save(&selection, "37", doc).unwrap();
//! assert!(new_doc.contains("\"age\": 37"));
//! ```

pub mod coerce;
mod errors;
pub mod json_cli;
mod json_pretty;
pub mod mutator;
pub mod projection;
pub mod session;
pub mod types;

pub use coerce::{coerce, LeafKind};
pub use errors::EditError;
pub use mutator::{apply, apply_with, set_in, MAX_DOCUMENT_DEPTH};
pub use projection::{to_text, to_text_with};
pub use session::{read_edit, Collaborators, EditSession, SessionState};
pub use types::{EditOptions, NodeRow, NodeShape, Selection, UnknownValueType, ValueType};

pub use json_edit_path::{format_path, Path, PathStep};

/// Text to show and edit for `selection`.
pub fn project(selection: &Selection) -> String {
    to_text(&selection.rows)
}

/// Save `edited_text` for `selection` into `document`.
///
/// Returns the new document text; `document` itself is never modified.
///
/// # Errors
///
/// See [`EditError`]. The leaf/composite rule is taken from the selection's
/// rows.
pub fn save(selection: &Selection, edited_text: &str, document: &str) -> Result<String, EditError> {
    let value = read_edit(edited_text, selection.shape())?;
    apply(document, &selection.path, value)
}
