//! `json-cli`: command-line access to the editing pipeline.
//!
//! Provides the core logic used by the `json-edit` binary:
//! - `show`: print the editable projection of the node at a path
//! - `set`: save edited text for the node at a path, print the new document
//!
//! Documents arrive as text (stdin in the binary) and leave as text.

use json_edit_path::{format_path, parse_path, PathError};
use serde_json::Value;

use crate::errors::EditError;
use crate::projection::to_text_with;
use crate::session::{Collaborators, EditSession};
use crate::types::{EditOptions, Selection};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Path(PathError),
    Edit(EditError),
    NotFound(String),
    Usage(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Path(e)      => write!(f, "{e}"),
            CliError::Edit(e)      => write!(f, "{e}"),
            CliError::NotFound(p)  => write!(f, "Nothing at {p}"),
            CliError::Usage(msg)   => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<PathError> for CliError {
    fn from(e: PathError) -> Self { CliError::Path(e) }
}

impl From<EditError> for CliError {
    fn from(e: EditError) -> Self { CliError::Edit(e) }
}

fn parse_document(doc_json: &str) -> Result<Value, CliError> {
    serde_json::from_str(doc_json)
        .map_err(|e| CliError::Edit(EditError::MalformedDocument(e.to_string())))
}

// ── show ──────────────────────────────────────────────────────────────────

/// Projection of the node at `path_text` in `doc_json`.
///
/// `path_text` uses the display notation, e.g. `$["customer"][0]`.
pub fn show(doc_json: &str, path_text: &str, options: &EditOptions) -> Result<String, CliError> {
    let doc = parse_document(doc_json)?;
    let path = parse_path(path_text)?;
    let display = format_path(&path);
    let selection = Selection::from_document(&doc, path).ok_or(CliError::NotFound(display))?;
    Ok(to_text_with(&selection.rows, options))
}

// ── set ───────────────────────────────────────────────────────────────────

/// No editor or graph is attached; the caller prints the returned document.
struct Detached;

impl Collaborators for Detached {
    fn replace_document(&mut self, _text: &str) {}

    fn document_replaced(&mut self, _text: &str) {}

    fn clear_selection(&mut self) {}
}

/// Save `edited` for the node at `path_text` and return the new document.
///
/// A path that does not resolve yet is edited as an empty composite node, so
/// `edited` must then be a JSON fragment; missing containers are created.
pub fn set(
    doc_json: &str,
    path_text: &str,
    edited: &str,
    options: &EditOptions,
) -> Result<String, CliError> {
    let doc = parse_document(doc_json)?;
    let path = parse_path(path_text)?;
    let selection = match Selection::from_document(&doc, path.clone()) {
        Some(selection) => selection,
        None => Selection::new(Vec::new(), path),
    };

    let mut session = EditSession::with_options(options.clone());
    session.begin_edit(&selection);
    session.set_text(edited);
    Ok(session.save(doc_json, &mut Detached)?)
}

// ── argument parsing ──────────────────────────────────────────────────────

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show { path: String },
    Set { path: String, text: String },
}

/// Parse `json-edit [--indent N] <show PATH | set PATH TEXT>`.
pub fn parse_args(args: &[String]) -> Result<(Command, EditOptions), CliError> {
    let mut options = EditOptions::default();
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--indent" => {
                let n = iter
                    .next()
                    .ok_or_else(|| CliError::Usage("--indent needs a value".to_string()))?;
                options.indent = n
                    .parse()
                    .map_err(|_| CliError::Usage(format!("invalid --indent value: {n}")))?;
            }
            _ => positional.push(arg.clone()),
        }
    }

    let command = match positional.as_slice() {
        [cmd, path] if cmd == "show" => Command::Show { path: path.clone() },
        [cmd, path, text] if cmd == "set" => Command::Set {
            path: path.clone(),
            text: text.clone(),
        },
        _ => return Err(CliError::Usage(USAGE.to_string())),
    };
    Ok((command, options))
}

pub const USAGE: &str = "usage: json-edit [--indent N] show '<path>' | set '<path>' '<text>'";

/// Run a parsed command against a document.
pub fn run(command: &Command, doc_json: &str, options: &EditOptions) -> Result<String, CliError> {
    match command {
        Command::Show { path } => show(doc_json, path, options),
        Command::Set { path, text } => set(doc_json, path, text, options),
    }
}
