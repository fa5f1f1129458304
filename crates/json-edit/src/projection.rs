//! Projecting a node's rows into the text the user edits.

use serde_json::{Map, Value};
use tracing::warn;

use crate::json_pretty::to_string_indented;
use crate::types::{EditOptions, NodeRow, NodeShape};

/// Editable text for a set of rows, with default formatting.
///
/// See [`to_text_with`].
pub fn to_text(rows: &[NodeRow]) -> String {
    to_text_with(rows, &EditOptions::default())
}

/// Editable text for a set of rows.
///
/// - No rows: `{}`.
/// - A single keyless row (a leaf): the bare scalar, unquoted.
/// - Otherwise: the scalar fields as an indented JSON object, in row order.
///   Object/array rows and keyless rows are left out; nested containers are
///   edited by selecting them.
pub fn to_text_with(rows: &[NodeRow], options: &EditOptions) -> String {
    if rows.is_empty() {
        return "{}".to_string();
    }
    if let (NodeShape::Leaf { .. }, [row]) = (NodeShape::of(rows), rows) {
        return leaf_text(&row.value);
    }
    let mut fields = Map::new();
    for row in rows {
        if row.ty.is_container() {
            continue;
        }
        if let Some(key) = &row.key {
            fields.insert(key.clone(), row.value.clone());
        }
    }
    render_fields(&Value::Object(fields), options)
}

/// Pretty-print the composite seed. Falls back to compact text, never to an
/// empty seed.
fn render_fields(fields: &Value, options: &EditOptions) -> String {
    match to_string_indented(fields, options.indent) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "could not pretty-print fields, using compact form");
            fields.to_string()
        }
    }
}

fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
