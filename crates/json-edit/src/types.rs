//! Row model shared by the projection, the coercer and the session.

use std::fmt;
use std::str::FromStr;

use json_edit_path::{get, Path};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ── Value types ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Null,
    Object,
    Array,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Null => "null",
            ValueType::Object => "object",
            ValueType::Array => "array",
        }
    }

    /// The type of a JSON value.
    pub fn of(val: &Value) -> Self {
        match val {
            Value::String(_) => ValueType::String,
            Value::Number(_) => ValueType::Number,
            Value::Bool(_) => ValueType::Boolean,
            Value::Null => ValueType::Null,
            Value::Object(_) => ValueType::Object,
            Value::Array(_) => ValueType::Array,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ValueType::Object | ValueType::Array)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown value type: {0:?}")]
pub struct UnknownValueType(pub String);

impl FromStr for ValueType {
    type Err = UnknownValueType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(ValueType::String),
            "number" => Ok(ValueType::Number),
            "boolean" => Ok(ValueType::Boolean),
            "null" => Ok(ValueType::Null),
            "object" => Ok(ValueType::Object),
            "array" => Ok(ValueType::Array),
            other => Err(UnknownValueType(other.to_string())),
        }
    }
}

// ── Rows and selections ───────────────────────────────────────────────────

/// One flattened field of a displayed node.
///
/// A keyless row is a bare scalar. Rows typed `object`/`array` stand for a
/// nested container; their `value` is only a summary (the child count) and
/// never takes part in editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: Value,
    #[serde(rename = "type")]
    pub ty: ValueType,
}

impl NodeRow {
    /// A keyless row holding a bare scalar.
    pub fn leaf(value: Value) -> Self {
        let ty = ValueType::of(&value);
        Self { key: None, value, ty }
    }

    /// A keyed row. Containers are recorded by type with their child count.
    pub fn field(key: impl Into<String>, value: &Value) -> Self {
        let ty = ValueType::of(value);
        let value = match value {
            Value::Object(map) => Value::from(map.len()),
            Value::Array(arr) => Value::from(arr.len()),
            scalar => scalar.clone(),
        };
        Self {
            key: Some(key.into()),
            value,
            ty,
        }
    }
}

/// The node currently open for viewing or editing: its rows and its path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub rows: Vec<NodeRow>,
    pub path: Path,
}

impl Selection {
    pub fn new(rows: Vec<NodeRow>, path: Path) -> Self {
        Self { rows, path }
    }

    /// Build the selection for the node at `path`, flattened the way the
    /// graph view flattens it.
    ///
    /// A scalar yields one keyless row. An object yields one row per entry,
    /// an array one row per element keyed by its index.
    ///
    /// Returns `None` if the path does not resolve.
    pub fn from_document(doc: &Value, path: Path) -> Option<Self> {
        let node = get(doc, &path)?;
        let rows = match node {
            Value::Object(map) => map.iter().map(|(k, v)| NodeRow::field(k.as_str(), v)).collect(),
            Value::Array(arr) => arr
                .iter()
                .enumerate()
                .map(|(i, v)| NodeRow::field(i.to_string(), v))
                .collect(),
            scalar => vec![NodeRow::leaf(scalar.clone())],
        };
        Some(Self { rows, path })
    }

    pub fn shape(&self) -> NodeShape {
        NodeShape::of(&self.rows)
    }
}

/// How a node's edited text is read back on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// Exactly one keyless row: the text is coerced to the row's type.
    Leaf { ty: ValueType },
    /// Anything else: the text is a JSON fragment.
    Composite,
}

impl NodeShape {
    pub fn of(rows: &[NodeRow]) -> Self {
        match rows {
            [row] if row.key.is_none() => NodeShape::Leaf { ty: row.ty },
            _ => NodeShape::Composite,
        }
    }
}

// ── Options ───────────────────────────────────────────────────────────────

/// Formatting options for projected text and re-serialized documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOptions {
    /// Spaces per indentation level.
    pub indent: usize,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use json_edit_path::PathStep;
    use serde_json::json;

    #[test]
    fn value_type_of() {
        assert_eq!(ValueType::of(&json!("a")), ValueType::String);
        assert_eq!(ValueType::of(&json!(1.5)), ValueType::Number);
        assert_eq!(ValueType::of(&json!(false)), ValueType::Boolean);
        assert_eq!(ValueType::of(&json!(null)), ValueType::Null);
        assert_eq!(ValueType::of(&json!({})), ValueType::Object);
        assert_eq!(ValueType::of(&json!([])), ValueType::Array);
    }

    #[test]
    fn value_type_from_str() {
        assert_eq!("array".parse::<ValueType>(), Ok(ValueType::Array));
        assert_eq!(ValueType::Boolean.as_str().parse::<ValueType>(), Ok(ValueType::Boolean));
        assert_eq!(
            "Number".parse::<ValueType>(),
            Err(UnknownValueType("Number".to_string()))
        );
    }

    #[test]
    fn row_serde_uses_type_field() {
        let row: NodeRow = serde_json::from_value(json!({"value": 3, "type": "number"})).unwrap();
        assert_eq!(row, NodeRow::leaf(json!(3)));
        let out = serde_json::to_value(NodeRow::field("a", &json!(true))).unwrap();
        assert_eq!(out, json!({"key": "a", "value": true, "type": "boolean"}));
    }

    #[test]
    fn field_summarises_containers() {
        let row = NodeRow::field("items", &json!([1, 2, 3]));
        assert_eq!(row.ty, ValueType::Array);
        assert_eq!(row.value, json!(3));
    }

    #[test]
    fn shape_single_keyless_row_is_leaf() {
        let rows = vec![NodeRow::leaf(json!("x"))];
        assert_eq!(NodeShape::of(&rows), NodeShape::Leaf { ty: ValueType::String });
    }

    #[test]
    fn shape_keyed_or_many_rows_is_composite() {
        assert_eq!(NodeShape::of(&[]), NodeShape::Composite);
        assert_eq!(NodeShape::of(&[NodeRow::field("a", &json!(1))]), NodeShape::Composite);
        let rows = vec![NodeRow::leaf(json!(1)), NodeRow::leaf(json!(2))];
        assert_eq!(NodeShape::of(&rows), NodeShape::Composite);
    }

    #[test]
    fn selection_from_document() {
        let doc = json!({"customer": {"name": "Ada", "tags": ["x"], "age": 36}});
        let sel = Selection::from_document(&doc, vec![PathStep::from("customer")]).unwrap();
        assert_eq!(
            sel.rows,
            vec![
                NodeRow::field("name", &json!("Ada")),
                NodeRow { key: Some("tags".into()), value: json!(1), ty: ValueType::Array },
                NodeRow::field("age", &json!(36)),
            ]
        );

        let leaf = Selection::from_document(&doc, vec!["customer".into(), "age".into()]).unwrap();
        assert_eq!(leaf.shape(), NodeShape::Leaf { ty: ValueType::Number });

        let arr = Selection::from_document(&doc, vec!["customer".into(), "tags".into()]).unwrap();
        assert_eq!(arr.rows, vec![NodeRow::field("0", &json!("x"))]);

        assert!(Selection::from_document(&doc, vec![PathStep::from("missing")]).is_none());
    }
}
