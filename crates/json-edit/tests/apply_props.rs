use json_edit::{apply, to_text, NodeRow, PathStep, Selection};
use json_edit_path::get;
use proptest::prelude::*;
use serde_json::{Map, Value};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        // quarters print and parse back exactly
        (-4_000_000i32..4_000_000).prop_map(|n| Value::from(f64::from(n) / 4.0)),
        "[a-zA-Z0-9 \"\\\\]{0,8}".prop_map(Value::from),
    ]
}

fn arb_json() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(4, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{0,3}", inner), 0..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Walk `doc` using `choices` to pick children, producing a path that exists.
fn pick_path(doc: &Value, choices: &[usize]) -> Vec<PathStep> {
    let mut path = Vec::new();
    let mut node = doc;
    for choice in choices {
        match node {
            Value::Array(arr) if !arr.is_empty() => {
                let idx = choice % arr.len();
                path.push(PathStep::Index(idx));
                node = &arr[idx];
            }
            Value::Object(map) if !map.is_empty() => {
                let (key, child) = map.iter().nth(choice % map.len()).unwrap();
                path.push(PathStep::from(key.as_str()));
                node = child;
            }
            _ => break,
        }
    }
    path
}

proptest! {
    #[test]
    fn apply_then_get_yields_value(
        doc in arb_json(),
        choices in prop::collection::vec(any::<usize>(), 0..5),
        value in arb_json(),
    ) {
        let path = pick_path(&doc, &choices);
        let out = apply(&doc.to_string(), &path, value.clone()).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        prop_assert_eq!(get(&parsed, &path), Some(&value));
    }

    #[test]
    fn leaf_projection_is_unquoted(s in ".{0,16}") {
        prop_assert_eq!(to_text(&[NodeRow::leaf(Value::String(s.clone()))]), s);
    }

    #[test]
    fn composite_projection_has_only_scalar_fields(
        entries in prop::collection::vec(("[a-z]{1,3}", arb_json()), 0..6),
    ) {
        let doc = Value::Object(entries.into_iter().collect::<Map<_, _>>());
        let selection = Selection::from_document(&doc, Vec::new()).unwrap();
        let projected: Value = serde_json::from_str(&to_text(&selection.rows)).unwrap();
        let projected = projected.as_object().unwrap();
        for (key, value) in doc.as_object().unwrap() {
            if value.is_object() || value.is_array() {
                prop_assert!(!projected.contains_key(key));
            } else {
                prop_assert_eq!(projected.get(key), Some(value));
            }
        }
    }
}
