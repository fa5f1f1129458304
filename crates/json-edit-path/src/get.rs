use serde_json::Value;

use crate::types::PathStep;

/// Get a value from a JSON document by path.
///
/// Returns `None` if any step does not resolve. An index step on an object
/// reads the key spelled as that index; a key step on an array never matches.
pub fn get<'a>(val: &'a Value, path: &[PathStep]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = match (current, step) {
            (Value::Array(arr), PathStep::Index(idx)) => arr.get(*idx)?,
            (Value::Object(map), step) => map.get(step.as_key().as_ref())?,
            _ => return None,
        };
    }
    Some(current)
}
