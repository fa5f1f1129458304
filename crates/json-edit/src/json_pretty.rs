//! Indented JSON printer shared by the projection and the mutator.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

/// Serialize `value` as multi-line JSON indented by `indent` spaces.
///
/// With `indent == 2` the output matches `serde_json::to_string_pretty`.
pub fn to_string_indented(value: &Value, indent: usize) -> Result<String, serde_json::Error> {
    let indent = vec![b' '; indent];
    let mut ser = Serializer::with_formatter(Vec::new(), PrettyFormatter::with_indent(&indent));
    value.serialize(&mut ser)?;
    // serde_json only ever writes UTF-8
    Ok(String::from_utf8_lossy(&ser.into_inner()).into_owned())
}
