//! JSON value helpers.

use serde_json::Value;

/// Returns true if a stored value counts as "set" for single-level
/// `setdefault`.
///
/// Falsy values:
///
/// - `null`
/// - `false`
/// - any number equal to zero (`0`, `0.0`, `-0.0`)
/// - the empty string
/// - the empty array and the empty object
///
/// Everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i != 0
            } else if let Some(u) = n.as_u64() {
                u != 0
            } else {
                n.as_f64().is_some_and(|f| f != 0.0)
            }
        }
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
