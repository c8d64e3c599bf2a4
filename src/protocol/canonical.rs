//! Deterministic JSON rendering with sorted object keys.
//!
//! Action Cable servers compare subscription identifiers as opaque strings,
//! so two renderings of the same identifier must be byte-identical. This
//! module renders a [`serde_json::Value`] with every object's keys in
//! lexicographic order, recursively, regardless of the backing map's
//! iteration order (which changes if `serde_json`'s `preserve_order` feature
//! is unified into the build by another crate in the dependency graph).

use serde_json::Value;

use crate::error::CableError;

/// Renders `value` as compact JSON with all object keys sorted.
///
/// Scalars are formatted by `serde_json` itself, so numbers and string
/// escapes match what the rest of the ecosystem produces.
///
/// # Errors
///
/// Returns [`CableError::Encoding`] if a scalar fails to render; this does
/// not happen for values built from well-formed JSON trees.
pub(crate) fn to_canonical_string(value: &Value) -> Result<String, CableError> {
    let mut out = String::new();
    write_value(value, &mut out)?;
    Ok(out)
}

fn write_value(value: &Value, out: &mut String) -> Result<(), CableError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&serde_json::to_string(n)?),
        Value::String(s) => out.push_str(&serde_json::to_string(s)?),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                write_value(item, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

/// Human-readable JSON type name, for error messages.
pub(crate) const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;

    fn canonical(value: &Value) -> String {
        let Ok(s) = to_canonical_string(value) else {
            panic!("canonical rendering failed");
        };
        s
    }

    #[test]
    fn scalars_match_serde_json() {
        assert_eq!(canonical(&json!(null)), "null");
        assert_eq!(canonical(&json!(true)), "true");
        assert_eq!(canonical(&json!(false)), "false");
        assert_eq!(canonical(&json!(42)), "42");
        assert_eq!(canonical(&json!(-1.5)), "-1.5");
        assert_eq!(canonical(&json!("hi")), "\"hi\"");
    }

    #[test]
    fn string_escapes_match_serde_json() {
        let value = json!("line\nbreak \"quoted\" \\ unicode \u{1F600}");
        let Ok(expected) = serde_json::to_string(&value) else {
            panic!("serde_json failed");
        };
        assert_eq!(canonical(&value), expected);
    }

    #[test]
    fn object_keys_are_sorted() {
        let value = json!({"zebra": 1, "apple": 2, "mango": 3});
        assert_eq!(canonical(&value), "{\"apple\":2,\"mango\":3,\"zebra\":1}");
    }

    #[test]
    fn nested_objects_are_sorted_recursively() {
        let value = json!({
            "outer": {"delta": 4, "alpha": 1},
            "array": [{"b": 2, "a": 1}, null],
        });
        assert_eq!(
            canonical(&value),
            "{\"array\":[{\"a\":1,\"b\":2},null],\"outer\":{\"alpha\":1,\"delta\":4}}"
        );
    }

    #[test]
    fn arrays_preserve_element_order() {
        let value = json!([3, 1, 2]);
        assert_eq!(canonical(&value), "[3,1,2]");
    }

    #[test]
    fn empty_containers() {
        assert_eq!(canonical(&json!({})), "{}");
        assert_eq!(canonical(&json!([])), "[]");
    }

    #[test]
    fn value_kind_names() {
        assert_eq!(value_kind(&json!(null)), "null");
        assert_eq!(value_kind(&json!(1)), "a number");
        assert_eq!(value_kind(&json!([])), "an array");
        assert_eq!(value_kind(&json!({})), "an object");
    }
}
