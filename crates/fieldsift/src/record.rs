//! The [`Record`] trait: read-only access to one input item.
//!
//! The core never mutates records. It only asks for the scalar stored under a
//! key, so anything that can answer that question can be searched.

use std::collections::{BTreeMap, HashMap};

use crate::value::{Number, Scalar, Value};

/// A single input item, viewed as a mapping from key to scalar value.
///
/// # Manual Implementation
///
/// ```
/// use fieldsift::{Record, Value, Number};
///
/// struct Person {
///     name: String,
///     age: u8,
/// }
///
/// impl Record for Person {
///     fn field_value(&self, key: &str) -> Value<'_> {
///         match key {
///             "name" => Value::Text(&self.name),
///             "age" => Value::Number(Number::U64(self.age as u64)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value stored under `key`, or [`Value::None`] if the key is
    /// absent, null, or not a scalar.
    fn field_value(&self, key: &str) -> Value<'_>;
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field_value(&self, key: &str) -> Value<'_> {
        self.get(key).map(json_value).unwrap_or(Value::None)
    }
}

impl Record for serde_json::Value {
    fn field_value(&self, key: &str) -> Value<'_> {
        match self {
            serde_json::Value::Object(map) => map.field_value(key),
            _ => Value::None,
        }
    }
}

impl Record for BTreeMap<String, Scalar> {
    fn field_value(&self, key: &str) -> Value<'_> {
        self.get(key).map(Scalar::as_value).unwrap_or(Value::None)
    }
}

impl Record for HashMap<String, Scalar> {
    fn field_value(&self, key: &str) -> Value<'_> {
        self.get(key).map(Scalar::as_value).unwrap_or(Value::None)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field_value(&self, key: &str) -> Value<'_> {
        (**self).field_value(key)
    }
}

/// Converts a JSON scalar to a [`Value`]. Arrays and objects are not scalars.
fn json_value(value: &serde_json::Value) -> Value<'_> {
    match value {
        serde_json::Value::String(s) => Value::Text(s),
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(Number::I64(i))
            } else if let Some(u) = n.as_u64() {
                Value::Number(Number::U64(u))
            } else {
                n.as_f64()
                    .map(|f| Value::Number(Number::F64(f)))
                    .unwrap_or(Value::None)
            }
        }
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Value::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_object_values() {
        let record = json!({
            "name": "Alice",
            "age": 42,
            "height": 1.7,
            "member": true,
            "nickname": null,
            "tags": ["a", "b"]
        });

        assert_eq!(record.field_value("name"), Value::Text("Alice"));
        assert_eq!(record.field_value("age"), Value::Number(Number::I64(42)));
        assert_eq!(
            record.field_value("height"),
            Value::Number(Number::F64(1.7))
        );
        assert_eq!(record.field_value("member"), Value::Bool(true));
        assert_eq!(record.field_value("nickname"), Value::None);
        assert_eq!(record.field_value("tags"), Value::None);
        assert_eq!(record.field_value("unknown"), Value::None);
    }

    #[test]
    fn non_object_json_has_no_fields() {
        assert_eq!(json!([1, 2]).field_value("0"), Value::None);
    }

    #[test]
    fn scalar_maps() {
        let mut record = BTreeMap::new();
        record.insert("name".to_string(), Scalar::from("Bob"));
        assert_eq!(record.field_value("name"), Value::Text("Bob"));
        assert_eq!((&record).field_value("name"), Value::Text("Bob"));
        assert_eq!(record.field_value("age"), Value::None);
    }
}
