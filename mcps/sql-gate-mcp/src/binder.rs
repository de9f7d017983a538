//! Parameter binding
//!
//! Decodes the caller's parameter payload into named scalar values. Drivers
//! attach each entry under its bind name (`@name`); nulls bind as SQL NULL.

use serde_json::{Map, Value};

use crate::types::{SqlError, SqlResult};
use crate::value::SqlValue;

/// Named bind values for a single statement, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: Vec<(String, SqlValue)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a caller payload
    ///
    /// Accepts nothing, `null`, a JSON object, or a string holding a JSON
    /// object. Every value must be a scalar.
    pub fn from_json(raw: Option<&Value>) -> SqlResult<Self> {
        match raw {
            None | Some(Value::Null) => Ok(Self::new()),
            Some(Value::Object(map)) => Self::from_map(map),
            Some(Value::String(text)) => {
                let decoded: Value = serde_json::from_str(text).map_err(|e| {
                    SqlError::ParameterFormat(format!("parameters are not valid JSON: {}", e))
                })?;
                match decoded {
                    Value::Object(map) => Self::from_map(&map),
                    other => Err(SqlError::ParameterFormat(format!(
                        "parameters must be an object, got {}",
                        json_type(&other)
                    ))),
                }
            }
            Some(other) => Err(SqlError::ParameterFormat(format!(
                "parameters must be an object, got {}",
                json_type(other)
            ))),
        }
    }

    fn from_map(map: &Map<String, Value>) -> SqlResult<Self> {
        let mut set = Self::new();
        for (name, value) in map {
            set.insert(name, scalar_from_json(name, value)?)?;
        }
        Ok(set)
    }

    /// Add a parameter, validating its name
    pub fn insert(&mut self, name: impl Into<String>, value: SqlValue) -> SqlResult<()> {
        let name = name.into();
        validate_name(&name)?;
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A bind parameter name is non-empty and made of letters, digits and `_`
fn validate_name(name: &str) -> SqlResult<()> {
    if name.is_empty() {
        return Err(SqlError::ParameterFormat(
            "parameter name cannot be empty".to_string(),
        ));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SqlError::ParameterFormat(format!(
            "invalid parameter name '{}': only letters, digits and '_' are allowed",
            name
        )));
    }
    Ok(())
}

fn scalar_from_json(name: &str, value: &Value) -> SqlResult<SqlValue> {
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(b) => Ok(SqlValue::Boolean(*b)),
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(SqlValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(SqlValue::Float(f))
            } else {
                Err(SqlError::ParameterFormat(format!(
                    "parameter '{}' is out of range: {}",
                    name, n
                )))
            }
        }
        Value::Array(_) | Value::Object(_) => Err(SqlError::ParameterFormat(format!(
            "parameter '{}' must be a scalar, got {}",
            name,
            json_type(value)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_payload_is_empty() {
        assert!(ParameterSet::from_json(None).unwrap().is_empty());
        assert!(ParameterSet::from_json(Some(&Value::Null)).unwrap().is_empty());
    }

    #[test]
    fn test_object_payload() {
        let raw = json!({"id": 5, "name": "Ada", "ratio": 0.5, "active": true, "note": null});
        let params = ParameterSet::from_json(Some(&raw)).unwrap();

        assert_eq!(params.len(), 5);
        assert_eq!(params.get("id"), Some(&SqlValue::Integer(5)));
        assert_eq!(params.get("name"), Some(&SqlValue::Text("Ada".into())));
        assert_eq!(params.get("ratio"), Some(&SqlValue::Float(0.5)));
        assert_eq!(params.get("active"), Some(&SqlValue::Boolean(true)));
        // Null is kept, not dropped
        assert_eq!(params.get("note"), Some(&SqlValue::Null));
    }

    #[test]
    fn test_stringified_payload() {
        let raw = Value::String(r#"{"id": 5}"#.to_string());
        let params = ParameterSet::from_json(Some(&raw)).unwrap();
        assert_eq!(params.get("id"), Some(&SqlValue::Integer(5)));
    }

    #[test]
    fn test_malformed_payloads_rejected() {
        let cases = vec![
            json!([1, 2]),
            json!(42),
            json!(true),
            Value::String("not json".to_string()),
            Value::String("[1]".to_string()),
            json!({"ids": [1, 2]}),
            json!({"nested": {"a": 1}}),
        ];
        for raw in cases {
            let err = ParameterSet::from_json(Some(&raw)).unwrap_err();
            assert!(
                matches!(err, SqlError::ParameterFormat(_)),
                "expected ParameterFormat for {}",
                raw
            );
        }
    }

    #[test]
    fn test_invalid_names_rejected() {
        for name in ["", "@id", "a-b", "with space", "x;drop"] {
            let mut params = ParameterSet::new();
            assert!(
                params.insert(name, SqlValue::Null).is_err(),
                "name {:?} should be rejected",
                name
            );
        }

        let mut params = ParameterSet::new();
        assert!(params.insert("customer_id2", SqlValue::Integer(1)).is_ok());
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let raw = json!({"big": u64::MAX});
        let params = ParameterSet::from_json(Some(&raw)).unwrap();
        assert!(matches!(params.get("big"), Some(SqlValue::Float(_))));
    }
}
