//! Tolerant readers for marketplace payloads.
//!
//! Marketplace exports ship several sub-structures as stringified JSON
//! (`image_json`, `price_info_json`, ...), and numeric fields arrive as
//! numbers or as strings depending on the exporter version. Readers here
//! attempt a structured decode and fall back to a fixed default; parse
//! errors never fail the request.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Payloads are arbitrary JSON objects.
pub type Payload = Map<String, Value>;

/// Decode a field that may be an embedded object, a JSON-encoded string of
/// one, or garbage. Garbage and absence both yield an empty object.
pub fn embedded_object(payload: &Payload, field: &str) -> Map<String, Value> {
    match decode_embedded(payload.get(field)) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Same as [`embedded_object`] for list-shaped sub-payloads.
pub fn embedded_array(payload: &Payload, field: &str) -> Vec<Value> {
    match decode_embedded(payload.get(field)) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

fn decode_embedded(value: Option<&Value>) -> Option<Value> {
    match value {
        Some(v @ (Value::Object(_) | Value::Array(_))) => Some(v.clone()),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            serde_json::from_str(s).ok()
        }
        _ => None,
    }
}

/// Read a field as a non-empty trimmed string. Numbers are stringified,
/// since marketplace ids show up both ways.
pub fn string_field(payload: &Payload, field: &str) -> Option<String> {
    string_value(payload.get(field)?)
}

pub fn string_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Lenient integer coercion: integers, integral floats and numeric strings
/// all count, anything else is absent.
pub fn int_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Lenient float coercion for money fields.
pub fn float_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub fn float_field(payload: &Payload, field: &str) -> Option<f64> {
    float_value(payload.get(field)?)
}

/// Convert an epoch-seconds field to a UTC timestamp. Absent, zero or
/// non-coercible input yields `None` rather than an error.
pub fn epoch_field(payload: &Payload, field: &str) -> Option<DateTime<Utc>> {
    let secs = int_value(payload.get(field)?)?;
    if secs <= 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn embedded_object_accepts_string_and_structured_forms() {
        let p = payload(json!({
            "as_string": "{\"a\": 1}",
            "as_object": {"a": 2},
            "broken": "{not json",
        }));
        assert_eq!(embedded_object(&p, "as_string")["a"], 1);
        assert_eq!(embedded_object(&p, "as_object")["a"], 2);
        assert!(embedded_object(&p, "broken").is_empty());
        assert!(embedded_object(&p, "missing").is_empty());
    }

    #[test]
    fn embedded_array_defaults_to_empty() {
        let p = payload(json!({
            "list": "[{\"x\": 1}]",
            "not_a_list": "{\"x\": 1}",
        }));
        assert_eq!(embedded_array(&p, "list").len(), 1);
        assert!(embedded_array(&p, "not_a_list").is_empty());
    }

    #[test]
    fn string_field_stringifies_numbers_and_trims() {
        let p = payload(json!({"shop_id": 70000101, "region": "  SG  ", "blank": "   "}));
        assert_eq!(string_field(&p, "shop_id").as_deref(), Some("70000101"));
        assert_eq!(string_field(&p, "region").as_deref(), Some("SG"));
        assert_eq!(string_field(&p, "blank"), None);
    }

    #[test]
    fn int_value_accepts_numeric_strings() {
        assert_eq!(int_value(&json!("42")), Some(42));
        assert_eq!(int_value(&json!(42)), Some(42));
        assert_eq!(int_value(&json!(42.0)), Some(42));
        assert_eq!(int_value(&json!("many")), None);
        assert_eq!(int_value(&json!({})), None);
    }

    #[test]
    fn epoch_field_tolerates_bad_input() {
        let p = payload(json!({
            "ok": 1700000000,
            "stringy": "1700000000",
            "bad": "yesterday",
            "zero": 0,
        }));
        assert!(epoch_field(&p, "ok").is_some());
        assert_eq!(epoch_field(&p, "ok"), epoch_field(&p, "stringy"));
        assert_eq!(epoch_field(&p, "bad"), None);
        assert_eq!(epoch_field(&p, "zero"), None);
        assert_eq!(epoch_field(&p, "missing"), None);
    }
}
