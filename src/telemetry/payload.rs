use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Auxiliary fields attached to a reading or to the actuator state.
///
/// The mapping is open-ended; only a few keys carry meaning here and they are
/// read through the accessors below, never by indexing the raw map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub const UNIT: &'static str = "unit";
    pub const LEAK_SUSPECTED: &'static str = "leak_suspected";

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn unit(&self) -> Option<&str> {
        self.get(Self::UNIT).and_then(Value::as_str)
    }

    /// Sensors report the flag loosely (`true`, `1`, `"yes"`), so any truthy
    /// JSON value counts.
    pub fn leak_suspected(&self) -> bool {
        self.get(Self::LEAK_SUSPECTED).is_some_and(is_truthy)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> Payload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn known_keys_are_read_safely() {
        let p = payload(json!({"unit": "C", "source": "open-meteo", "raw": "21.5"}));
        assert_eq!(p.unit(), Some("C"));
        assert!(!p.leak_suspected());
    }

    #[test]
    fn mistyped_keys_read_as_absent() {
        let p = payload(json!({"unit": 7}));
        assert_eq!(p.unit(), None);
    }

    #[test]
    fn leak_flag_accepts_truthy_values() {
        assert!(payload(json!({"leak_suspected": true})).leak_suspected());
        assert!(payload(json!({"leak_suspected": 1})).leak_suspected());
        assert!(payload(json!({"leak_suspected": "yes"})).leak_suspected());
        assert!(!payload(json!({"leak_suspected": 0})).leak_suspected());
        assert!(!payload(json!({"leak_suspected": ""})).leak_suspected());
        assert!(!payload(json!({"leak_suspected": null})).leak_suspected());
    }
}
