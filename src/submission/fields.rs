use serde_json::{Map, Value};

pub const DEFAULT_SOURCE: &str = "widget";
pub const MAX_SOURCE_CHARS: usize = 200;

/// A widget submission after coercion. Every field always has a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub xp: f64,
    pub coins: f64,
    pub diamonds: f64,
    pub source: String,
}

impl Default for Submission {
    fn default() -> Self {
        Self {
            xp: 0.0,
            coins: 0.0,
            diamonds: 0.0,
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

impl Submission {
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            xp: coerce_number(fields.get("xp")),
            coins: coerce_number(fields.get("coins")),
            diamonds: coerce_number(fields.get("diamonds")),
            source: coerce_source(fields.get("source")),
        }
    }
}

/// Numbers pass through, booleans are 1/0, strings are parsed as decimals.
/// Anything else, including unparseable or non-finite input, is 0.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    if n.is_finite() { n } else { 0.0 }
}

/// Text for the `Source` property, at most [`MAX_SOURCE_CHARS`] characters.
pub fn coerce_source(value: Option<&Value>) -> String {
    let text = match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(v @ (Value::Array(_) | Value::Object(_))) => v.to_string(),
        _ => String::new(),
    };

    if text.is_empty() {
        return DEFAULT_SOURCE.to_string();
    }

    text.chars().take(MAX_SOURCE_CHARS).collect()
}
