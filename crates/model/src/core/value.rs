use crate::{core::data_type::DataType, error::ModelError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Boolean(bool),
    Json(serde_json::Value),
    Uuid(Uuid),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Null,
}

impl Value {
    /// Plain text form of the value, without any quoting.
    pub fn as_string(&self) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::Uint(v) => v.to_string(),
            Value::Float(v) => number_text(*v),
            Value::String(v) => v.clone(),
            Value::Boolean(v) => v.to_string(),
            Value::Json(serde_json::Value::String(s)) => s.clone(),
            Value::Json(v) => v.to_string(),
            Value::Uuid(v) => v.to_string(),
            Value::Date(v) => v.to_string(),
            Value::Timestamp(v) => v.to_rfc3339(),
            Value::Null => "null".to_string(),
        }
    }

    /// Renders the value as literal text for a filter document.
    ///
    /// Textual types are written as escaped JSON strings. Uuids, dates and
    /// timestamps have no bare literal form and are always quoted. Under any
    /// other type the value must be a single JSON scalar, so a string is only
    /// written bare when it reads as a number, boolean or `null`. Non-finite
    /// floats have no literal form at all.
    pub fn to_filter_literal(&self, declared: DataType) -> Result<String, ModelError> {
        match self {
            Value::Null => Ok("null".to_string()),
            Value::Float(v) if !v.is_finite() => {
                Err(self.invalid(declared, "not a finite number"))
            }
            _ if declared.is_textual() => Ok(quote(&self.as_string())),
            Value::Uuid(_) | Value::Date(_) | Value::Timestamp(_) => Ok(quote(&self.as_string())),
            Value::Json(v) => Ok(json_literal(v)),
            Value::String(text) => match serde_json::from_str::<serde_json::Value>(text) {
                Ok(
                    scalar @ (serde_json::Value::Number(_)
                    | serde_json::Value::Bool(_)
                    | serde_json::Value::Null),
                ) => Ok(scalar.to_string()),
                _ => Err(self.invalid(declared, "text is not a scalar literal")),
            },
            other => Ok(other.as_string()),
        }
    }

    fn invalid(&self, declared: DataType, reason: &str) -> ModelError {
        ModelError::InvalidLiteral {
            value: self.to_string(),
            data_type: declared,
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            other => Value::Json(other),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(v) => write!(f, "\"{}\"", v.replace('"', "\\\"")),
            other => write!(f, "{}", other.as_string()),
        }
    }
}

/// Writes `text` as a JSON string with every `{` escaped as `\u007b`.
///
/// The escaped form parses back to the same string, and quoted text can
/// never contain a `{{token}}` marker.
pub fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string())
        .to_string()
        .replace('{', "\\u007b")
}

fn json_literal(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => quote(s),
        serde_json::Value::Array(items) => {
            let items = items.iter().map(json_literal).collect::<Vec<_>>();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(map) => {
            let entries = map
                .iter()
                .map(|(key, v)| format!("{}:{}", quote(key), json_literal(v)))
                .collect::<Vec<_>>();
            format!("{{{}}}", entries.join(","))
        }
        scalar => scalar.to_string(),
    }
}

// Keeps the fractional part on whole floats so 10.0 stays 10.0.
fn number_text(v: f64) -> String {
    serde_json::Number::from_f64(v)
        .map(|n| n.to_string())
        .unwrap_or_else(|| v.to_string())
}
