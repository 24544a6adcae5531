use crate::error::{FilterError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// A resolved, executable filter document.
///
/// The empty document matches every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterDocument(Map<String, JsonValue>);

impl FilterDocument {
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Parses filter text; anything but a JSON object is rejected.
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str::<Map<String, JsonValue>>(text)
            .map(FilterDocument)
            .map_err(|source| FilterError::MalformedFilterText {
                text: text.to_string(),
                source,
            })
    }

    pub fn is_match_all(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    pub fn as_json(&self) -> JsonValue {
        JsonValue::Object(self.0.clone())
    }

    pub fn into_json(self) -> JsonValue {
        JsonValue::Object(self.0)
    }
}

impl fmt::Display for FilterDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", JsonValue::Object(self.0.clone()))
    }
}
