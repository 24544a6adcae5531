use crate::{core::value::Value, error::ModelError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Runtime values for the stream variables of a condition, keyed by
/// variable name. Built fresh for every resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    values: HashMap<String, Value>,
}

impl Binding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds a binding from a flat JSON object such as `{"v": 100}`.
    pub fn from_json(json: serde_json::Value) -> Result<Self, ModelError> {
        match json {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(name, value)| (name, Value::from(value)))
                .collect()),
            other => Err(ModelError::InvalidBinding(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }
}

impl FromIterator<(String, Value)> for Binding {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Binding {
            values: iter.into_iter().collect(),
        }
    }
}
