use model::core::{data_type::DataType, value::Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const VARIABLE_PREFIX: &str = "strVar";
pub const CONSTANT_PREFIX: &str = "const";

const MARKER_OPEN: &str = "{{";
const MARKER_CLOSE: &str = "}}";

/// Where the value behind a placeholder comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum PlaceholderOrigin {
    /// Bound at execution time from the named stream variable.
    Variable { name: String },
    /// Literal inlined when compilation finishes.
    Constant { value: Value },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderEntry {
    #[serde(flatten)]
    pub origin: PlaceholderOrigin,
    pub data_type: DataType,
}

impl PlaceholderEntry {
    pub fn variable(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            origin: PlaceholderOrigin::Variable { name: name.into() },
            data_type,
        }
    }

    pub fn constant(value: Value, data_type: DataType) -> Self {
        Self {
            origin: PlaceholderOrigin::Constant { value },
            data_type,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.origin, PlaceholderOrigin::Constant { .. })
    }

    pub fn variable_name(&self) -> Option<&str> {
        match &self.origin {
            PlaceholderOrigin::Variable { name } => Some(name),
            PlaceholderOrigin::Constant { .. } => None,
        }
    }
}

/// How a token is written inside template text, e.g. `{{strVar0}}`.
pub fn marker(token: &str) -> String {
    format!("{MARKER_OPEN}{token}{MARKER_CLOSE}")
}

/// Replaces the placeholder markers in `text` whose token `lookup` knows.
pub(crate) fn replace_markers<E>(
    text: &str,
    lookup: impl FnMut(&str) -> Result<Option<String>, E>,
) -> Result<String, E> {
    crate::template::replace_delimited(text, MARKER_OPEN, MARKER_CLOSE, lookup)
}

/// Deferred values of one compile pass.
///
/// Stream variables and constants are numbered by independent counters, so
/// tokens never repeat within a pass.
#[derive(Debug, Default)]
pub struct PlaceholderTable {
    next_variable: usize,
    next_constant: usize,
    entries: BTreeMap<String, PlaceholderEntry>,
}

impl PlaceholderTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_variable(&mut self, name: impl Into<String>, data_type: DataType) -> String {
        let token = format!("{VARIABLE_PREFIX}{}", self.next_variable);
        self.next_variable += 1;
        self.entries
            .insert(token.clone(), PlaceholderEntry::variable(name, data_type));
        token
    }

    pub fn allocate_constant(&mut self, value: Value, data_type: DataType) -> String {
        let token = format!("{CONSTANT_PREFIX}{}", self.next_constant);
        self.next_constant += 1;
        self.entries
            .insert(token.clone(), PlaceholderEntry::constant(value, data_type));
        token
    }

    pub fn get(&self, token: &str) -> Option<&PlaceholderEntry> {
        self.entries.get(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Splits the table into its constant and variable entries.
    pub fn into_partition(
        self,
    ) -> (
        BTreeMap<String, PlaceholderEntry>,
        BTreeMap<String, PlaceholderEntry>,
    ) {
        self.entries
            .into_iter()
            .partition(|(_, entry)| entry.is_constant())
    }
}
