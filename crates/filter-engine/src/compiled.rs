use crate::placeholder::PlaceholderEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Template text meaning "match every record".
pub const MATCH_ALL: &str = "true";

/// Output of one compilation: the filter template plus the stream
/// variables still to be bound. Constants are already inlined.
///
/// Read-only once built, so it can be shared and resolved concurrently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledCondition {
    template: String,
    placeholders: BTreeMap<String, PlaceholderEntry>,
}

impl CompiledCondition {
    pub(crate) fn new(template: String, placeholders: BTreeMap<String, PlaceholderEntry>) -> Self {
        Self {
            template,
            placeholders,
        }
    }

    /// The unconditional filter.
    pub fn match_all() -> Self {
        Self::new(MATCH_ALL.to_string(), BTreeMap::new())
    }

    pub fn is_match_all(&self) -> bool {
        self.template.trim().eq_ignore_ascii_case(MATCH_ALL)
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn placeholders(&self) -> &BTreeMap<String, PlaceholderEntry> {
        &self.placeholders
    }

    /// Names a binding must provide to resolve this condition.
    pub fn required_variables(&self) -> Vec<&str> {
        let mut names = self
            .placeholders
            .values()
            .filter_map(PlaceholderEntry::variable_name)
            .collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        names
    }
}
