use crate::{
    compiled::CompiledCondition,
    document::FilterDocument,
    error::{FilterError, Result},
    placeholder::{PlaceholderOrigin, replace_markers},
};
use model::execution::binding::Binding;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Substitutes `binding` into `compiled` and parses the result.
///
/// Holds no state, so any number of callers may resolve the same compiled
/// condition at once with their own bindings.
pub fn resolve(compiled: &CompiledCondition, binding: &Binding) -> Result<FilterDocument> {
    if compiled.is_match_all() {
        debug!("Condition matches all records; binding not consulted");
        return Ok(FilterDocument::match_all());
    }

    let mut literals = HashMap::with_capacity(compiled.placeholders().len());
    for (token, entry) in compiled.placeholders() {
        let value = match &entry.origin {
            PlaceholderOrigin::Variable { name } => {
                binding
                    .get(name)
                    .ok_or_else(|| FilterError::UnresolvedBinding {
                        variable: name.clone(),
                        token: token.clone(),
                    })?
            }
            PlaceholderOrigin::Constant { value } => value,
        };
        let literal = value
            .to_filter_literal(entry.data_type)
            .map_err(|source| FilterError::InvalidLiteral {
                token: token.clone(),
                source,
            })?;
        trace!(token = %token, literal = %literal, "Bound placeholder");
        literals.insert(token.as_str(), literal);
    }

    let text = replace_markers(compiled.template(), |token| {
        Ok::<_, FilterError>(literals.get(token).cloned())
    })?;

    FilterDocument::parse(&text)
}
