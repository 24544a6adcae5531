//! Filter templates with named slots.
//!
//! Every composite fragment is rendered by filling one of these templates.
//! Slots are written `<<name>>`; values are inserted in a single pass, so a
//! value that happens to contain slot syntax is never expanded again.

pub const AND: &str = r#"{"$and":[<<left>>,<<right>>]}"#;
pub const OR: &str = r#"{"$or":[<<left>>,<<right>>]}"#;
/// Single-field filter: `{field: body}`.
pub const FIELD: &str = "{<<field>>:<<body>>}";
pub const NOT: &str = r#"{"$not":<<body>>}"#;
pub const COMPARE: &str = "{<<op>>:<<value>>}";
pub const IS_NULL: &str = r#"{"$eq":null}"#;

const SLOT_OPEN: &str = "<<";
const SLOT_CLOSE: &str = ">>";

/// Fills the named slots of `template`. Slots without a value are left as-is.
pub fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let lookup = |name: &str| -> Result<Option<String>, std::convert::Infallible> {
        Ok(slots
            .iter()
            .find(|(slot, _)| *slot == name)
            .map(|(_, value)| value.to_string()))
    };

    match replace_delimited(template, SLOT_OPEN, SLOT_CLOSE, lookup) {
        Ok(text) => text,
        Err(never) => match never {},
    }
}

/// Replaces every `open name close` section of `text` for which `lookup`
/// yields a value. Unknown names are copied through untouched.
pub(crate) fn replace_delimited<E>(
    text: &str,
    open: &str,
    close: &str,
    mut lookup: impl FnMut(&str) -> Result<Option<String>, E>,
) -> Result<String, E> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(open) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + open.len()..];

        let replaced = match after_open.find(close) {
            Some(end) => lookup(&after_open[..end])?.map(|value| (value, end)),
            None => None,
        };

        match replaced {
            Some((value, end)) => {
                out.push_str(&value);
                rest = &after_open[end + close.len()..];
            }
            None => {
                out.push_str(open);
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}
