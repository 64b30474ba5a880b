//! Accessor-name conventions.

use crate::{Error, Result};

/// Derives the property name behind an accessor name.
///
/// `getName` and `setName` become `name`, `isActive` becomes `active`.
/// Acronyms keep their case: `getURL` becomes `URL`.
pub fn method_to_property(name: &str) -> Result<String> {
    let rest = if let Some(rest) = name.strip_prefix("is") {
        rest
    } else if let Some(rest) = name.strip_prefix("get").or_else(|| name.strip_prefix("set")) {
        rest
    } else {
        return Err(Error::invalid_mapping(format!(
            "Error parsing property name '{name}'. Didn't start with 'is', 'get' or 'set'."
        )));
    };

    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        return Ok(String::new());
    };

    match chars.next() {
        Some(second) if second.is_uppercase() => Ok(rest.to_string()),
        _ => {
            let mut property = String::with_capacity(rest.len());
            property.extend(first.to_lowercase());
            property.push_str(&rest[first.len_utf8()..]);
            Ok(property)
        }
    }
}

/// Returns `true` if `name` is shaped like a getter or a setter.
pub fn is_property(name: &str) -> bool {
    is_getter(name) || is_setter(name)
}

/// Returns `true` for `get` or `is` followed by at least one character.
pub fn is_getter(name: &str) -> bool {
    (name.starts_with("get") && name.len() > 3) || (name.starts_with("is") && name.len() > 2)
}

/// Returns `true` for `set` followed by at least one character.
pub fn is_setter(name: &str) -> bool {
    name.starts_with("set") && name.len() > 3
}
