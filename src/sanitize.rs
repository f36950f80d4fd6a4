//! Schema-name sanitization for token values.
//!
//! Mirrors Cypher schema-name quoting: a name that is already a valid
//! unquoted identifier passes through untouched, anything else is wrapped in
//! backticks with embedded backticks doubled. Returns `None` when no
//! sanitized rendering exists; callers fall back to the raw name.

/// Sanitize a label or relationship-type name for use as a token value.
pub fn sanitize(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    if is_valid_identifier(name) {
        return Some(name.to_owned());
    }
    Some(format!("`{}`", name.replace('`', "``")))
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
