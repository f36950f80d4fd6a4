//! Introspection configuration.

use serde_json::Value;

use crate::{Error, Result};

/// Options controlling one introspection call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntrospectConfig {
    /// Derive ids from labels/types (`true`) or mint time-sorted random ids
    /// per structural key (`false`).
    pub use_constant_ids: bool,
    /// Indent the output document. Whitespace only; never field order or
    /// content.
    pub pretty_print: bool,
    /// Sanitize token values (backtick quoting) before emitting them.
    pub quote_tokens: bool,
}

impl Default for IntrospectConfig {
    fn default() -> Self {
        Self { use_constant_ids: true, pretty_print: false, quote_tokens: true }
    }
}

impl IntrospectConfig {
    /// Parse a caller-supplied params object, e.g. the map passed to
    /// `db.introspect({useConstantIds: false})`.
    ///
    /// Unrecognized keys are ignored; a non-object value or a non-boolean
    /// value under a recognized key is a configuration error.
    pub fn from_params(params: &Value) -> Result<Self> {
        let map = params.as_object().ok_or_else(|| {
            Error::Configuration(format!("expected an object of options, got {}", params))
        })?;

        let defaults = Self::default();
        Ok(Self {
            use_constant_ids: bool_option(map, "useConstantIds", defaults.use_constant_ids)?,
            pretty_print: bool_option(map, "prettyPrint", defaults.pretty_print)?,
            quote_tokens: bool_option(map, "quoteTokens", defaults.quote_tokens)?,
        })
    }
}

fn bool_option(
    map: &serde_json::Map<String, Value>,
    key: &str,
    default: bool,
) -> Result<bool> {
    match map.get(key) {
        None => Ok(default),
        Some(Value::Bool(value)) => Ok(*value),
        Some(other) => Err(Error::Configuration(format!(
            "option `{}` must be a boolean, got {}",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let config = IntrospectConfig::default();
        assert!(config.use_constant_ids);
        assert!(!config.pretty_print);
        assert!(config.quote_tokens);
    }

    #[test]
    fn from_params_overrides_defaults() {
        let config = IntrospectConfig::from_params(&json!({
            "useConstantIds": false,
            "prettyPrint": true,
        }))
        .unwrap();
        assert!(!config.use_constant_ids);
        assert!(config.pretty_print);
        assert!(config.quote_tokens);
    }

    #[test]
    fn from_params_ignores_unknown_keys() {
        let config = IntrospectConfig::from_params(&json!({"someFutureOption": 1})).unwrap();
        assert_eq!(config, IntrospectConfig::default());
    }

    #[test]
    fn from_params_rejects_wrongly_typed_values() {
        let err = IntrospectConfig::from_params(&json!({"prettyPrint": "yes"})).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        let err = IntrospectConfig::from_params(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
