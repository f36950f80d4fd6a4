//! Tokens and references — the identifiable atoms of the schema document.

use serde::Serialize;

/// A canonical, identifiable representation of a label or relationship-type
/// name. One `Token` exists per distinct name in use; it is immutable after
/// creation and owned by the token map that created it (keyed by raw name).
///
/// `value` may be a sanitized (backtick-quoted) rendering of the name while
/// `id` is always derived from the raw name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "token")]
    pub value: String,
}

impl Token {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self { id: id.into(), value: value.into() }
    }
}

/// A non-owning reference to a `Token` or an object type, by id.
///
/// Every `Ref` must resolve to an entity that exists in the final document;
/// the aggregation step guarantees this by failing fast on unknown names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ref {
    #[serde(rename = "$ref")]
    pub target: String,
}

impl Ref {
    pub fn to(target: impl Into<String>) -> Self {
        Self { target: target.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_serializes_with_dollar_id() {
        let token = Token::new("nl:Person", "Person");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#"{"$id":"nl:Person","token":"Person"}"#);
    }

    #[test]
    fn ref_serializes_with_dollar_ref() {
        let json = serde_json::to_string(&Ref::to("n:Person")).unwrap();
        assert_eq!(json, r#"{"$ref":"n:Person"}"#);
    }
}
