//! Properties and their normalized types.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Raw type names that map to something other than their lowercased self.
const TYPE_MAPPING: [(&str, &str); 2] = [("Long", "integer"), ("Double", "float")];

/// A normalized property type descriptor.
///
/// `item_kind` is set exactly when `kind == "array"`. Immutable value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyType {
    pub kind: String,
    pub item_kind: Option<String>,
}

impl PropertyType {
    /// Normalize a raw type name as reported by the engine's property tables,
    /// e.g. `"Long"` → `integer`, `"StringArray"` → array of `string`.
    ///
    /// A trailing `"Array"` suffix turns the type into an array of the
    /// normalized base name. Total over any string input.
    pub fn normalize(raw: &str) -> Self {
        match raw.strip_suffix("Array") {
            Some(base) => Self {
                kind: "array".to_owned(),
                item_kind: Some(normalize_scalar(base)),
            },
            None => Self { kind: normalize_scalar(raw), item_kind: None },
        }
    }
}

fn normalize_scalar(raw: &str) -> String {
    for (from, to) in TYPE_MAPPING {
        if raw == from {
            return to.to_owned();
        }
    }
    raw.to_lowercase()
}

/// `{"type": kind}`, plus `"items": {"type": item_kind}` for arrays.
impl Serialize for PropertyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.kind)?;
        if let Some(item_kind) = &self.item_kind {
            map.serialize_entry("items", &ItemType { kind: item_kind })?;
        }
        map.end()
    }
}

#[derive(serde::Serialize)]
struct ItemType<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

/// One observed property of an object type.
///
/// The underlying table is already deduplicated per property name, so this
/// layer never merges two `Property` records.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Property {
    pub token: String,
    #[serde(rename = "type", serialize_with = "serialize_type_list")]
    pub types: Vec<PropertyType>,
    #[serde(skip_serializing_if = "is_false")]
    pub mandatory: bool,
}

impl Property {
    /// Build a property from a table row's raw type names.
    pub fn from_raw(token: impl Into<String>, raw_types: &[String], mandatory: bool) -> Self {
        Self {
            token: token.into(),
            types: raw_types.iter().map(|t| PropertyType::normalize(t)).collect(),
            mandatory,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Polymorphic encoding of the type list: empty → `null`, one type → that
/// type's object, several types → an array of objects. The internal model
/// stays a uniform `Vec`; only the encoder varies.
fn serialize_type_list<S: Serializer>(
    types: &[PropertyType],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match types {
        [] => serializer.serialize_none(),
        [single] => single.serialize(serializer),
        many => many.serialize(serializer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(types: &[&str]) -> Vec<String> {
        types.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn normalize_maps_engine_types() {
        assert_eq!(PropertyType::normalize("Long").kind, "integer");
        assert_eq!(PropertyType::normalize("Double").kind, "float");
        assert_eq!(PropertyType::normalize("String").kind, "string");
        assert_eq!(PropertyType::normalize("Boolean").kind, "boolean");
    }

    #[test]
    fn normalize_array_types() {
        let t = PropertyType::normalize("StringArray");
        assert_eq!(t.kind, "array");
        assert_eq!(t.item_kind.as_deref(), Some("string"));

        let t = PropertyType::normalize("LongArray");
        assert_eq!(t.item_kind.as_deref(), Some("integer"));
    }

    #[test]
    fn normalize_strips_only_trailing_array() {
        let t = PropertyType::normalize("ArrayLike");
        assert_eq!(t.kind, "arraylike");
        assert_eq!(t.item_kind, None);
    }

    #[test]
    fn single_type_serializes_as_object() {
        let prop = Property::from_raw("age", &owned(&["Long"]), false);
        let json = serde_json::to_string(&prop).unwrap();
        assert_eq!(json, r#"{"token":"age","type":{"type":"integer"}}"#);
    }

    #[test]
    fn empty_type_list_serializes_as_null() {
        let prop = Property::from_raw("anything", &[], false);
        let json = serde_json::to_string(&prop).unwrap();
        assert_eq!(json, r#"{"token":"anything","type":null}"#);
    }

    #[test]
    fn multiple_types_serialize_as_array() {
        let prop = Property::from_raw("mixed", &owned(&["Long", "String"]), false);
        let json = serde_json::to_string(&prop).unwrap();
        assert_eq!(
            json,
            r#"{"token":"mixed","type":[{"type":"integer"},{"type":"string"}]}"#
        );
    }

    #[test]
    fn array_type_carries_items() {
        let prop = Property::from_raw("tags", &owned(&["StringArray"]), true);
        let json = serde_json::to_string(&prop).unwrap();
        assert_eq!(
            json,
            r#"{"token":"tags","type":{"type":"array","items":{"type":"string"}},"mandatory":true}"#
        );
    }

    #[test]
    fn mandatory_false_is_omitted() {
        let json = serde_json::to_string(&Property::from_raw("x", &owned(&["Long"]), false)).unwrap();
        assert!(!json.contains("mandatory"));

        let json = serde_json::to_string(&Property::from_raw("x", &owned(&["Long"]), true)).unwrap();
        assert!(json.ends_with(r#""mandatory":true}"#));
    }
}
