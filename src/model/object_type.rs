//! Node and relationship object types — the deduplicated entities the
//! aggregation step folds property rows into.

use serde::{Serialize, Serializer};

use super::{Property, Ref};

/// A distinct node-label combination together with its observed properties.
///
/// Created lazily on the first row that references its label combination;
/// `properties` is appended to as further rows arrive, never removed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeObjectType {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "labels")]
    pub label_refs: Vec<Ref>,
    #[serde(serialize_with = "serialize_properties")]
    pub properties: Vec<Property>,
}

impl NodeObjectType {
    pub fn new(id: impl Into<String>, label_refs: Vec<Ref>) -> Self {
        Self { id: id.into(), label_refs, properties: Vec::new() }
    }
}

/// A distinct (relationship type, target node object type) pair together
/// with its observed properties. Same lazy-creation/append lifecycle as
/// `NodeObjectType`, keyed by the disambiguated generated id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipObjectType {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "type")]
    pub type_ref: Ref,
    #[serde(rename = "from")]
    pub from_ref: Ref,
    #[serde(rename = "to")]
    pub to_ref: Ref,
    #[serde(serialize_with = "serialize_properties")]
    pub properties: Vec<Property>,
}

impl RelationshipObjectType {
    pub fn new(id: impl Into<String>, type_ref: Ref, from_ref: Ref, to_ref: Ref) -> Self {
        Self { id: id.into(), type_ref, from_ref, to_ref, properties: Vec::new() }
    }
}

/// Object types with no observed properties emit `"properties": null`.
fn serialize_properties<S: Serializer>(
    properties: &[Property],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if properties.is_empty() {
        serializer.serialize_none()
    } else {
        properties.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_object_type_field_order() {
        let mut node = NodeObjectType::new("n:Person", vec![Ref::to("nl:Person")]);
        node.properties.push(Property::from_raw("name", &["String".to_owned()], true));
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(
            json,
            r#"{"$id":"n:Person","labels":[{"$ref":"nl:Person"}],"properties":[{"token":"name","type":{"type":"string"},"mandatory":true}]}"#
        );
    }

    #[test]
    fn empty_properties_serialize_as_null() {
        let rel = RelationshipObjectType::new(
            "r:KNOWS",
            Ref::to("rt:KNOWS"),
            Ref::to("n:Person"),
            Ref::to("n:Person"),
        );
        let json = serde_json::to_string(&rel).unwrap();
        assert_eq!(
            json,
            r#"{"$id":"r:KNOWS","type":{"$ref":"rt:KNOWS"},"from":{"$ref":"n:Person"},"to":{"$ref":"n:Person"},"properties":null}"#
        );
    }
}
