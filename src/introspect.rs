//! The introspection pipeline: token extraction, row-to-tree aggregation,
//! and document assembly.
//!
//! A single call runs one synchronous pass over one snapshot of schema
//! facts: token maps first, then the node property table, then the
//! relationship property table, then serialization. Id caches and
//! disambiguation counters are constructed fresh per call.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::config::IntrospectConfig;
use crate::ids::{
    NodeObjectIdGenerator, RelationshipObjectIdGenerator, TokenIdGenerator, node_structural_key,
};
use crate::model::{NodeObjectType, Property, Ref, RelationshipObjectType, Token};
use crate::registry::collect_tokens;
use crate::source::SchemaSource;
use crate::{Error, Result};

// ============================================================================
// Entry point
// ============================================================================

/// The primary entry point. An `Introspector` wraps a schema source and
/// renders its schema facts as the graph-schema JSON document.
pub struct Introspector<S: SchemaSource> {
    source: S,
}

impl<S: SchemaSource> Introspector<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Run one introspection pass and return the JSON document.
    pub fn introspect(&mut self, config: &IntrospectConfig) -> Result<String> {
        let document = self.build_document(config)?;
        let json = if config.pretty_print {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(json)
    }

    /// Like [`Introspector::introspect`], with options supplied as a JSON
    /// params object (`{"useConstantIds": false, ...}`).
    pub fn introspect_with_params(&mut self, params: &serde_json::Value) -> Result<String> {
        let config = IntrospectConfig::from_params(params)?;
        self.introspect(&config)
    }

    /// Access the underlying source (for advanced use).
    pub fn source(&self) -> &S {
        &self.source
    }

    fn build_document(&mut self, config: &IntrospectConfig) -> Result<GraphSchemaDocument> {
        let label_tokens = collect_tokens(
            self.source.labels_in_use()?,
            config.quote_tokens,
            &TokenIdGenerator::node_labels(config.use_constant_ids),
        )?;
        let type_tokens = collect_tokens(
            self.source.relationship_types_in_use()?,
            config.quote_tokens,
            &TokenIdGenerator::relationship_types(config.use_constant_ids),
        )?;
        debug!(
            labels = label_tokens.len(),
            relationship_types = type_tokens.len(),
            "extracted tokens"
        );

        // Shared across both passes so relationship endpoints resolve to
        // the ids of existing node object types.
        let mut node_ids = NodeObjectIdGenerator::new(config.use_constant_ids);
        let mut relationship_ids = RelationshipObjectIdGenerator::new(config.use_constant_ids);

        let node_object_types =
            collect_node_object_types(&mut self.source, &mut node_ids, &label_tokens)?;
        let relationship_object_types = collect_relationship_object_types(
            &mut self.source,
            &mut node_ids,
            &mut relationship_ids,
            &type_tokens,
        )?;
        debug!(
            node_object_types = node_object_types.len(),
            relationship_object_types = relationship_object_types.len(),
            "aggregated object types"
        );

        Ok(GraphSchemaDocument::new(
            label_tokens,
            type_tokens,
            node_object_types.into_values(),
            relationship_object_types.into_values(),
        ))
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Insertion-ordered map of object types keyed by generated id.
///
/// First-seen row order (ascending structural key, per the source's
/// ordering contract) decides output order; an unordered container here
/// would break byte-level determinism.
struct ObjectTypeMap<T> {
    index: HashMap<String, usize>,
    entries: Vec<T>,
}

impl<T> ObjectTypeMap<T> {
    fn new() -> Self {
        Self { index: HashMap::new(), entries: Vec::new() }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.index.get(id).map(|&at| &mut self.entries[at])
    }

    fn insert(&mut self, id: String, entry: T) {
        debug_assert!(!self.index.contains_key(&id));
        self.index.insert(id, self.entries.len());
        self.entries.push(entry);
    }

    fn into_values(self) -> Vec<T> {
        self.entries
    }
}

fn collect_node_object_types<S: SchemaSource>(
    source: &mut S,
    node_ids: &mut NodeObjectIdGenerator,
    label_tokens: &BTreeMap<String, Token>,
) -> Result<ObjectTypeMap<NodeObjectType>> {
    let mut object_types = ObjectTypeMap::new();
    // No labels in use: nothing to aggregate, skip the table query entirely.
    if label_tokens.is_empty() {
        return Ok(object_types);
    }

    for row in source.node_type_properties()? {
        let row = row?;
        let id = node_ids.id_for(&row.node_type);

        if object_types.get_mut(&id).is_none() {
            let mut labels = row.node_labels.clone();
            labels.sort_unstable();
            let label_refs = labels
                .iter()
                .map(|label| resolve_token(label_tokens, label, "label"))
                .collect::<Result<Vec<Ref>>>()?;
            object_types.insert(id.clone(), NodeObjectType::new(id.clone(), label_refs));
        }

        if let Some(property) = extract_property(&row.property_name, &row.property_types, row.mandatory) {
            // Present after the block above, by construction.
            if let Some(object_type) = object_types.get_mut(&id) {
                object_type.properties.push(property);
            }
        }
    }
    Ok(object_types)
}

fn collect_relationship_object_types<S: SchemaSource>(
    source: &mut S,
    node_ids: &mut NodeObjectIdGenerator,
    relationship_ids: &mut RelationshipObjectIdGenerator,
    type_tokens: &BTreeMap<String, Token>,
) -> Result<ObjectTypeMap<RelationshipObjectType>> {
    let mut object_types = ObjectTypeMap::new();
    if type_tokens.is_empty() {
        return Ok(object_types);
    }

    for row in source.relationship_type_properties()? {
        let row = row?;
        let from = node_ids.id_for(&node_structural_key(&row.from_labels));
        let to = node_ids.id_for(&node_structural_key(&row.to_labels));
        let id = relationship_ids.id_for(&row.rel_type, &to);

        if object_types.get_mut(&id).is_none() {
            let type_ref = resolve_token(type_tokens, &row.rel_type, "relationship type")?;
            object_types.insert(
                id.clone(),
                RelationshipObjectType::new(id.clone(), type_ref, Ref::to(from), Ref::to(to)),
            );
        }

        if let Some(property) = extract_property(&row.property_name, &row.property_types, row.mandatory) {
            if let Some(object_type) = object_types.get_mut(&id) {
                object_type.properties.push(property);
            }
        }
    }
    Ok(object_types)
}

/// A name appearing in a property row but missing from its token map would
/// produce a dangling `$ref`; fail the call instead.
fn resolve_token(tokens: &BTreeMap<String, Token>, name: &str, kind: &str) -> Result<Ref> {
    tokens
        .get(name)
        .map(|token| Ref::to(token.id.clone()))
        .ok_or_else(|| Error::DataAccess(format!("{} `{}` has no token", kind, name)))
}

fn extract_property(
    property_name: &Option<String>,
    property_types: &[String],
    mandatory: bool,
) -> Option<Property> {
    // Rows without a property represent label combinations / relationship
    // types that declare none.
    let name = property_name.as_deref()?;
    Some(Property::from_raw(name, property_types, mandatory))
}

// ============================================================================
// Document assembly
// ============================================================================

/// The complete output document:
/// `{graphSchemaRepresentation: {graphSchema: {...}}}`.
#[derive(Debug, Serialize)]
pub struct GraphSchemaDocument {
    #[serde(rename = "graphSchemaRepresentation")]
    representation: GraphSchemaRepresentation,
}

#[derive(Debug, Serialize)]
struct GraphSchemaRepresentation {
    #[serde(rename = "graphSchema")]
    graph_schema: GraphSchema,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphSchema {
    node_labels: Vec<Token>,
    relationship_types: Vec<Token>,
    node_object_types: Vec<NodeObjectType>,
    relationship_object_types: Vec<RelationshipObjectType>,
}

impl GraphSchemaDocument {
    fn new(
        label_tokens: BTreeMap<String, Token>,
        type_tokens: BTreeMap<String, Token>,
        node_object_types: Vec<NodeObjectType>,
        relationship_object_types: Vec<RelationshipObjectType>,
    ) -> Self {
        Self {
            representation: GraphSchemaRepresentation {
                graph_schema: GraphSchema {
                    node_labels: label_tokens.into_values().collect(),
                    relationship_types: type_tokens.into_values().collect(),
                    node_object_types,
                    relationship_object_types,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_type_map_preserves_insertion_order() {
        let mut map = ObjectTypeMap::new();
        map.insert("b".to_owned(), 1);
        map.insert("a".to_owned(), 2);
        assert_eq!(map.len(), 2);
        assert_eq!(map.into_values(), vec![1, 2]);
    }

    #[test]
    fn extract_property_skips_propertyless_rows() {
        assert_eq!(extract_property(&None, &[], false), None);

        let property = extract_property(
            &Some("name".to_owned()),
            &["String".to_owned()],
            true,
        )
        .unwrap();
        assert_eq!(property.token, "name");
        assert!(property.mandatory);
    }

    #[test]
    fn resolve_token_rejects_unknown_names() {
        let tokens = BTreeMap::new();
        let err = resolve_token(&tokens, "Ghost", "label").unwrap_err();
        assert!(matches!(err, Error::DataAccess(_)));
    }
}
