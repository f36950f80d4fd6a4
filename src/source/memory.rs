//! In-memory schema source for testing and embedding.

use std::collections::BTreeSet;

use crate::Result;
use crate::ids::node_structural_key;

use super::{NodePropertyRow, RelationshipPropertyRow, SchemaSource};

/// Schema facts held in memory, registered through the `add_*` methods and
/// served back in the sorted order the `SchemaSource` contract requires.
#[derive(Debug, Default)]
pub struct MemorySchema {
    labels: BTreeSet<String>,
    relationship_types: BTreeSet<String>,
    node_rows: Vec<NodePropertyRow>,
    relationship_rows: Vec<RelationshipPropertyRow>,
}

impl MemorySchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a label combination that declares no properties.
    pub fn add_node_type(&mut self, labels: &[&str]) {
        self.register_labels(labels);
        self.node_rows.push(NodePropertyRow {
            node_type: structural_key(labels),
            node_labels: owned(labels),
            property_name: None,
            property_types: Vec::new(),
            mandatory: false,
        });
    }

    /// Register one declared property of a label combination.
    pub fn add_node_property(
        &mut self,
        labels: &[&str],
        name: &str,
        types: &[&str],
        mandatory: bool,
    ) {
        self.register_labels(labels);
        self.node_rows.push(NodePropertyRow {
            node_type: structural_key(labels),
            node_labels: owned(labels),
            property_name: Some(name.to_owned()),
            property_types: owned(types),
            mandatory,
        });
    }

    /// Register a relationship type between two label combinations, with no
    /// properties declared.
    pub fn add_relationship_type(&mut self, rel_type: &str, from: &[&str], to: &[&str]) {
        self.register_endpoints(rel_type, from, to);
        self.relationship_rows.push(RelationshipPropertyRow {
            rel_type: rel_type.to_owned(),
            from_labels: owned(from),
            to_labels: owned(to),
            property_name: None,
            property_types: Vec::new(),
            mandatory: false,
        });
    }

    /// Register one declared property of a relationship type between two
    /// label combinations.
    pub fn add_relationship_property(
        &mut self,
        rel_type: &str,
        from: &[&str],
        to: &[&str],
        name: &str,
        types: &[&str],
        mandatory: bool,
    ) {
        self.register_endpoints(rel_type, from, to);
        self.relationship_rows.push(RelationshipPropertyRow {
            rel_type: rel_type.to_owned(),
            from_labels: owned(from),
            to_labels: owned(to),
            property_name: Some(name.to_owned()),
            property_types: owned(types),
            mandatory,
        });
    }

    fn register_labels(&mut self, labels: &[&str]) {
        self.labels.extend(labels.iter().map(|l| l.to_string()));
    }

    fn register_endpoints(&mut self, rel_type: &str, from: &[&str], to: &[&str]) {
        self.relationship_types.insert(rel_type.to_owned());
        self.register_labels(from);
        self.register_labels(to);
    }

    /// Rows sorted by key, with property-less placeholder rows dropped for
    /// keys that also declare properties (the engine's tables emit either
    /// one null-property row or N property rows per key, never both).
    fn sorted_node_rows(&self) -> Vec<NodePropertyRow> {
        let mut rows: Vec<NodePropertyRow> = self
            .node_rows
            .iter()
            .filter(|row| {
                row.property_name.is_some()
                    || !self.node_rows.iter().any(|other| {
                        other.property_name.is_some() && other.node_type == row.node_type
                    })
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.node_type.cmp(&b.node_type));
        rows
    }

    fn sorted_relationship_rows(&self) -> Vec<RelationshipPropertyRow> {
        let mut rows: Vec<RelationshipPropertyRow> = self
            .relationship_rows
            .iter()
            .filter(|row| {
                row.property_name.is_some()
                    || !self.relationship_rows.iter().any(|other| {
                        other.property_name.is_some()
                            && other.rel_type == row.rel_type
                            && other.from_labels == row.from_labels
                            && other.to_labels == row.to_labels
                    })
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.rel_type.cmp(&b.rel_type));
        rows
    }
}

impl SchemaSource for MemorySchema {
    fn labels_in_use(&mut self) -> Result<Box<dyn Iterator<Item = Result<String>> + '_>> {
        Ok(Box::new(self.labels.iter().cloned().map(Ok)))
    }

    fn relationship_types_in_use(
        &mut self,
    ) -> Result<Box<dyn Iterator<Item = Result<String>> + '_>> {
        Ok(Box::new(self.relationship_types.iter().cloned().map(Ok)))
    }

    fn node_type_properties(
        &mut self,
    ) -> Result<Box<dyn Iterator<Item = Result<NodePropertyRow>> + '_>> {
        Ok(Box::new(self.sorted_node_rows().into_iter().map(Ok)))
    }

    fn relationship_type_properties(
        &mut self,
    ) -> Result<Box<dyn Iterator<Item = Result<RelationshipPropertyRow>> + '_>> {
        Ok(Box::new(self.sorted_relationship_rows().into_iter().map(Ok)))
    }
}

fn structural_key(labels: &[&str]) -> String {
    node_structural_key(&owned(labels))
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_served_sorted_by_key() {
        let mut schema = MemorySchema::new();
        schema.add_node_property(&["Movie"], "title", &["String"], true);
        schema.add_node_property(&["Actor"], "name", &["String"], true);

        let rows: Vec<_> = schema
            .node_type_properties()
            .unwrap()
            .map(|row| row.unwrap().node_type)
            .collect();
        assert_eq!(rows, vec![":`Actor`", ":`Movie`"]);
    }

    #[test]
    fn placeholder_rows_yield_to_property_rows() {
        let mut schema = MemorySchema::new();
        schema.add_node_type(&["Person"]);
        schema.add_node_property(&["Person"], "name", &["String"], false);

        let rows: Vec<_> = schema
            .node_type_properties()
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].property_name.as_deref(), Some("name"));
    }

    #[test]
    fn labels_are_deduplicated_and_sorted() {
        let mut schema = MemorySchema::new();
        schema.add_relationship_type("KNOWS", &["Person"], &["Person"]);
        schema.add_node_property(&["Person"], "name", &["String"], false);

        let labels: Vec<_> = schema
            .labels_in_use()
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(labels, vec!["Person"]);
    }
}
