//! # Schema Source Trait
//!
//! This is THE contract between the introspector and the engine that holds
//! the graph. The introspector never talks to storage or runs queries
//! itself; it consumes the iterables and tabular rows defined here.
//!
//! ## Implementations
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | `MemorySchema` | `memory` | In-memory schema facts for testing/embedding |
//!
//! Every iterator is a scoped resource: the source acquires whatever it
//! needs (transaction, cursor) when the iterator is created and releases it
//! when the iterator is dropped, on both normal and error exits. Failures
//! while iterating surface as `Error::DataAccess` items; the introspector
//! never retries.

pub mod memory;

use crate::Result;

pub use memory::MemorySchema;

/// One row of the node property table: per label combination, one row per
/// declared property (or a single row with no property for combinations
/// that declare none).
#[derive(Debug, Clone, PartialEq)]
pub struct NodePropertyRow {
    /// Structural key of the label combination, colon-separated and
    /// backtick-quoted: `` :`A`:`B` `` over the sorted label set.
    pub node_type: String,
    pub node_labels: Vec<String>,
    pub property_name: Option<String>,
    pub property_types: Vec<String>,
    pub mandatory: bool,
}

/// One row of the relationship property table: per relationship type and
/// observed endpoint label pair, one row per declared property (or a single
/// property-less row).
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipPropertyRow {
    pub rel_type: String,
    pub from_labels: Vec<String>,
    pub to_labels: Vec<String>,
    pub property_name: Option<String>,
    pub property_types: Vec<String>,
    pub mandatory: bool,
}

/// A snapshot of a property graph's schema facts.
///
/// Ordering contract: `node_type_properties` rows ascend by `node_type`,
/// `relationship_type_properties` rows ascend by `rel_type`. The
/// introspector relies on this for deterministic object-type order.
pub trait SchemaSource {
    /// Names of all node labels in use.
    fn labels_in_use(&mut self) -> Result<Box<dyn Iterator<Item = Result<String>> + '_>>;

    /// Names of all relationship types in use.
    fn relationship_types_in_use(&mut self)
        -> Result<Box<dyn Iterator<Item = Result<String>> + '_>>;

    /// The node property table, ordered ascending by `node_type`.
    fn node_type_properties(
        &mut self,
    ) -> Result<Box<dyn Iterator<Item = Result<NodePropertyRow>> + '_>>;

    /// The relationship property table, ordered ascending by `rel_type`.
    fn relationship_type_properties(
        &mut self,
    ) -> Result<Box<dyn Iterator<Item = Result<RelationshipPropertyRow>> + '_>>;
}
