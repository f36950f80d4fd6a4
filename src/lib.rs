//! # graph-schema-introspect — Property Graph Schema Introspection
//!
//! Folds the raw schema facts of a property graph (labels and relationship
//! types in use, per-label and per-relationship property tables) into the
//! canonical graph-schema JSON representation defined by
//! [graph-schema-json-js-utils](https://github.com/neo4j/graph-schema-json-js-utils).
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `SchemaSource` is the contract between the
//!    introspector and whatever engine holds the graph
//! 2. **Clean DTOs**: `Token`, `NodeObjectType`, `RelationshipObjectType`
//!    cross all boundaries; serialization quirks live in serde adapters
//! 3. **Uniform model, polymorphic encoder**: property type lists are always
//!    a `Vec` internally; null/object/array variance happens at the boundary
//! 4. **Fresh state per invocation**: id caches and disambiguation counters
//!    are constructed per call, never shared
//!
//! ## Quick Start
//!
//! ```rust
//! use graph_schema_introspect::{Introspector, IntrospectConfig, MemorySchema};
//!
//! # fn example() -> graph_schema_introspect::Result<()> {
//! let mut schema = MemorySchema::new();
//! schema.add_node_property(&["Person"], "name", &["String"], true);
//! schema.add_relationship_type("KNOWS", &["Person"], &["Person"]);
//!
//! let json = Introspector::new(schema).introspect(&IntrospectConfig::default())?;
//! assert!(json.contains("\"nl:Person\""));
//! # Ok(())
//! # }
//! ```
//!
//! ## Identifier Modes
//!
//! | Mode | Config | Description |
//! |------|--------|-------------|
//! | Constant | `useConstantIds: true` (default) | Deterministic ids derived from labels/types |
//! | Random | `useConstantIds: false` | Fresh time-sorted ULIDs, memoized per structural key |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod source;
pub mod config;
pub mod ids;
pub mod sanitize;
pub mod registry;
pub mod introspect;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Token, Ref, PropertyType, Property,
    NodeObjectType, RelationshipObjectType,
};

// ============================================================================
// Re-exports: Source seam
// ============================================================================

pub use source::{
    SchemaSource, NodePropertyRow, RelationshipPropertyRow, MemorySchema,
};

// ============================================================================
// Re-exports: Entry point
// ============================================================================

pub use config::IntrospectConfig;
pub use introspect::Introspector;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data access error: {0}")]
    DataAccess(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
