//! # Graph Schema Model
//!
//! Clean DTOs for the graph-schema representation. These types cross every
//! boundary: source ↔ aggregation ↔ serialization ↔ user.
//!
//! Design rule: NO engine types and NO serializer state here. This module is
//! pure data — the only logic is type normalization and the serde adapters
//! that encode the document's polymorphic fields.

pub mod token;
pub mod property;
pub mod object_type;

pub use token::{Token, Ref};
pub use property::{Property, PropertyType};
pub use object_type::{NodeObjectType, RelationshipObjectType};
