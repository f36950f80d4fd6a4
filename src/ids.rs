//! Identifier generation — the two interchangeable strategies and their
//! memoization wrappers.
//!
//! Constant mode derives ids from the structural key (label combination or
//! relationship type + target), so repeated introspection of an unchanged
//! graph yields byte-identical output. Random mode mints a fresh time-sorted
//! ULID per structural key instead.
//!
//! Both object-type generators are memoized on their structural key. The
//! object-type maps are keyed by generated id, so two rows describing the
//! same structural entity MUST resolve to the same id — without the caches,
//! random mode would split one entity across several map entries.
//!
//! None of these types are safe for concurrent or reentrant use; construct
//! fresh instances per invocation.

use std::collections::HashMap;

use ulid::Ulid;

/// A fresh time-ordered, lexically sortable id. Not idempotent.
fn random_id() -> String {
    Ulid::new().to_string()
}

/// Split a colon-separated, optionally backtick-quoted structural key into
/// its segments, trim and unquote each, drop empties, and rejoin under the
/// given prefix: `` :`A`:`B` `` with prefix `"n"` becomes `"n:A:B"`.
pub fn split_strip_and_join(value: &str, prefix: &str) -> String {
    let segments: Vec<&str> = value
        .split(':')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(strip_enclosing_ticks)
        .collect();
    format!("{}:{}", prefix, segments.join(":"))
}

/// Strip one pair of enclosing backticks, if present around a non-empty core.
fn strip_enclosing_ticks(segment: &str) -> &str {
    segment
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
        .filter(|core| !core.is_empty())
        .unwrap_or(segment)
}

/// The structural key of a node object type: sorted labels, each backtick
/// quoted, each preceded by a colon. This is the same shape the engine
/// reports as `nodeType` in its node property table, so endpoint lookups
/// and node-table lookups hit the same cache entries.
pub fn node_structural_key(labels: &[String]) -> String {
    let mut sorted: Vec<&str> = labels.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    let mut key = String::new();
    for label in sorted {
        key.push_str(":`");
        key.push_str(label);
        key.push('`');
    }
    key
}

// ============================================================================
// Token ids
// ============================================================================

/// Id generator for label / relationship-type tokens.
///
/// Token names are unique within their universe, so no memoization is
/// needed: each name is seen exactly once during token extraction.
pub struct TokenIdGenerator {
    use_constant_ids: bool,
    prefix: &'static str,
}

impl TokenIdGenerator {
    /// Node label tokens: `"nl:" + name` in constant mode.
    pub fn node_labels(use_constant_ids: bool) -> Self {
        Self { use_constant_ids, prefix: "nl" }
    }

    /// Relationship type tokens: `"rt:" + name` in constant mode.
    pub fn relationship_types(use_constant_ids: bool) -> Self {
        Self { use_constant_ids, prefix: "rt" }
    }

    pub fn id_for(&self, name: &str) -> String {
        if self.use_constant_ids {
            format!("{}:{}", self.prefix, name)
        } else {
            random_id()
        }
    }
}

// ============================================================================
// Node object type ids
// ============================================================================

/// Memoizing id generator for node object types, keyed by structural key.
///
/// Shared between the node aggregation pass and the relationship pass so
/// relationship endpoints resolve to the ids of existing node object types.
pub struct NodeObjectIdGenerator {
    use_constant_ids: bool,
    cache: HashMap<String, String>,
}

impl NodeObjectIdGenerator {
    pub fn new(use_constant_ids: bool) -> Self {
        Self { use_constant_ids, cache: HashMap::new() }
    }

    pub fn id_for(&mut self, structural_key: &str) -> String {
        if let Some(id) = self.cache.get(structural_key) {
            return id.clone();
        }
        let id = if self.use_constant_ids {
            split_strip_and_join(structural_key, "n")
        } else {
            random_id()
        };
        self.cache.insert(structural_key.to_owned(), id.clone());
        id
    }
}

// ============================================================================
// Relationship object type ids
// ============================================================================

/// Memoizing, disambiguating id generator for relationship object types.
///
/// One relationship type can target several distinct node object types; each
/// target needs its own `RelationshipObjectType` entry. Per relationship
/// type, the first target seen gets the bare id and every subsequently seen
/// distinct target gets suffix `_1`, `_2`, … in first-seen order. A target
/// seen again reuses its assigned id.
pub struct RelationshipObjectIdGenerator {
    use_constant_ids: bool,
    counters: HashMap<String, HashMap<String, usize>>,
    cache: HashMap<(String, String), String>,
}

impl RelationshipObjectIdGenerator {
    pub fn new(use_constant_ids: bool) -> Self {
        Self {
            use_constant_ids,
            counters: HashMap::new(),
            cache: HashMap::new(),
        }
    }

    pub fn id_for(&mut self, rel_type: &str, target_id: &str) -> String {
        let key = (rel_type.to_owned(), target_id.to_owned());
        if let Some(id) = self.cache.get(&key) {
            return id.clone();
        }
        let id = if self.use_constant_ids {
            self.constant_id(rel_type, target_id)
        } else {
            random_id()
        };
        self.cache.insert(key, id.clone());
        id
    }

    fn constant_id(&mut self, rel_type: &str, target_id: &str) -> String {
        let base = split_strip_and_join(rel_type, "r");
        let seen = self.counters.entry(base.clone()).or_default();
        let next = seen.len();
        let suffix = *seen.entry(target_id.to_owned()).or_insert(next);
        if suffix == 0 {
            base
        } else {
            format!("{}_{}", base, suffix)
        }
    }
}
