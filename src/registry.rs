//! Token extraction — builds the deduplicated label and relationship-type
//! token tables.

use std::collections::BTreeMap;

use crate::Result;
use crate::ids::TokenIdGenerator;
use crate::model::Token;
use crate::sanitize::sanitize;

/// Fold an iterable of raw names into a token map keyed by raw name.
///
/// The map key stays the raw name so later `Ref` resolution works even when
/// `quote_tokens` rewrote the emitted value. A name the sanitizer cannot
/// handle falls back to its raw form, silently.
///
/// The iterator is consumed exactly once; dropping it on any exit path
/// releases whatever resource the source scoped to it. Keyed by `BTreeMap`
/// so token array order is deterministic regardless of source order.
pub fn collect_tokens(
    names: impl Iterator<Item = Result<String>>,
    quote_tokens: bool,
    ids: &TokenIdGenerator,
) -> Result<BTreeMap<String, Token>> {
    let mut tokens = BTreeMap::new();
    for name in names {
        let name = name?;
        let value = if quote_tokens {
            sanitize(&name).unwrap_or_else(|| name.clone())
        } else {
            name.clone()
        };
        let token = Token::new(ids.id_for(&name), value);
        tokens.insert(name, token);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn names(values: &[&str]) -> impl Iterator<Item = Result<String>> {
        values
            .iter()
            .map(|v| Ok(v.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn tokens_are_keyed_by_raw_name() {
        let ids = TokenIdGenerator::node_labels(true);
        let tokens = collect_tokens(names(&["My Label"]), true, &ids).unwrap();

        let token = &tokens["My Label"];
        assert_eq!(token.id, "nl:My Label");
        assert_eq!(token.value, "`My Label`");
    }

    #[test]
    fn quoting_can_be_disabled() {
        let ids = TokenIdGenerator::node_labels(true);
        let tokens = collect_tokens(names(&["My Label"]), false, &ids).unwrap();
        assert_eq!(tokens["My Label"].value, "My Label");
    }

    #[test]
    fn plain_names_are_unchanged_by_quoting() {
        let ids = TokenIdGenerator::relationship_types(true);
        let tokens = collect_tokens(names(&["KNOWS"]), true, &ids).unwrap();
        assert_eq!(tokens["KNOWS"].id, "rt:KNOWS");
        assert_eq!(tokens["KNOWS"].value, "KNOWS");
    }

    #[test]
    fn iteration_failures_propagate() {
        let ids = TokenIdGenerator::node_labels(true);
        let source = vec![
            Ok("Person".to_owned()),
            Err(Error::DataAccess("cursor gone".to_owned())),
        ];
        let err = collect_tokens(source.into_iter(), true, &ids).unwrap_err();
        assert!(matches!(err, Error::DataAccess(_)));
    }
}
