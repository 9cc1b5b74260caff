//! Role names from the canonical tables and the locale alias table.
//!
//! The older and newer canonical tables are merged (newer wins), localized
//! aliases are attached to the handler of their canonical role, and every
//! name bound to the unimplemented sentinel is dropped. Output is sorted so
//! generated files diff cleanly between runs.

use crate::registry::{HandlerId, RoleTables};
use anyhow::{Result, bail};
use std::collections::BTreeMap;

/// Locale used when the caller does not ask for one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Merge, alias, filter and sort the role tables.
///
/// `language` selects the alias table. An explicitly requested language
/// without a table is an error; the default language may be absent, in which
/// case no aliases apply.
pub fn discover_roles(tables: &RoleTables, language: Option<&str>) -> Result<Vec<String>> {
    let mut merged: BTreeMap<&str, &HandlerId> = BTreeMap::new();
    merged.extend(tables.roles.iter().map(|(name, handler)| (name.as_str(), handler)));
    merged.extend(
        tables
            .role_registry
            .iter()
            .map(|(name, handler)| (name.as_str(), handler)),
    );

    let aliases = match (language, tables.languages.get(language.unwrap_or(DEFAULT_LANGUAGE))) {
        (_, Some(aliases)) => Some(aliases),
        (Some(requested), None) => bail!("language '{requested}' has no role alias table"),
        (None, None) => {
            tracing::debug!(language = DEFAULT_LANGUAGE, "no role alias table; skipping aliases");
            None
        }
    };

    // Aliases resolve against the canonical tables only, never against other aliases.
    let mut resolved: Vec<(&str, &HandlerId)> = Vec::new();
    for (alias, canonical) in aliases.into_iter().flatten() {
        match merged.get(canonical.as_str()) {
            Some(handler) => resolved.push((alias.as_str(), *handler)),
            None => tracing::debug!(%alias, %canonical, "alias target is not a registered role"),
        }
    }
    merged.extend(resolved);

    Ok(merged
        .into_iter()
        .filter(|(_, handler)| **handler != tables.unimplemented_handler)
        .map(|(name, _)| name.to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIMPLEMENTED: &str = "unimplemented_role";

    fn handler(name: &str) -> HandlerId {
        HandlerId(name.to_string())
    }

    fn tables() -> RoleTables {
        let mut tables = RoleTables::default();
        tables.roles.insert("kbd".into(), handler("generic_docrole"));
        tables.roles.insert("strong".into(), handler("old_strong"));
        tables.role_registry.insert("strong".into(), handler("generic_custom_role"));
        tables.role_registry.insert("emphasis".into(), handler("generic_custom_role"));
        tables.role_registry.insert("image".into(), handler("image_role"));
        tables.role_registry.insert("target".into(), handler(UNIMPLEMENTED));
        tables
    }

    fn with_aliases(mut tables: RoleTables, language: &str, pairs: &[(&str, &str)]) -> RoleTables {
        tables.languages.insert(
            language.to_string(),
            pairs
                .iter()
                .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
                .collect(),
        );
        tables
    }

    #[test]
    fn merged_roles_are_sorted_and_filtered() {
        let roles = discover_roles(&tables(), None).expect("roles");
        assert_eq!(roles, vec!["emphasis", "image", "kbd", "strong"]);
    }

    #[test]
    fn newer_table_wins_on_collision() {
        let mut tables = tables();
        tables.roles.insert("target".into(), handler("target_role"));
        let roles = discover_roles(&tables, None).expect("roles");
        assert!(!roles.contains(&"target".to_string()));

        let mut tables = self::tables();
        tables.roles.insert("index".into(), handler(UNIMPLEMENTED));
        tables.role_registry.insert("index".into(), handler("index_role"));
        let roles = discover_roles(&tables, None).expect("roles");
        assert!(roles.contains(&"index".to_string()));
    }

    #[test]
    fn alias_follows_implemented_canonical_role() {
        let tables = with_aliases(tables(), "es", &[("imagen", "image"), ("enfasis", "emphasis")]);
        let roles = discover_roles(&tables, Some("es")).expect("roles");
        assert!(roles.contains(&"imagen".to_string()));
        assert!(roles.contains(&"enfasis".to_string()));
        assert!(roles.contains(&"image".to_string()));
    }

    #[test]
    fn alias_of_unimplemented_role_is_dropped() {
        let mut tables = with_aliases(tables(), "es", &[("imagen", "image"), ("destino", "target")]);
        tables.role_registry.insert("image".into(), handler(UNIMPLEMENTED));
        let roles = discover_roles(&tables, Some("es")).expect("roles");
        assert!(!roles.contains(&"imagen".to_string()));
        assert!(!roles.contains(&"image".to_string()));
        assert!(!roles.contains(&"destino".to_string()));
    }

    #[test]
    fn alias_to_unknown_role_is_skipped() {
        let tables = with_aliases(tables(), "en", &[("t", "title-reference"), ("b", "strong")]);
        let roles = discover_roles(&tables, None).expect("roles");
        assert!(!roles.contains(&"t".to_string()));
        assert!(roles.contains(&"b".to_string()));
    }

    #[test]
    fn duplicate_alias_and_canonical_name_appear_once() {
        let tables = with_aliases(tables(), "en", &[("strong", "strong"), ("kbd", "kbd")]);
        let roles = discover_roles(&tables, None).expect("roles");
        assert_eq!(roles, vec!["emphasis", "image", "kbd", "strong"]);
    }

    #[test]
    fn requested_language_must_exist() {
        let err = discover_roles(&tables(), Some("fr")).unwrap_err();
        assert_eq!(err.to_string(), "language 'fr' has no role alias table");
    }
}
