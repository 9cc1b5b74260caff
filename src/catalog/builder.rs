use crate::catalog::model::Catalog;
use crate::discovery::{discover_extended_entries, discover_legacy_directives, discover_roles};
use crate::registry::RegistrySnapshot;
use anyhow::{Context, Result};

#[derive(Clone, Debug, Default)]
/// Knobs that influence discovery without changing the output format.
pub struct CatalogOptions {
    /// Alias table to apply; `None` means the default language.
    pub language: Option<String>,
}

/// Run every adapter against a frozen snapshot and concatenate the results.
///
/// Sources are appended in a fixed order (legacy directives, then domain
/// directives; normalized roles, then domain roles). Nothing is deduplicated
/// across sources: a domain may legitimately re-export a bare name.
pub fn build_catalog(snapshot: &RegistrySnapshot, options: &CatalogOptions) -> Result<Catalog> {
    let mut directives =
        discover_legacy_directives(&snapshot.legacy).context("discovering legacy directives")?;
    let legacy_count = directives.len();

    let (extended_directives, extended_roles) = discover_extended_entries(&snapshot.domains);

    let mut roles = discover_roles(&snapshot.roles, options.language.as_deref())
        .context("discovering roles")?;
    let normalized_count = roles.len();

    directives.extend(extended_directives);
    roles.extend(extended_roles);

    tracing::debug!(
        legacy_directives = legacy_count,
        domain_directives = directives.len() - legacy_count,
        normalized_roles = normalized_count,
        domain_roles = roles.len() - normalized_count,
        "catalog assembled"
    );

    Ok(Catalog { directives, roles })
}
