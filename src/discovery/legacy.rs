//! Directives from the legacy global registry.

use crate::catalog::DirectiveSpec;
use crate::registry::{DefinitionIndex, LegacyRegistry};
use anyhow::{Context, Result};

/// Collect directives from the indirect registry, then the direct map.
///
/// Every indirect reference must resolve; a dangling `(module, class)` pair
/// aborts discovery with the directive name attached, since a catalog with
/// silently missing entries is worse than none.
pub fn discover_legacy_directives(legacy: &LegacyRegistry) -> Result<Vec<DirectiveSpec>> {
    let index = DefinitionIndex::new(legacy);
    let mut specs = Vec::with_capacity(legacy.directive_registry.len() + legacy.directives.len());

    for (name, reference) in &legacy.directive_registry {
        let descriptor = index.resolve(reference).with_context(|| {
            format!(
                "resolving directive '{name}' (known modules: {})",
                index.modules().collect::<Vec<_>>().join(", ")
            )
        })?;
        specs.push(DirectiveSpec::new(name.as_str(), descriptor.options()));
    }

    for (name, descriptor) in &legacy.directives {
        specs.push(DirectiveSpec::new(name.as_str(), descriptor.options()));
    }

    Ok(specs)
}
