//! Explicit lookup of legacy directive definitions.
//!
//! The legacy registry names its directives indirectly, by `(module, class)`.
//! The index is built once from the snapshot's `definitions` table and
//! resolves those references without any dynamic lookup. Unknown modules and
//! classes are reported separately so the caller can name what is missing.

use crate::registry::identity::ClassRef;
use crate::registry::model::{DirectiveDescriptor, LegacyRegistry};
use anyhow::{Result, bail};
use std::collections::BTreeMap;

#[derive(Debug)]
/// Definitions keyed by module, then class.
pub struct DefinitionIndex<'a> {
    modules: &'a BTreeMap<String, BTreeMap<String, DirectiveDescriptor>>,
}

impl<'a> DefinitionIndex<'a> {
    pub fn new(legacy: &'a LegacyRegistry) -> Self {
        Self {
            modules: &legacy.definitions,
        }
    }

    /// Resolve a reference to its descriptor.
    ///
    /// Fails when either the module or the class is absent; there is no
    /// fallback descriptor.
    pub fn resolve(&self, reference: &ClassRef) -> Result<&'a DirectiveDescriptor> {
        let Some(classes) = self.modules.get(reference.module()) else {
            bail!("unknown module '{}'", reference.module());
        };
        match classes.get(reference.class()) {
            Some(descriptor) => Ok(descriptor),
            None => bail!(
                "module '{}' has no class '{}'",
                reference.module(),
                reference.class()
            ),
        }
    }

    /// Module names in stable order.
    pub fn modules(&self) -> impl Iterator<Item = &'a str> {
        self.modules.keys().map(String::as_str)
    }
}
