//! Explicit registration of extension bundles.
//!
//! Toolchain extensions add directives, roles and whole domains to the
//! registries. Instead of relying on import-time mutation, each bundle is
//! registered against the snapshot with `RegistrySnapshot::register`, which
//! reports exactly what it added. Bundles are an optional enhancement:
//! `bootstrap` logs and swallows any failure to load one.

use crate::config::Config;
use crate::registry::{DirectiveDescriptor, DomainSpec, HandlerId, RegistrySnapshot};
use crate::schema_loader::{DocumentKind, validate_document};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const EMBEDDED_SPHINX_BUNDLE: &str = include_str!("../registry/sphinx.json");

#[derive(Clone, Debug, Deserialize)]
/// Registrations contributed by one extension.
pub struct ExtensionBundle {
    pub name: String,
    /// Added to the legacy direct directive map.
    #[serde(default)]
    pub directives: BTreeMap<String, DirectiveDescriptor>,
    /// Added to the older (local) role table.
    #[serde(default)]
    pub roles: BTreeMap<String, HandlerId>,
    /// Appended, or merged into an existing domain with the same name.
    #[serde(default)]
    pub domains: Vec<DomainSpec>,
}

impl ExtensionBundle {
    /// The Sphinx bundle compiled into the binary.
    pub fn embedded_sphinx() -> Result<Self> {
        Self::from_json_str(EMBEDDED_SPHINX_BUNDLE).context("loading embedded sphinx bundle")
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(data).context("parsing extension bundle")?;
        validate_document(DocumentKind::Bundle, &value)?;
        serde_json::from_value(value).context("decoding extension bundle")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading extension bundle {}", path.display()))?;
        Self::from_json_str(&data)
            .with_context(|| format!("loading extension bundle {}", path.display()))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// Entries a single `register` call added or replaced.
///
/// Domain entries use their qualified completion names (`py:function`).
pub struct Registration {
    pub bundle: String,
    pub directives: Vec<String>,
    pub roles: Vec<String>,
    pub domains: Vec<String>,
}

impl Registration {
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty() && self.roles.is_empty() && self.domains.is_empty()
    }
}

impl RegistrySnapshot {
    /// Register `bundle` and report what changed.
    ///
    /// Entries already present with identical content are not reported, so
    /// registering the same bundle twice yields an empty registration.
    pub fn register(&mut self, bundle: &ExtensionBundle) -> Registration {
        let mut registration = Registration {
            bundle: bundle.name.clone(),
            ..Registration::default()
        };

        for (name, descriptor) in &bundle.directives {
            if insert_changed(&mut self.legacy.directives, name, descriptor) {
                registration.directives.push(name.clone());
            }
        }

        for (name, handler) in &bundle.roles {
            if insert_changed(&mut self.roles.roles, name, handler) {
                registration.roles.push(name.clone());
            }
        }

        for incoming in &bundle.domains {
            let position = self
                .domains
                .iter()
                .position(|domain| domain.name == incoming.name);
            let domain = match position {
                Some(idx) => &mut self.domains[idx],
                None => {
                    registration.domains.push(incoming.name.as_str().to_string());
                    self.domains.push(DomainSpec {
                        name: incoming.name.clone(),
                        directives: BTreeMap::new(),
                        roles: Vec::new(),
                    });
                    let last = self.domains.len() - 1;
                    &mut self.domains[last]
                }
            };
            merge_domain(domain, incoming, &mut registration);
        }

        registration
    }
}

fn insert_changed<T: Clone + PartialEq>(
    table: &mut BTreeMap<String, T>,
    name: &str,
    value: &T,
) -> bool {
    if table.get(name) == Some(value) {
        return false;
    }
    table.insert(name.to_string(), value.clone());
    true
}

fn merge_domain(domain: &mut DomainSpec, incoming: &DomainSpec, registration: &mut Registration) {
    for (name, descriptor) in &incoming.directives {
        if insert_changed(&mut domain.directives, name, descriptor) {
            registration.directives.push(domain.name.qualify(name));
        }
    }
    for role in &incoming.roles {
        if !domain.roles.contains(role) {
            domain.roles.push(role.clone());
            registration.roles.push(domain.name.qualify(role));
        }
    }
}

/// Register the embedded and configured bundles, best-effort.
///
/// The embedded Sphinx bundle goes first unless disabled, followed by
/// configured bundle files in order. A bundle that cannot be loaded is
/// skipped with a warning; the remaining bundles still apply.
pub fn bootstrap(snapshot: &mut RegistrySnapshot, config: &Config) -> Vec<Registration> {
    let mut registrations = Vec::new();

    if config.builtin_extensions {
        match ExtensionBundle::embedded_sphinx() {
            Ok(bundle) => registrations.push(apply(snapshot, &bundle)),
            Err(err) => tracing::warn!("skipping embedded sphinx bundle: {err:#}"),
        }
    }

    for path in &config.extensions {
        match ExtensionBundle::load(path) {
            Ok(bundle) => registrations.push(apply(snapshot, &bundle)),
            Err(err) => tracing::warn!(path = %path.display(), "skipping extension bundle: {err:#}"),
        }
    }

    registrations
}

fn apply(snapshot: &mut RegistrySnapshot, bundle: &ExtensionBundle) -> Registration {
    let registration = snapshot.register(bundle);
    tracing::info!(
        bundle = %registration.bundle,
        directives = registration.directives.len(),
        roles = registration.roles.len(),
        domains = registration.domains.len(),
        "registered extension bundle"
    );
    registration
}
