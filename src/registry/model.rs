//! Deserializable representation of a registry snapshot.
//!
//! A snapshot freezes the toolchain's process-wide tables (legacy directive
//! registry, domains, role tables and locale aliases) so discovery reads
//! plain data instead of live globals. Documents are validated against
//! `schema/registry_snapshot.schema.json` before deserialization.

use crate::registry::identity::{ClassRef, DomainName, HandlerId};
use crate::schema_loader::{DocumentKind, validate_document};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The only snapshot layout this crate understands.
pub const SNAPSHOT_SCHEMA_VERSION: &str = "rst_registry_v1";

const DEFAULT_UNIMPLEMENTED_HANDLER: &str = "unimplemented_role";

const EMBEDDED_SNAPSHOT: &str = include_str!("../../registry/docutils.json");

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// Already-constructed directive definition.
///
/// `options: null` (or a missing field) means the definition accepts no
/// options or leaves them unrestricted; both surface as an empty list.
pub struct DirectiveDescriptor {
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

impl DirectiveDescriptor {
    pub fn with_options<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: Some(options.into_iter().map(Into::into).collect()),
        }
    }

    /// Option keys in declaration order.
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Frozen copy of every registry discovery reads.
pub struct RegistrySnapshot {
    pub schema_version: String,
    #[serde(default)]
    pub legacy: LegacyRegistry,
    #[serde(default)]
    pub domains: Vec<DomainSpec>,
    #[serde(default)]
    pub roles: RoleTables,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
/// Legacy global directive registry.
pub struct LegacyRegistry {
    /// `module -> class -> descriptor`; the targets of `directive_registry`.
    #[serde(default)]
    pub definitions: BTreeMap<String, BTreeMap<String, DirectiveDescriptor>>,
    /// Directive name to indirect `(module, class)` reference.
    #[serde(default)]
    pub directive_registry: BTreeMap<String, ClassRef>,
    /// Directive name to an already-resolved descriptor.
    #[serde(default)]
    pub directives: BTreeMap<String, DirectiveDescriptor>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// One namespace of the domain-based registry.
pub struct DomainSpec {
    pub name: DomainName,
    #[serde(default)]
    pub directives: BTreeMap<String, DirectiveDescriptor>,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Canonical role tables plus per-language alias tables.
pub struct RoleTables {
    #[serde(default = "default_unimplemented_handler")]
    pub unimplemented_handler: HandlerId,
    /// Older table, written by local role registration.
    #[serde(default)]
    pub roles: BTreeMap<String, HandlerId>,
    /// Newer table; wins over `roles` on collision.
    #[serde(default)]
    pub role_registry: BTreeMap<String, HandlerId>,
    /// `language -> localized alias -> canonical role name`.
    #[serde(default)]
    pub languages: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for RoleTables {
    fn default() -> Self {
        Self {
            unimplemented_handler: default_unimplemented_handler(),
            roles: BTreeMap::new(),
            role_registry: BTreeMap::new(),
            languages: BTreeMap::new(),
        }
    }
}

fn default_unimplemented_handler() -> HandlerId {
    HandlerId(DEFAULT_UNIMPLEMENTED_HANDLER.to_string())
}

impl RegistrySnapshot {
    /// Empty snapshot with the current schema version.
    pub fn empty() -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
            legacy: LegacyRegistry::default(),
            domains: Vec::new(),
            roles: RoleTables::default(),
        }
    }

    /// The docutils snapshot compiled into the binary.
    pub fn load_embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_SNAPSHOT).context("loading embedded docutils snapshot")
    }

    /// Validate and parse a snapshot document.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(data).context("parsing registry snapshot")?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        validate_document(DocumentKind::Snapshot, &value)?;
        let snapshot: RegistrySnapshot =
            serde_json::from_value(value).context("decoding registry snapshot")?;
        validate_schema_version(&snapshot.schema_version)?;
        Ok(snapshot)
    }

    pub fn domain(&self, name: &DomainName) -> Option<&DomainSpec> {
        self.domains.iter().find(|domain| &domain.name == name)
    }
}

/// Read, validate and parse a snapshot from disk.
pub fn load_snapshot_from_path(path: &Path) -> Result<RegistrySnapshot> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading registry snapshot {}", path.display()))?;
    RegistrySnapshot::from_json_str(&data)
        .with_context(|| format!("loading registry snapshot {}", path.display()))
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version != SNAPSHOT_SCHEMA_VERSION {
        bail!(
            "schema_version '{}' not supported, expected '{}'",
            schema_version,
            SNAPSHOT_SCHEMA_VERSION
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_snapshot_loads() {
        let snapshot = RegistrySnapshot::load_embedded().expect("embedded snapshot");
        assert_eq!(snapshot.schema_version, SNAPSHOT_SCHEMA_VERSION);
        assert!(snapshot.legacy.directive_registry.contains_key("note"));
        assert!(snapshot.roles.languages.contains_key("en"));
        assert_eq!(snapshot.roles.unimplemented_handler.0, "unimplemented_role");
    }

    #[test]
    fn null_and_missing_options_are_empty() {
        let unrestricted: DirectiveDescriptor =
            serde_json::from_value(json!({"options": null})).unwrap();
        let missing: DirectiveDescriptor = serde_json::from_value(json!({})).unwrap();
        assert!(unrestricted.options().is_empty());
        assert!(missing.options().is_empty());

        let declared: DirectiveDescriptor =
            serde_json::from_value(json!({"options": ["width", "align", "alt"]})).unwrap();
        assert_eq!(declared.options(), ["width", "align", "alt"]);
    }

    #[test]
    fn minimal_snapshot_fills_defaults() {
        let snapshot =
            RegistrySnapshot::from_value(json!({"schema_version": SNAPSHOT_SCHEMA_VERSION}))
                .expect("minimal snapshot");
        assert!(snapshot.domains.is_empty());
        assert!(snapshot.legacy.directives.is_empty());
        assert_eq!(snapshot.roles.unimplemented_handler.0, "unimplemented_role");
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let err = RegistrySnapshot::from_value(json!({"schema_version": "rst_registry_v0"}))
            .unwrap_err();
        assert!(format!("{err:#}").contains("rst_registry_v0"));
    }
}
