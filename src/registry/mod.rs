//! Registry snapshot wiring.
//!
//! A snapshot is the frozen form of the documentation toolchain's extension
//! registries. Types here mirror `schema/registry_snapshot.schema.json`;
//! `DefinitionIndex` resolves legacy `(module, class)` references against the
//! snapshot's definition table.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{ClassRef, DomainName, HandlerId, STANDARD_DOMAIN};
pub use index::DefinitionIndex;
pub use model::{
    DirectiveDescriptor, DomainSpec, LegacyRegistry, RegistrySnapshot, RoleTables,
    SNAPSHOT_SCHEMA_VERSION,
};

pub use model::load_snapshot_from_path;
