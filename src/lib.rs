//! Shared library for the reStructuredText completion generator.
//!
//! The crate turns a frozen snapshot of a documentation toolchain's extension
//! registries into the Emacs Lisp tables used by `auto-complete-rst`. Public
//! functions here form the contract the `rst-completions` binary depends on:
//! snapshot selection, bundle bootstrap, catalog assembly and rendering.

use anyhow::Result;

pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod registry;
pub mod render;
mod schema_loader;

pub use bootstrap::{ExtensionBundle, Registration, bootstrap};
pub use catalog::{Catalog, CatalogOptions, DirectiveSpec, build_catalog};
pub use config::Config;
pub use registry::{RegistrySnapshot, load_snapshot_from_path};
pub use render::render;

/// Load the snapshot named by the configuration, or the embedded one.
///
/// A configured snapshot that cannot be read or validated is fatal; the
/// embedded snapshot is never used as a fallback for it.
pub fn load_snapshot(config: &Config) -> Result<RegistrySnapshot> {
    match &config.registry {
        Some(path) => load_snapshot_from_path(path),
        None => RegistrySnapshot::load_embedded(),
    }
}

/// Run the whole pipeline and return the generated source.
///
/// Bundles are registered before the snapshot is frozen for discovery, so
/// every adapter sees the same immutable tables.
pub fn generate(config: &Config) -> Result<String> {
    let mut snapshot = load_snapshot(config)?;
    bootstrap(&mut snapshot, config);
    let snapshot = snapshot;

    let options = CatalogOptions {
        language: config.language.clone(),
    };
    let catalog = build_catalog(&snapshot, &options)?;
    render(&catalog)
}

/// Split comma- or whitespace-delimited configuration lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
