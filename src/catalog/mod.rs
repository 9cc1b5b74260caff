//! Completion catalog assembly.
//!
//! The catalog is the flat, ordered result of one discovery run: directive
//! specs from the legacy registry followed by the domain registry, and role
//! names from the normalizer followed by the domain roles. It is built fresh
//! for every invocation and handed straight to the renderer.

pub mod builder;
pub mod model;

pub use builder::{CatalogOptions, build_catalog};
pub use model::{Catalog, DirectiveSpec};
