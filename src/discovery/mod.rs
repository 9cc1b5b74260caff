//! Extension-point discovery over a frozen registry snapshot.
//!
//! Each adapter reads one registry with its own storage and naming
//! conventions and produces catalog entries in a common shape:
//!
//! * `legacy`: the global directive registry (indirect and direct maps);
//! * `domains`: the domain-scoped registry, `domain:name` outside `std`;
//! * `roles`: canonical role tables merged with locale aliases.

pub mod domains;
pub mod legacy;
pub mod roles;

pub use domains::discover_extended_entries;
pub use legacy::discover_legacy_directives;
pub use roles::discover_roles;
