//! Environment-driven configuration.
//!
//! Every knob is optional; an empty variable counts as unset. The lookup is
//! injectable so tests never touch the process environment.

use crate::split_list;
use std::env;
use std::path::PathBuf;

pub const REGISTRY_ENV: &str = "RSTCOMPLETE_REGISTRY";
pub const EXTENSIONS_ENV: &str = "RSTCOMPLETE_EXTENSIONS";
pub const LANGUAGE_ENV: &str = "RSTCOMPLETE_LANGUAGE";
pub const SKIP_BUILTIN_EXTENSIONS_ENV: &str = "RSTCOMPLETE_SKIP_BUILTIN_EXTENSIONS";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Snapshot replacing the embedded docutils snapshot.
    pub registry: Option<PathBuf>,
    /// Bundle files registered after the embedded bundle, in order.
    pub extensions: Vec<PathBuf>,
    /// Alias table language; `None` selects the default.
    pub language: Option<String>,
    /// Whether the embedded Sphinx bundle is registered.
    pub builtin_extensions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry: None,
            extensions: Vec::new(),
            language: None,
            builtin_extensions: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let skip_builtin = non_empty(SKIP_BUILTIN_EXTENSIONS_ENV)
            .map(|value| value.trim() != "0")
            .unwrap_or(false);

        Self {
            registry: non_empty(REGISTRY_ENV).map(PathBuf::from),
            extensions: non_empty(EXTENSIONS_ENV)
                .map(|value| split_list(&value).into_iter().map(PathBuf::from).collect())
                .unwrap_or_default(),
            language: non_empty(LANGUAGE_ENV).map(|value| value.trim().to_string()),
            builtin_extensions: !skip_builtin,
        }
    }
}
