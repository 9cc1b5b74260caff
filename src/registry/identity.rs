use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Name of the domain whose entries are emitted without a prefix.
pub const STANDARD_DOMAIN: &str = "std";

/// Indirect reference from a legacy directive name to its definition.
///
/// Serialized as a two-element array `["module", "Class"]`, matching how the
/// legacy registry stores `(module, class)` pairs.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct ClassRef(pub String, pub String);

impl ClassRef {
    pub fn module(&self) -> &str {
        &self.0
    }

    pub fn class(&self) -> &str {
        &self.1
    }
}

/// Opaque identifier of a role handler. Equal identifiers mean the same handler.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerId(pub String);

/// Symbolic domain name.
///
/// `Standard` is the reserved default domain; every other domain qualifies
/// its directive and role names as `domain:name`. Equality and qualification
/// go through `as_str`, so `Named("std")` behaves exactly like `Standard`.
#[derive(Clone, Debug, Eq)]
pub enum DomainName {
    Standard,
    Named(String),
}

impl DomainName {
    pub fn new(value: &str) -> Self {
        Self::from_str(value)
    }

    pub fn as_str(&self) -> &str {
        match self {
            DomainName::Standard => STANDARD_DOMAIN,
            DomainName::Named(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            STANDARD_DOMAIN => DomainName::Standard,
            other => DomainName::Named(other.to_string()),
        }
    }

    /// Completion name for an entry registered in this domain.
    pub fn qualify(&self, name: &str) -> String {
        match self.as_str() {
            STANDARD_DOMAIN => name.to_string(),
            domain => format!("{domain}:{name}"),
        }
    }
}

impl PartialEq for DomainName {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for DomainName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DomainName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}
