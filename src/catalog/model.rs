use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// Completion entry for one directive: its name and recognized option keys.
pub struct DirectiveSpec {
    pub name: String,
    pub options: Vec<String>,
}

impl DirectiveSpec {
    pub fn new(name: impl Into<String>, options: &[String]) -> Self {
        Self {
            name: name.into(),
            options: options.to_vec(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
/// Aggregated output of one discovery run, in source concatenation order.
pub struct Catalog {
    pub directives: Vec<DirectiveSpec>,
    pub roles: Vec<String>,
}
