//! JSON Schema validation for snapshot and bundle documents.
//!
//! Both schemas ship inside the binary so validation never depends on the
//! working directory. Documents are validated as raw JSON before serde sees
//! them, which keeps error messages pointed at the offending path.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;

const SNAPSHOT_SCHEMA: &str = include_str!("../schema/registry_snapshot.schema.json");
const BUNDLE_SCHEMA: &str = include_str!("../schema/extension_bundle.schema.json");

/// Which document contract to validate against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DocumentKind {
    Snapshot,
    Bundle,
}

impl DocumentKind {
    fn label(self) -> &'static str {
        match self {
            DocumentKind::Snapshot => "registry snapshot",
            DocumentKind::Bundle => "extension bundle",
        }
    }

    fn schema_source(self) -> &'static str {
        match self {
            DocumentKind::Snapshot => SNAPSHOT_SCHEMA,
            DocumentKind::Bundle => BUNDLE_SCHEMA,
        }
    }
}

pub(crate) fn compile_schema(kind: DocumentKind) -> Result<JSONSchema> {
    let raw: Value = serde_json::from_str(kind.schema_source())
        .with_context(|| format!("parsing {} schema", kind.label()))?;
    JSONSchema::compile(&raw).map_err(|err| anyhow!("compiling {} schema: {err}", kind.label()))
}

/// Validate `value` against the schema for `kind`, collecting every error.
pub(crate) fn validate_document(kind: DocumentKind, value: &Value) -> Result<()> {
    let compiled = compile_schema(kind)?;
    if let Err(errors) = compiled.validate(value) {
        let details = errors
            .map(|err| format!("{}: {}", err.instance_path, err))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("{} failed schema validation:\n{}", kind.label(), details);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_schemas_compile() {
        compile_schema(DocumentKind::Snapshot).expect("snapshot schema");
        compile_schema(DocumentKind::Bundle).expect("bundle schema");
    }

    #[test]
    fn malformed_class_reference_fails_validation() {
        let snapshot = json!({
            "schema_version": "rst_registry_v1",
            "legacy": {"directive_registry": {"note": ["admonitions"]}}
        });
        let err = validate_document(DocumentKind::Snapshot, &snapshot).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("registry snapshot failed schema validation"));
        assert!(message.contains("/legacy/directive_registry/note"));
    }

    #[test]
    fn bundle_requires_a_name() {
        let err = validate_document(DocumentKind::Bundle, &json!({"directives": {}})).unwrap_err();
        assert!(err.to_string().contains("extension bundle"));
        validate_document(DocumentKind::Bundle, &json!({"name": "ext"})).expect("minimal bundle");
    }
}
