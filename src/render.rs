//! Emacs Lisp rendering of a completion catalog.
//!
//! The template is fixed: one defun returning directive candidates
//! (`"name::"`), one returning role candidates (`"name:"`), and a `puthash`
//! per directive filling `auto-complete-rst-directive-options-map` with its
//! option keys (`"key:"`). Names are emitted verbatim inside double quotes, so
//! anything that would need escaping is rejected before rendering starts.

use crate::catalog::Catalog;
use anyhow::{Context, Result, bail};
use tera::Tera;

const TEMPLATE_NAME: &str = "auto-complete-rst.el";

const TEMPLATE: &str = r#"(defun auto-complete-rst-directives-candidates ()
  '({% for spec in directives %}"{{ spec.name }}::"{% if not loop.last %} {% endif %}{% endfor %}))

(defun auto-complete-rst-roles-candidates ()
  '({% for role in roles %}"{{ role }}:"{% if not loop.last %} {% endif %}{% endfor %}))

{% for spec in directives -%}
(puthash "{{ spec.name }}"
         '({% for option in spec.options %}"{{ option }}:"{% if not loop.last %} {% endif %}{% endfor %})
         auto-complete-rst-directive-options-map)
{% endfor %}"#;

// Characters that cannot appear unescaped inside a Lisp string literal.
const UNSAFE_LITERAL_CHARS: &[char] = &['"', '\\', '\n', '\r'];

/// Render `catalog` into the generated Lisp source.
///
/// Order is taken from the catalog as-is. Fails without producing any output
/// when a directive name, role name or option key is not a safe literal.
pub fn render(catalog: &Catalog) -> Result<String> {
    validate_literals(catalog)?;

    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)
        .context("compiling completion template")?;
    let context =
        tera::Context::from_serialize(catalog).context("building template context")?;
    tera.render(TEMPLATE_NAME, &context)
        .context("rendering completion template")
}

fn validate_literals(catalog: &Catalog) -> Result<()> {
    for spec in &catalog.directives {
        check_literal("directive", &spec.name)?;
        for option in &spec.options {
            check_literal(&format!("option of directive '{}'", spec.name), option)?;
        }
    }
    for role in &catalog.roles {
        check_literal("role", role)?;
    }
    Ok(())
}

fn check_literal(kind: &str, value: &str) -> Result<()> {
    if let Some(bad) = value.chars().find(|c| UNSAFE_LITERAL_CHARS.contains(c)) {
        bail!("{kind} {value:?} contains {bad:?}, which cannot be emitted as a string literal");
    }
    Ok(())
}
