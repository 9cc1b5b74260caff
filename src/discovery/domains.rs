//! Directives and roles from the domain-scoped registry.

use crate::catalog::DirectiveSpec;
use crate::registry::DomainSpec;

/// Collect every domain's directives and roles, qualifying names outside
/// the standard domain as `domain:name`.
pub fn discover_extended_entries(domains: &[DomainSpec]) -> (Vec<DirectiveSpec>, Vec<String>) {
    let mut directives = Vec::new();
    let mut roles = Vec::new();

    for domain in domains {
        for (name, descriptor) in &domain.directives {
            directives.push(DirectiveSpec::new(
                domain.name.qualify(name),
                descriptor.options(),
            ));
        }
        roles.extend(domain.roles.iter().map(|role| domain.name.qualify(role)));
    }

    (directives, roles)
}
