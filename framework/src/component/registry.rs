//! Namespace scan over registered component definitions
//!
//! The explicit-registration analog of walking a compiled-output tree: every
//! definition whose fully-qualified type name falls under the configured
//! namespace becomes a descriptor. Descriptors are consumed once by the
//! container and then discarded.

use crate::component::ComponentSet;
use crate::error::DiscoveryError;

/// A component identifier discovered during the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentDescriptor {
    pub type_name: &'static str,
}

/// Select every registered definition under `namespace`.
///
/// An empty result is fatal: a namespace nothing lives under is a
/// misconfigured scan path. No deduplication is performed, and inventory
/// order is link order, not guaranteed stable across builds.
pub fn scan(
    set: &ComponentSet<'_>,
    namespace: &str,
) -> Result<Vec<ComponentDescriptor>, DiscoveryError> {
    let prefix = format!("{namespace}::");
    let descriptors: Vec<ComponentDescriptor> = set
        .iter()
        .filter(|def| def.type_name == namespace || def.type_name.starts_with(&prefix))
        .map(|def| ComponentDescriptor {
            type_name: def.type_name,
        })
        .collect();

    if descriptors.is_empty() {
        return Err(DiscoveryError {
            namespace: namespace.to_string(),
        });
    }
    Ok(descriptors)
}
