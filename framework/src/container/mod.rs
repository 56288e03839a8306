//! Instance container and dependency injector
//!
//! `Container::build` instantiates every scanned component with a recognized
//! role and stores the instances under derived string keys. `inject` then
//! resolves each declared slot against those keys in a single pass. The
//! container is read-only after startup and shared across request tasks.
//!
//! Key derivation:
//! - controller: lower-camel-cased simple type name (`UserController` →
//!   `userController`)
//! - service with an explicit name: that name
//! - service without one: the fully-qualified name of each declared
//!   interface, one fresh instance per interface; zero interfaces stores
//!   nothing
//!
//! Keys are unique; a later registration with a colliding key overwrites the
//! earlier one without error, keeping the earlier position so route order
//! stays tied to first registration.

pub mod inject;

pub use inject::Inject;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::component::registry::ComponentDescriptor;
use crate::component::{downcast, ComponentDef, ComponentSet, ConstructFn, ErasedInstance, Role};
use crate::error::InstantiationError;

/// One stored instance and the definition it was built from.
pub struct Entry {
    pub instance: ErasedInstance,
    pub def: &'static ComponentDef,
}

/// String-keyed store of instantiated components. Insertion-ordered.
pub struct Container {
    entries: IndexMap<String, Entry>,
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container").finish_non_exhaustive()
    }
}

impl Container {
    /// Instantiate every descriptor with a recognized role.
    ///
    /// Construction failures are collected across the whole batch and
    /// reported together; any failure is fatal to startup.
    pub fn build(
        set: &ComponentSet<'_>,
        descriptors: Vec<ComponentDescriptor>,
    ) -> Result<Self, InstantiationError> {
        fn store(
            entries: &mut IndexMap<String, Entry>,
            failures: &mut Vec<InstantiationError>,
            key: String,
            def: &'static ComponentDef,
            construct: ConstructFn,
        ) {
            match construct() {
                Ok(instance) => {
                    debug!(key = %key, type_name = def.type_name, "registered component");
                    entries.insert(key, Entry { instance, def });
                }
                Err(err) => failures.push(err),
            }
        }

        let mut entries: IndexMap<String, Entry> = IndexMap::new();
        let mut failures: Vec<InstantiationError> = Vec::new();

        for descriptor in descriptors {
            let Some(def) = set.find(descriptor.type_name) else {
                failures.push(InstantiationError::UnknownType(descriptor.type_name));
                continue;
            };
            match def.role {
                Some(Role::Controller) => {
                    let key = lower_camel(simple_name(def.type_name));
                    store(&mut entries, &mut failures, key, def, def.construct);
                }
                Some(Role::Service) => {
                    if let Some(name) = def.service_name {
                        store(&mut entries, &mut failures, name.to_string(), def, def.construct);
                    } else {
                        // One fresh instance per declared interface; a
                        // service with none is dropped silently.
                        for interface in def.interfaces {
                            store(
                                &mut entries,
                                &mut failures,
                                interface.name.to_string(),
                                def,
                                interface.construct,
                            );
                        }
                    }
                }
                None => continue,
            }
        }

        match failures.len() {
            0 => Ok(Self { entries }),
            1 => Err(failures.remove(0)),
            _ => Err(InstantiationError::Batch(failures)),
        }
    }

    /// Resolve every declared injection slot, once, after all instances
    /// exist. A missing target or a mismatched erasure leaves the slot at
    /// its zero value; neither is an error.
    pub fn inject(&self) {
        for (key, entry) in &self.entries {
            for slot in entry.def.injects {
                let lookup = if slot.name.is_empty() {
                    slot.type_name
                } else {
                    slot.name
                };
                let Some(dependency) = self.entries.get(lookup) else {
                    warn!(target_key = %key, lookup, "injection target not found, leaving slot empty");
                    continue;
                };
                if !(slot.assign)(&entry.instance, &dependency.instance) {
                    warn!(target_key = %key, lookup, "injection erasure mismatch, leaving slot empty");
                }
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Typed resolution of a stored instance.
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(&self, key: &str) -> Option<std::sync::Arc<T>> {
        downcast::<T>(&self.get(key)?.instance)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Last path segment of a fully-qualified type name.
fn simple_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// `UserController` → `userController`.
fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
