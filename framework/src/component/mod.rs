//! Component declarations
//!
//! Components are declared as first-class data instead of annotations: a
//! `ComponentDef` names the type, its container role, its constructor, its
//! injectable slots and its routes. Definitions are collected at link time
//! through `inventory` submissions, or supplied as an explicit slice for
//! tests and embedded setups.
//!
//! # Example
//!
//! ```rust,ignore
//! inventory::submit! {
//!     ComponentDef {
//!         type_name: "my_app::controllers::HomeController",
//!         role: Some(Role::Controller),
//!         service_name: None,
//!         construct: construct_home,
//!         interfaces: &[],
//!         injects: &[],
//!         prefix: "/home",
//!         routes: &[RouteDef { path: "/index.html", params: &[], invoke: invoke_index }],
//!     }
//! }
//! ```

pub mod registry;

use std::any::Any;
use std::sync::Arc;

use crate::dispatch::CallArgs;
use crate::error::{InstantiationError, InvokeError};
use crate::view::ModelAndView;

/// Type-erased component instance. The inner value is always an `Arc<T>`
/// (concrete type or `dyn Trait`), so `downcast` can recover the typed
/// handle without knowing the erasure site.
pub type ErasedInstance = Arc<dyn Any + Send + Sync>;

/// Zero-argument constructor for a component.
pub type ConstructFn = fn() -> Result<ErasedInstance, InstantiationError>;

/// Handler entry point: downcast the owning instance, read bound arguments,
/// optionally return a view result.
pub type InvokeFn =
    fn(&ErasedInstance, &mut CallArgs<'_>) -> Result<Option<ModelAndView>, InvokeError>;

/// Container role of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Keyed by the lower-camel-cased simple type name; may declare routes.
    Controller,
    /// Keyed by explicit name, or by each declared interface name.
    Service,
}

/// A registered component: role, constructor, injectable slots, routes.
pub struct ComponentDef {
    /// Fully-qualified Rust path, e.g. `my_app::services::ClockImpl`.
    pub type_name: &'static str,
    /// `None` units are discovered but never instantiated.
    pub role: Option<Role>,
    /// Explicit service name; takes precedence over interface keying.
    pub service_name: Option<&'static str>,
    /// Constructor used for controllers and explicitly named services.
    pub construct: ConstructFn,
    /// Interface bindings for services without an explicit name. Each entry
    /// stores its own constructor so the instance is erased as that
    /// interface's trait object.
    pub interfaces: &'static [InterfaceBinding],
    pub injects: &'static [InjectSlot],
    /// Type-level route prefix, concatenated before each route's path.
    pub prefix: &'static str,
    pub routes: &'static [RouteDef],
}

/// One service registration under an interface (trait) name.
pub struct InterfaceBinding {
    /// Fully-qualified trait path, e.g. `my_app::services::Clock`.
    pub name: &'static str,
    pub construct: ConstructFn,
}

/// One injectable field of a component.
pub struct InjectSlot {
    /// Explicit lookup name; empty means "fall back to the field type name".
    pub name: &'static str,
    /// Fully-qualified name of the field's declared type.
    pub type_name: &'static str,
    /// Downcasts both erased instances and writes the dependency into the
    /// target's `Inject` cell. Returns false when either downcast fails.
    pub assign: fn(&ErasedInstance, &ErasedInstance) -> bool,
}

/// One routed handler of a controller.
pub struct RouteDef {
    /// Member-level path spec, appended to the component's `prefix` and
    /// compiled with regular-expression semantics.
    pub path: &'static str,
    /// Formal parameters in positional order.
    pub params: &'static [ParamDef],
    pub invoke: InvokeFn,
}

/// Bind source of one handler parameter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamBind {
    /// Bound to the request parameter of this name.
    Query(&'static str),
    /// Bound to the request object.
    Request,
    /// Bound to the response object.
    Response,
    /// Receives no injected value; reads as the zero value at call time.
    Unbound,
}

/// Declared type of one handler parameter position, used by the
/// query-to-argument transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Text,
    Int,
    /// Query values are dropped for this position, no error signaled.
    Other,
}

/// One formal parameter of a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDef {
    pub bind: ParamBind,
    pub ty: ParamType,
}

inventory::collect!(ComponentDef);

/// Where component definitions come from: the link-time inventory or an
/// explicit table (deterministic order, used by tests and embedded setups).
#[derive(Clone, Copy)]
pub enum ComponentSet<'a> {
    Inventory,
    Static(&'a [&'static ComponentDef]),
}

impl ComponentSet<'_> {
    pub fn iter(&self) -> Box<dyn Iterator<Item = &'static ComponentDef> + '_> {
        match self {
            ComponentSet::Inventory => Box::new(inventory::iter::<ComponentDef>.into_iter()),
            ComponentSet::Static(defs) => Box::new(defs.iter().copied()),
        }
    }

    /// Look up a definition by fully-qualified type name.
    pub fn find(&self, type_name: &str) -> Option<&'static ComponentDef> {
        self.iter().find(|def| def.type_name == type_name)
    }
}

/// Erase a typed instance for container storage.
pub fn erase<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> ErasedInstance {
    Arc::new(value)
}

/// Recover the typed handle from an erased instance. Returns `None` when the
/// instance was erased as a different type.
pub fn downcast<T: ?Sized + Send + Sync + 'static>(erased: &ErasedInstance) -> Option<Arc<T>> {
    erased.downcast_ref::<Arc<T>>().cloned()
}

/// `downcast` with the error handlers want for a mismatched route target.
pub fn expect_instance<T: Send + Sync + 'static>(
    erased: &ErasedInstance,
) -> Result<Arc<T>, InvokeError> {
    downcast::<T>(erased).ok_or(InvokeError::WrongInstance {
        expected: std::any::type_name::<T>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Probe {
        value: u32,
    }

    trait Named: Send + Sync {
        fn name(&self) -> &'static str;
    }

    impl Named for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }
    }

    #[test]
    fn erase_and_downcast_concrete() {
        let erased = erase(Arc::new(Probe { value: 7 }));
        let back = downcast::<Probe>(&erased).unwrap();
        assert_eq!(back.value, 7);
    }

    #[test]
    fn erase_and_downcast_trait_object() {
        let erased = erase(Arc::new(Probe { value: 1 }) as Arc<dyn Named>);
        let back = downcast::<dyn Named>(&erased).unwrap();
        assert_eq!(back.name(), "probe");
        // The erasure is keyed by the stored Arc type, not the concrete one.
        assert!(downcast::<Probe>(&erased).is_none());
    }

    #[test]
    fn expect_instance_reports_the_expected_type() {
        let erased = erase(Arc::new(Probe { value: 1 }) as Arc<dyn Named>);
        let err = expect_instance::<Probe>(&erased).unwrap_err();
        assert!(err.to_string().contains("Probe"));
    }
}
