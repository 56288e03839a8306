//! Route table
//!
//! Built once at startup from every controller-role entry in the container:
//! the type-level prefix and each route's path spec are concatenated and
//! compiled as an anchored regular expression, so `.` and friends keep their
//! regex meaning and a match must cover the entire request path. Entries are
//! kept in registration order (container insertion order, then declared
//! route order) and the first match wins; overlapping patterns are allowed.

pub mod bind;

pub use bind::BindMap;

use regex::Regex;
use tracing::info;

use crate::component::{ErasedInstance, Role, RouteDef};
use crate::container::Container;
use crate::error::RouteError;

/// One dispatchable route: compiled pattern, owning instance (shared with
/// the container), handler definition and precomputed bind map.
pub struct Route {
    pattern: Regex,
    raw: String,
    instance: ErasedInstance,
    def: &'static RouteDef,
    bind: BindMap,
}

impl Route {
    /// Full-path match, `Matcher.matches` style.
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }

    /// The textual prefix+path pattern this route was compiled from.
    pub fn pattern(&self) -> &str {
        &self.raw
    }

    pub fn instance(&self) -> &ErasedInstance {
        &self.instance
    }

    pub fn def(&self) -> &'static RouteDef {
        self.def
    }

    pub fn bind(&self) -> &BindMap {
        &self.bind
    }
}

/// Immutable, ordered collection of routes.
pub struct RouteTable {
    routes: Vec<Route>,
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTable").finish_non_exhaustive()
    }
}

impl RouteTable {
    pub fn build(container: &Container) -> Result<Self, RouteError> {
        let mut routes = Vec::new();
        for (key, entry) in container.iter() {
            if entry.def.role != Some(Role::Controller) {
                continue;
            }
            for def in entry.def.routes {
                let raw = format!("{}{}", entry.def.prefix, def.path);
                let pattern =
                    Regex::new(&format!("^(?:{raw})$")).map_err(|source| RouteError::Pattern {
                        pattern: raw.clone(),
                        source,
                    })?;
                info!(pattern = %raw, controller = key, "mapped route");
                routes.push(Route {
                    pattern,
                    raw,
                    instance: entry.instance.clone(),
                    def,
                    bind: BindMap::build(def.params),
                });
            }
        }
        Ok(Self { routes })
    }

    /// First route whose pattern covers the entire path, in registration
    /// order.
    pub fn matched(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::registry::scan;
    use crate::component::{erase, ComponentDef, ComponentSet, ErasedInstance, InvokeFn};
    use crate::dispatch::CallArgs;
    use crate::error::{InstantiationError, InvokeError};
    use crate::view::ModelAndView;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    struct Pages;

    fn construct_pages() -> Result<ErasedInstance, InstantiationError> {
        Ok(erase(Arc::new(Pages)))
    }

    fn invoke_noop(
        _instance: &ErasedInstance,
        _args: &mut CallArgs<'_>,
    ) -> Result<Option<ModelAndView>, InvokeError> {
        Ok(None)
    }

    const NOOP: InvokeFn = invoke_noop;

    static PAGES: ComponentDef = ComponentDef {
        type_name: "routing_test::Pages",
        role: Some(Role::Controller),
        service_name: None,
        construct: construct_pages,
        interfaces: &[],
        injects: &[],
        prefix: "/web",
        routes: &[
            RouteDef {
                path: "/hel.o.json",
                params: &[],
                invoke: NOOP,
            },
            RouteDef {
                path: "/hello.json",
                params: &[],
                invoke: NOOP,
            },
        ],
    };

    static BAD_PATTERN: ComponentDef = ComponentDef {
        type_name: "routing_test::Broken",
        role: Some(Role::Controller),
        service_name: None,
        construct: construct_pages,
        interfaces: &[],
        injects: &[],
        prefix: "/web",
        routes: &[RouteDef {
            path: "/(unclosed",
            params: &[],
            invoke: NOOP,
        }],
    };

    fn table(defs: &[&'static ComponentDef]) -> Result<RouteTable, RouteError> {
        let set = ComponentSet::Static(defs);
        let descriptors = scan(&set, "routing_test").unwrap();
        let container = Container::build(&set, descriptors).unwrap();
        RouteTable::build(&container)
    }

    #[test]
    fn prefix_and_path_are_concatenated() {
        let table = table(&[&PAGES]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().next().unwrap().pattern(), "/web/hel.o.json");
    }

    #[test]
    fn match_covers_the_entire_path() {
        let table = table(&[&PAGES]).unwrap();
        assert!(table.matched("/web/hello.json").is_some());
        assert!(table.matched("/web/hello.json/extra").is_none());
        assert!(table.matched("/prefix/web/hello.json").is_none());
    }

    #[test]
    fn dot_keeps_its_regex_meaning() {
        let table = table(&[&PAGES]).unwrap();
        // "/web/hel.o.json" matches "/web/helLoXjson" via the two dots.
        let matched = table.matched("/web/helLoXjson").unwrap();
        assert_eq!(matched.pattern(), "/web/hel.o.json");
    }

    #[test]
    fn first_registered_route_wins_overlap() {
        let table = table(&[&PAGES]).unwrap();
        // "/web/hel.o.json" also covers "/web/hello.json" but was registered
        // first, so it pre-empts the literal route.
        let matched = table.matched("/web/hello.json").unwrap();
        assert_eq!(matched.pattern(), "/web/hel.o.json");
    }

    #[test]
    fn invalid_pattern_is_fatal() {
        let err = table(&[&BAD_PATTERN]).unwrap_err();
        assert!(err.to_string().contains("/web/(unclosed"));
    }
}
