//! Application context
//!
//! `AppContext::boot` runs the whole single-threaded startup sequence:
//! scan, instantiate, inject, build the route table and bind maps, list the
//! templates. It yields an immutable context the server shares across
//! request tasks by reference. There is no global container: everything the
//! request path needs travels inside the context.

use std::sync::Arc;

use tracing::info;

use crate::component::registry;
use crate::component::ComponentSet;
use crate::config::{Config, PACKAGE_SCAN, TEMPLATE_ROOT};
use crate::container::Container;
use crate::dispatch::Dispatcher;
use crate::error::StartupError;
use crate::routing::RouteTable;
use crate::view::TemplateRegistry;

/// Everything built at startup, read-only afterwards.
pub struct AppContext {
    config: Config,
    container: Container,
    dispatcher: Dispatcher,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Boot from the link-time component inventory.
    pub fn boot(config: Config) -> Result<Self, StartupError> {
        Self::boot_with(ComponentSet::Inventory, config)
    }

    /// Boot from an explicit component table. Any failure here prevents the
    /// framework from serving a single request.
    pub fn boot_with(set: ComponentSet<'_>, config: Config) -> Result<Self, StartupError> {
        let namespace = config.require(PACKAGE_SCAN)?;
        let descriptors = registry::scan(&set, namespace)?;
        let container = Container::build(&set, descriptors)?;
        container.inject();

        let routes = RouteTable::build(&container)?;
        let templates = TemplateRegistry::from_dir(config.require(TEMPLATE_ROOT)?)?;
        info!(
            components = container.len(),
            routes = routes.len(),
            templates = templates.len(),
            "container initialized"
        );

        Ok(Self {
            dispatcher: Dispatcher::new(routes, templates),
            container,
            config,
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, DiscoveryError};

    #[test]
    fn boot_requires_package_scan() {
        let config = Config::parse("templateRoot=templates\n");
        let err = AppContext::boot_with(ComponentSet::Static(&[]), config).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Config(ConfigError::Missing("packageScan"))
        ));
    }

    #[test]
    fn boot_fails_on_empty_namespace() {
        let config = Config::parse("packageScan=ghost_ns\ntemplateRoot=templates\n");
        let err = AppContext::boot_with(ComponentSet::Static(&[]), config).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Discovery(DiscoveryError { .. })
        ));
    }
}
