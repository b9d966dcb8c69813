//! Service container for dependency injection
//!
//! Wires the resolver up with its dependencies.

use std::sync::Arc;

use crate::application::services::ArgResolver;
use crate::config::Settings;
use crate::infrastructure::traits::{ArgParser, Environment, ProcessArgParser, ProcessEnvironment};

/// Container holding the application services.
pub struct ServiceContainer {
    resolver: ArgResolver,
}

impl ServiceContainer {
    /// Create a new service container reading the live process environment and argv.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(ProcessEnvironment),
            Arc::new(ProcessArgParser::new()),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        env: Arc<dyn Environment>,
        args: Arc<dyn ArgParser>,
    ) -> Self {
        Self {
            resolver: ArgResolver::new(env, args, Arc::new(settings)),
        }
    }

    pub fn resolver(&self) -> &ArgResolver {
        &self.resolver
    }
}
