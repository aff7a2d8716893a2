//! # Plugin Registries
//!
//! Name-keyed factory tables for the three plugin kinds a scope refers to.

use std::collections::BTreeMap;

use scopr_plugins::{AcceptorRegistry, PluginError, PluginKind};

use crate::approach::ApproachFactory;
use crate::reporter::ReporterFactory;

#[derive(Debug, Clone)]
pub struct PluginRegistry<F> {
    kind: PluginKind,
    factories: BTreeMap<String, F>,
}

impl<F: Copy> PluginRegistry<F> {
    pub fn new(kind: PluginKind) -> Self {
        Self {
            kind,
            factories: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, factory: F) -> Self {
        self.register(name, factory);
        self
    }

    pub fn register(&mut self, name: impl Into<String>, factory: F) -> Option<F> {
        self.factories.insert(name.into(), factory)
    }

    pub fn get(&self, name: &str) -> Result<F, PluginError> {
        self.factories
            .get(name)
            .copied()
            .ok_or_else(|| PluginError::unknown(self.kind, name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn kind(&self) -> PluginKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// Everything a scope can be assembled from.
///
/// Acceptors default to the built-in `ranges` and `services` plugins; approaches
/// and reporters are registered by the host application.
#[derive(Debug, Clone)]
pub struct PluginCatalog {
    pub acceptors: AcceptorRegistry,
    pub approaches: PluginRegistry<ApproachFactory>,
    pub reporters: PluginRegistry<ReporterFactory>,
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_approach(mut self, name: impl Into<String>, factory: ApproachFactory) -> Self {
        self.approaches.register(name, factory);
        self
    }

    pub fn with_reporter(mut self, name: impl Into<String>, factory: ReporterFactory) -> Self {
        self.reporters.register(name, factory);
        self
    }

    pub fn with_acceptors(mut self, acceptors: AcceptorRegistry) -> Self {
        self.acceptors = acceptors;
        self
    }
}

impl Default for PluginCatalog {
    fn default() -> Self {
        Self {
            acceptors: AcceptorRegistry::standard().clone(),
            approaches: PluginRegistry::new(PluginKind::Approach),
            reporters: PluginRegistry::new(PluginKind::Reporter),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
