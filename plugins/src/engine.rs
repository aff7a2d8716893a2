//! # Acceptor Plugin Engine
//!
//! A named collection of acceptors combined by conjunction: an entity is
//! accepted unless some acceptor that applies to it says no.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use scopr_common::Entity;
use tracing::trace;

use crate::acceptor::{Acceptor, ServiceAcceptor};

#[derive(Debug, Clone, Default)]
pub struct AcceptorPluginEngine {
    acceptors: BTreeMap<String, Arc<dyn Acceptor>>,
}

impl AcceptorPluginEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, acceptor: Arc<dyn Acceptor>) -> Self {
        self.insert(name, acceptor);
        self
    }

    /// Adds or replaces the acceptor registered under `name`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        acceptor: Arc<dyn Acceptor>,
    ) -> Option<Arc<dyn Acceptor>> {
        self.acceptors.insert(name.into(), acceptor)
    }

    /// Conjunction over every applicable acceptor. An empty engine accepts everything.
    pub fn accepts(&self, entity: &Entity) -> bool {
        for (name, acceptor) in &self.acceptors {
            if acceptor.is_applicable(entity) && !acceptor.accepts(entity) {
                trace!(acceptor = %name, entity = %entity, "entity rejected");
                return false;
            }
        }
        true
    }

    /// A new engine holding only the named acceptors that exist here.
    pub fn subset<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let acceptors: BTreeMap<String, Arc<dyn Acceptor>> = names
            .iter()
            .filter_map(|name| {
                self.acceptors
                    .get_key_value(name.as_ref())
                    .map(|(key, acceptor)| (key.clone(), Arc::clone(acceptor)))
            })
            .collect();
        Self { acceptors }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Acceptor>> {
        self.acceptors.get(name)
    }

    /// The acceptor under `name`, if it is a `T`.
    pub fn get_as<T: Acceptor + 'static>(&self, name: &str) -> Option<&T> {
        self.get(name)?.as_any().downcast_ref::<T>()
    }

    /// Service names configured for `port` across every services acceptor.
    pub fn include_port_names(&self, port: u16) -> BTreeSet<String> {
        self.acceptors
            .values()
            .filter_map(|acceptor| acceptor.as_any().downcast_ref::<ServiceAcceptor>())
            .filter_map(|services| services.include_port_names(port))
            .flatten()
            .cloned()
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.acceptors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Acceptor>)> {
        self.acceptors
            .iter()
            .map(|(name, acceptor)| (name.as_str(), acceptor))
    }

    pub fn len(&self) -> usize {
        self.acceptors.len()
    }

    /// Callers substitute a default policy when this is true.
    pub fn is_empty(&self) -> bool {
        self.acceptors.is_empty()
    }
}

impl FromIterator<(String, Arc<dyn Acceptor>)> for AcceptorPluginEngine {
    fn from_iter<I: IntoIterator<Item = (String, Arc<dyn Acceptor>)>>(iter: I) -> Self {
        Self {
            acceptors: iter.into_iter().collect(),
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
