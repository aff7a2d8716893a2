//! # Acceptor Builders
//!
//! Turns `filtering` descriptors into acceptors. Each child of a `filtering`
//! element names a plugin (`ranges`, `services`) and carries its own
//! `include`/`exclude` lists; the [`AcceptorRegistry`] maps that name to the
//! builder that understands it.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use scopr_common::config::ConfigNode;
use tracing::{debug, warn};

use crate::acceptor::Acceptor;
use crate::context::DiscoveryContext;
use crate::engine::AcceptorPluginEngine;
use crate::error::{PluginError, PluginKind};

pub mod ranges;
pub mod services;

pub const INCLUDE_TAG: &str = "include";
pub const EXCLUDE_TAG: &str = "exclude";

pub const RANGES_PLUGIN: &str = "ranges";
pub const SERVICES_PLUGIN: &str = "services";

pub type AcceptorFactory =
    fn(&ConfigNode, &DiscoveryContext) -> Result<Arc<dyn Acceptor>, PluginError>;

static STANDARD: OnceLock<AcceptorRegistry> = OnceLock::new();

/// Identifiers of every `list_tag/item_tag` element below `descriptor`.
pub(crate) fn collect_identifiers(
    descriptor: &ConfigNode,
    list_tag: &str,
    item_tag: &str,
) -> Result<Vec<String>, PluginError> {
    let mut identifiers: Vec<String> = Vec::new();
    for list in descriptor.elements_named(list_tag) {
        for item in list.elements_named(item_tag) {
            let identifier: &str = item
                .identifier()
                .ok_or_else(|| PluginError::MissingAttribute {
                    tag: item_tag.to_string(),
                    attribute: "name or text",
                })?;
            identifiers.push(identifier.to_string());
        }
    }
    Ok(identifiers)
}

/// Name-keyed acceptor builders.
#[derive(Debug, Clone)]
pub struct AcceptorRegistry {
    factories: BTreeMap<String, AcceptorFactory>,
}

impl AcceptorRegistry {
    /// The built-in `ranges` and `services` acceptors, registered once.
    pub fn standard() -> &'static AcceptorRegistry {
        STANDARD.get_or_init(|| {
            Self::from_entries([
                (RANGES_PLUGIN, ranges::build as AcceptorFactory),
                (SERVICES_PLUGIN, services::build as AcceptorFactory),
            ])
        })
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, AcceptorFactory)>) -> Self {
        Self {
            factories: entries
                .into_iter()
                .map(|(name, factory)| (name.to_string(), factory))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<AcceptorFactory> {
        self.factories.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Builds the acceptor named by the descriptor's tag.
    pub fn build(
        &self,
        descriptor: &ConfigNode,
        ctx: &DiscoveryContext,
    ) -> Result<Arc<dyn Acceptor>, PluginError> {
        let factory: AcceptorFactory = self
            .get(&descriptor.tag)
            .ok_or_else(|| PluginError::unknown(PluginKind::Acceptor, &descriptor.tag))?;
        factory(descriptor, ctx)
    }

    /// One acceptor per child of `filtering`.
    ///
    /// Unknown plugin names are logged and skipped; any other error aborts.
    pub fn build_engine(
        &self,
        filtering: &ConfigNode,
        ctx: &DiscoveryContext,
    ) -> Result<AcceptorPluginEngine, PluginError> {
        let mut engine = AcceptorPluginEngine::new();

        for descriptor in filtering.elements() {
            match self.build(descriptor, ctx) {
                Ok(acceptor) => {
                    engine.insert(descriptor.tag.clone(), acceptor);
                }
                Err(e) if e.is_unknown_plugin() => {
                    warn!(plugin = %descriptor.tag, "skipping unknown acceptor plugin");
                }
                Err(e) => return Err(e),
            }
        }

        debug!(acceptors = engine.len(), "built acceptor engine");
        Ok(engine)
    }
}

impl Default for AcceptorRegistry {
    fn default() -> Self {
        Self::standard().clone()
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
