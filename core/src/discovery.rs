//! # Discovery Scopes
//!
//! A scope binds one named filtering policy to a discovery run: the approaches
//! that detect servers, the reporters that publish results, and the acceptor
//! engines deciding what each of them gets to see.
//!
//! Scopes are assembled from configuration by [`ScopeLoader`] and do not change
//! afterwards, apart from [`DiscoveryScope::reset`] clearing per-run state.

use std::sync::Arc;

use scopr_common::Entity;
use scopr_plugins::AcceptorPluginEngine;

use crate::approach::ApproachEngine;
use crate::observer::{Decision, DiscoveryObserver};
use crate::reporter::ReporterEngine;

mod loader;
mod overrides;

pub use loader::{
    load_scope, load_scopes, reporter_acceptor_name, ScopeLoader, APPROACHES_TAG, DEFAULT_FILTERING_PATH, FILTERING_TAG,
    REPORTING_TAG, SCOPES_TAG, SCOPE_TAG,
};
pub use overrides::ScopeOverrides;

#[derive(Debug)]
pub struct DiscoveryScope {
    name: String,
    approaches: ApproachEngine,
    reporters: ReporterEngine,
    acceptors: AcceptorPluginEngine,
    observers: Vec<Arc<dyn DiscoveryObserver>>,
}

impl DiscoveryScope {
    pub fn new(
        name: impl Into<String>,
        approaches: ApproachEngine,
        reporters: ReporterEngine,
        acceptors: AcceptorPluginEngine,
        observers: Vec<Arc<dyn DiscoveryObserver>>,
    ) -> Self {
        Self {
            name: name.into(),
            approaches,
            reporters,
            acceptors,
            observers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn approaches(&self) -> &ApproachEngine {
        &self.approaches
    }

    pub fn reporters(&self) -> &ReporterEngine {
        &self.reporters
    }

    /// The scope's default policy.
    pub fn acceptors(&self) -> &AcceptorPluginEngine {
        &self.acceptors
    }

    /// The policy the named reporter reports under.
    pub fn reporter_engine(&self, reporter: &str) -> Option<&AcceptorPluginEngine> {
        self.reporters.get(reporter).map(|slot| slot.acceptors())
    }

    /// Judges `entity` against the default policy.
    pub fn accepts(&self, entity: &Entity) -> bool {
        let accepted: bool = self.acceptors.accepts(entity);
        self.notify(None, entity, accepted);
        accepted
    }

    /// Judges `entity` for one reporter; `None` when no such reporter exists.
    pub fn accepts_for_reporter(&self, reporter: &str, entity: &Entity) -> Option<bool> {
        let accepted: bool = self.reporter_engine(reporter)?.accepts(entity);
        self.notify(Some(reporter), entity, accepted);
        Some(accepted)
    }

    /// Clears per-run state of every approach and reporter.
    pub fn reset(&mut self) {
        self.approaches.reset();
        self.reporters.reset();
        for observer in &self.observers {
            observer.on_reset(&self.name);
        }
    }

    fn notify(&self, reporter: Option<&str>, entity: &Entity, accepted: bool) {
        if self.observers.is_empty() {
            return;
        }
        let decision = Decision {
            scope: &self.name,
            reporter,
            entity,
            accepted,
        };
        for observer in &self.observers {
            observer.on_decision(&decision);
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
