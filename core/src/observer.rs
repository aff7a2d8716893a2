//! # Discovery Observers
//!
//! Hooks notified of every filtering decision a scope makes.

use std::fmt;

use scopr_common::Entity;
use tracing::debug;

/// One filtering decision.
#[derive(Debug, Clone, Copy)]
pub struct Decision<'a> {
    pub scope: &'a str,
    /// `None` for the scope's default policy.
    pub reporter: Option<&'a str>,
    pub entity: &'a Entity,
    pub accepted: bool,
}

pub trait DiscoveryObserver: Send + Sync + fmt::Debug {
    fn on_decision(&self, decision: &Decision<'_>);

    fn on_reset(&self, _scope: &str) {}
}

/// Logs every decision at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DiscoveryObserver for TracingObserver {
    fn on_decision(&self, decision: &Decision<'_>) {
        debug!(
            scope = decision.scope,
            reporter = decision.reporter.unwrap_or("-"),
            entity = %decision.entity,
            accepted = decision.accepted,
            "filtering decision"
        );
    }

    fn on_reset(&self, scope: &str) {
        debug!(scope, "scope reset");
    }
}
