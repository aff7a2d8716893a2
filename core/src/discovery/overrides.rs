use std::collections::BTreeMap;
use std::sync::Arc;

use scopr_plugins::Acceptor;

/// Acceptors the caller forces onto loaded scopes, replacing configured ones
/// with the same name.
#[derive(Debug, Clone, Default)]
pub struct ScopeOverrides {
    acceptors: BTreeMap<String, Arc<dyn Acceptor>>,
    reporters: BTreeMap<String, BTreeMap<String, Arc<dyn Acceptor>>>,
}

impl ScopeOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides an acceptor of the default policy.
    pub fn with_acceptor(mut self, name: impl Into<String>, acceptor: Arc<dyn Acceptor>) -> Self {
        self.acceptors.insert(name.into(), acceptor);
        self
    }

    /// Overrides an acceptor of one reporter's policy.
    pub fn with_reporter_acceptor(
        mut self,
        reporter: impl Into<String>,
        name: impl Into<String>,
        acceptor: Arc<dyn Acceptor>,
    ) -> Self {
        self.reporters
            .entry(reporter.into())
            .or_default()
            .insert(name.into(), acceptor);
        self
    }

    pub fn acceptors(&self) -> &BTreeMap<String, Arc<dyn Acceptor>> {
        &self.acceptors
    }

    pub fn reporters(&self) -> &BTreeMap<String, BTreeMap<String, Arc<dyn Acceptor>>> {
        &self.reporters
    }

    pub fn is_empty(&self) -> bool {
        self.acceptors.is_empty() && self.reporters.is_empty()
    }
}
