//! # Reporters
//!
//! A reporter publishes part of the discovered topology. Each configured
//! reporter gets its own acceptor engine, usually a narrowing of the scope's
//! default policy.

use std::fmt;

use scopr_common::config::ConfigNode;
use scopr_common::Entity;
use scopr_plugins::{AcceptorPluginEngine, DiscoveryContext, PluginError};

pub const REPORTER_TAG: &str = "reporter";

pub trait Reporter: Send + Sync + fmt::Debug {
    /// Drops whatever was collected for the previous run.
    fn reset(&mut self);
}

pub type ReporterFactory =
    fn(&ConfigNode, &DiscoveryContext) -> Result<Box<dyn Reporter>, PluginError>;

/// A configured reporter and the policy it reports under.
#[derive(Debug)]
pub struct ReporterSlot {
    name: String,
    reporter: Box<dyn Reporter>,
    acceptors: AcceptorPluginEngine,
}

impl ReporterSlot {
    pub fn new(
        name: impl Into<String>,
        reporter: Box<dyn Reporter>,
        acceptors: AcceptorPluginEngine,
    ) -> Self {
        Self {
            name: name.into(),
            reporter,
            acceptors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }

    pub fn acceptors(&self) -> &AcceptorPluginEngine {
        &self.acceptors
    }

    pub(crate) fn acceptors_mut(&mut self) -> &mut AcceptorPluginEngine {
        &mut self.acceptors
    }

    pub fn accepts(&self, entity: &Entity) -> bool {
        self.acceptors.accepts(entity)
    }
}

/// The reporters of a scope, in configuration order.
#[derive(Debug, Default)]
pub struct ReporterEngine {
    slots: Vec<ReporterSlot>,
}

impl ReporterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a slot, replacing an earlier one with the same name.
    pub fn push(&mut self, slot: ReporterSlot) {
        match self.slots.iter_mut().find(|existing| existing.name == slot.name) {
            Some(existing) => *existing = slot,
            None => self.slots.push(slot),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ReporterSlot> {
        self.slots.iter().find(|slot| slot.name == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut ReporterSlot> {
        self.slots.iter_mut().find(|slot| slot.name == name)
    }

    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.reporter.reset();
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(ReporterSlot::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReporterSlot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
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

#[cfg(test)]
mod tests {
    use super::*;
    use scopr_common::{Node, RangeSet};
    use scopr_plugins::{Range, RangeAcceptor};
    use std::net::IpAddr;
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct Buffer {
        lines: Vec<String>,
    }

    impl Reporter for Buffer {
        fn reset(&mut self) {
            self.lines.clear();
        }
    }

    fn engine(spec: &str) -> AcceptorPluginEngine {
        let ranges = RangeSet::parse(spec).unwrap();
        AcceptorPluginEngine::new().with("ranges", Arc::new(RangeAcceptor::new(vec![Range::Ip(ranges)], vec![])))
    }

    fn node(s: &str) -> Entity {
        let addr: IpAddr = s.parse().unwrap();
        Entity::Node(Node::server(addr))
    }

    #[test]
    fn slots_judge_with_their_own_engine() {
        let mut reporters = ReporterEngine::new();
        reporters.push(ReporterSlot::new("cmdb", Box::new(Buffer::default()), engine("10.0.0.0/8")));
        reporters.push(ReporterSlot::new("audit", Box::new(Buffer::default()), engine("192.168.0.0/16")));

        assert_eq!(reporters.names().collect::<Vec<_>>(), vec!["cmdb", "audit"]);
        let cmdb = reporters.get("cmdb").unwrap();
        assert!(cmdb.accepts(&node("10.1.1.1")));
        assert!(!cmdb.accepts(&node("192.168.1.1")));
        assert!(reporters.get("audit").unwrap().accepts(&node("192.168.1.1")));
    }

    #[test]
    fn same_name_replaces() {
        let mut reporters = ReporterEngine::new();
        reporters.push(ReporterSlot::new("cmdb", Box::new(Buffer::default()), engine("10.0.0.0/8")));
        reporters.push(ReporterSlot::new("cmdb", Box::new(Buffer::default()), engine("11.0.0.0/8")));
        assert_eq!(reporters.len(), 1);
        assert!(reporters.get("cmdb").unwrap().accepts(&node("11.0.0.1")));
    }

    #[test]
    fn reset_clears_reporters() {
        let mut reporters = ReporterEngine::new();
        let buffer = Buffer {
            lines: vec!["10.0.0.1".to_string()],
        };
        reporters.push(ReporterSlot::new("cmdb", Box::new(buffer), AcceptorPluginEngine::new()));
        reporters.reset();
        assert!(format!("{:?}", reporters.get("cmdb").unwrap().reporter()).contains("lines: []"));
    }
}
