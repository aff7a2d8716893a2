use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};

use scopr_common::Entity;

use crate::acceptor::Acceptor;

/// Ports selected by a services filter, optionally including every port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortSet {
    any: bool,
    ports: BTreeSet<u16>,
}

impl PortSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wildcard() -> Self {
        Self {
            any: true,
            ports: BTreeSet::new(),
        }
    }

    pub fn insert(&mut self, port: u16) {
        self.ports.insert(port);
    }

    pub fn insert_wildcard(&mut self) {
        self.any = true;
    }

    pub fn is_wildcard(&self) -> bool {
        self.any
    }

    pub fn ports(&self) -> &BTreeSet<u16> {
        &self.ports
    }

    pub fn contains(&self, port: u16) -> bool {
        self.any || self.ports.contains(&port)
    }

    pub fn is_empty(&self) -> bool {
        !self.any && self.ports.is_empty()
    }
}

impl FromIterator<u16> for PortSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self {
            any: false,
            ports: iter.into_iter().collect(),
        }
    }
}

/// Filters listening endpoints of server nodes by port.
#[derive(Debug, Clone, Default)]
pub struct ServiceAcceptor {
    include: PortSet,
    exclude: PortSet,
    port_names: BTreeMap<u16, BTreeSet<String>>,
}

impl ServiceAcceptor {
    pub fn new(
        include: PortSet,
        exclude: PortSet,
        port_names: BTreeMap<u16, BTreeSet<String>>,
    ) -> Self {
        Self {
            include,
            exclude,
            port_names,
        }
    }

    pub fn include(&self) -> &PortSet {
        &self.include
    }

    pub fn exclude(&self) -> &PortSet {
        &self.exclude
    }

    /// Names of the configured services that resolved to `port`.
    pub fn include_port_names(&self, port: u16) -> Option<&BTreeSet<String>> {
        self.port_names.get(&port)
    }

    pub fn accepts_port(&self, port: u16) -> bool {
        !self.exclude.contains(port) && self.include.contains(port)
    }
}

impl Acceptor for ServiceAcceptor {
    fn is_applicable(&self, entity: &Entity) -> bool {
        entity
            .as_endpoint()
            .is_some_and(|endpoint| endpoint.node.is_server())
    }

    fn accepts(&self, entity: &Entity) -> bool {
        match entity.as_endpoint() {
            Some(endpoint) => self.accepts_port(endpoint.port),
            None => true,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
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
