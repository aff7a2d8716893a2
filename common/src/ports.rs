//! # Known Ports
//!
//! Contract for the known-ports catalog consulted when resolving service
//! names, plus an in-memory implementation.

use std::collections::BTreeMap;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownPort {
    pub port: u16,
    pub discoverable: bool,
    pub name: String,
}

impl KnownPort {
    pub fn new(port: u16, discoverable: bool, name: impl Into<String>) -> Self {
        Self {
            port,
            discoverable,
            name: name.into(),
        }
    }
}

/// Defines the contract for looking up well-known service ports.
pub trait KnownPorts: Send + Sync {
    /// Every catalog entry, discoverable or not.
    fn list_discoverable_ports(&self) -> Vec<KnownPort>;

    /// Ports registered under `name`; empty when the name is unknown.
    fn ports_for_name(&self, name: &str) -> Vec<u16>;
}

/// A fixed catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct PortCatalog {
    entries: Vec<KnownPort>,
    by_name: BTreeMap<String, Vec<u16>>,
}

impl PortCatalog {
    pub fn new(entries: Vec<KnownPort>) -> Self {
        let mut by_name: BTreeMap<String, Vec<u16>> = BTreeMap::new();
        for entry in &entries {
            let ports = by_name.entry(entry.name.clone()).or_default();
            if !ports.contains(&entry.port) {
                ports.push(entry.port);
            }
        }
        Self { entries, by_name }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<KnownPort> for PortCatalog {
    fn from_iter<I: IntoIterator<Item = KnownPort>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl KnownPorts for PortCatalog {
    fn list_discoverable_ports(&self) -> Vec<KnownPort> {
        self.entries.clone()
    }

    fn ports_for_name(&self, name: &str) -> Vec<u16> {
        self.by_name.get(name).cloned().unwrap_or_default()
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
