//! Builds [`ServiceAcceptor`]s from service identifiers.
//!
//! An identifier is resolved to ports in this order:
//! * `*`: every port.
//! * `known_services`: every discoverable port of the known-ports catalog.
//! * digits: that literal port.
//! * anything else: the catalog's name lookup (possibly nothing).

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use scopr_common::config::ConfigNode;
use scopr_common::ports::KnownPorts;
use tracing::{debug, warn};

use crate::acceptor::{Acceptor, PortSet, ServiceAcceptor};
use crate::builder::{collect_identifiers, EXCLUDE_TAG, INCLUDE_TAG};
use crate::context::DiscoveryContext;
use crate::error::PluginError;

pub const SERVICE_TAG: &str = "service";
pub const WILDCARD: &str = "*";
pub const KNOWN_SERVICES: &str = "known_services";

/// What one identifier resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Resolved {
    Any,
    Port { port: u16, name: Option<String> },
}

#[derive(Debug, Clone, Default)]
pub struct ServicesAcceptorBuilder {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl ServicesAcceptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `include/service` and `exclude/service` identifiers.
    pub fn from_config(descriptor: &ConfigNode) -> Result<Self, PluginError> {
        Ok(Self {
            include: collect_identifiers(descriptor, INCLUDE_TAG, SERVICE_TAG)?,
            exclude: collect_identifiers(descriptor, EXCLUDE_TAG, SERVICE_TAG)?,
        })
    }

    pub fn include(mut self, identifier: impl Into<String>) -> Self {
        self.include.push(identifier.into());
        self
    }

    pub fn exclude(mut self, identifier: impl Into<String>) -> Self {
        self.exclude.push(identifier.into());
        self
    }

    pub fn build(&self, ctx: &DiscoveryContext) -> ServiceAcceptor {
        let catalog: &dyn KnownPorts = ctx.known_ports();
        let mut include = PortSet::new();
        let mut exclude = PortSet::new();
        let mut port_names: BTreeMap<u16, BTreeSet<String>> = BTreeMap::new();

        for identifier in &self.include {
            for resolved in resolve(identifier, catalog) {
                match resolved {
                    Resolved::Any => include.insert_wildcard(),
                    Resolved::Port { port, name } => {
                        include.insert(port);
                        if let Some(name) = name {
                            port_names.entry(port).or_default().insert(name);
                        }
                    }
                }
            }
        }

        for identifier in &self.exclude {
            for resolved in resolve(identifier, catalog) {
                match resolved {
                    Resolved::Any => exclude.insert_wildcard(),
                    Resolved::Port { port, .. } => exclude.insert(port),
                }
            }
        }

        debug!(
            include = include.ports().len(),
            include_any = include.is_wildcard(),
            exclude = exclude.ports().len(),
            "built services acceptor"
        );

        ServiceAcceptor::new(include, exclude, port_names)
    }
}

/// Registry entry for the `services` acceptor.
pub fn build(descriptor: &ConfigNode, ctx: &DiscoveryContext) -> Result<Arc<dyn Acceptor>, PluginError> {
    let builder = ServicesAcceptorBuilder::from_config(descriptor)?;
    Ok(Arc::new(builder.build(ctx)))
}

fn resolve(identifier: &str, catalog: &dyn KnownPorts) -> Vec<Resolved> {
    let identifier: &str = identifier.trim();

    let resolved: Vec<Resolved> = if identifier == WILDCARD {
        vec![Resolved::Any]
    } else if identifier == KNOWN_SERVICES {
        catalog
            .list_discoverable_ports()
            .into_iter()
            .filter(|entry| entry.discoverable)
            .map(|entry| Resolved::Port {
                port: entry.port,
                name: Some(entry.name),
            })
            .collect()
    } else if let Some(port) = parse_port(identifier) {
        vec![Resolved::Port { port, name: None }]
    } else {
        catalog
            .ports_for_name(identifier)
            .into_iter()
            .map(|port| Resolved::Port {
                port,
                name: Some(identifier.to_string()),
            })
            .collect()
    };

    if resolved.is_empty() {
        warn!(service = identifier, "service identifier resolved to no ports, dropping it");
    }

    resolved
}

/// A bare decimal port; signs and whitespace are not digits.
fn parse_port(identifier: &str) -> Option<u16> {
    if identifier.is_empty() || !identifier.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    identifier.parse().ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
