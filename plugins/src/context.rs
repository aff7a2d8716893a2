//! # Discovery Context
//!
//! Run-time facts the builders need: who the agent is, which ranges it manages,
//! and the two external collaborators.

use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;

use pnet::datalink::NetworkInterface;
use scopr_common::domain::DomainScope;
use scopr_common::network::interface::NetworkInterfaceExtension;
use scopr_common::ports::KnownPorts;
use scopr_common::RangeSet;

#[derive(Clone)]
pub struct DiscoveryContext {
    agent_address: Ipv4Addr,
    managed_ranges: RangeSet,
    known_ports: Arc<dyn KnownPorts>,
    domain_scope: Arc<dyn DomainScope>,
}

impl DiscoveryContext {
    pub fn new(
        agent_address: Ipv4Addr,
        managed_ranges: RangeSet,
        known_ports: Arc<dyn KnownPorts>,
        domain_scope: Arc<dyn DomainScope>,
    ) -> Self {
        Self {
            agent_address,
            managed_ranges,
            known_ports,
            domain_scope,
        }
    }

    /// Takes the agent address and managed ranges from `iface`.
    ///
    /// Returns `None` when the interface has no usable IPv4 address.
    pub fn from_interface(
        iface: &NetworkInterface,
        known_ports: Arc<dyn KnownPorts>,
        domain_scope: Arc<dyn DomainScope>,
    ) -> Option<Self> {
        let agent_address: Ipv4Addr = iface.get_agent_ipv4()?;
        Some(Self::new(
            agent_address,
            iface.get_managed_ranges(),
            known_ports,
            domain_scope,
        ))
    }

    pub fn agent_address(&self) -> Ipv4Addr {
        self.agent_address
    }

    pub fn managed_ranges(&self) -> &RangeSet {
        &self.managed_ranges
    }

    pub fn known_ports(&self) -> &dyn KnownPorts {
        self.known_ports.as_ref()
    }

    pub fn domain_scope(&self) -> &Arc<dyn DomainScope> {
        &self.domain_scope
    }
}

impl fmt::Debug for DiscoveryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryContext")
            .field("agent_address", &self.agent_address)
            .field("managed_ranges", &self.managed_ranges.to_string())
            .finish_non_exhaustive()
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
