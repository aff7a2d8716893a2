//! # Interface-Derived Ranges
//!
//! Derives the discovering agent's own address and managed ranges from the
//! networks configured on its interfaces.

use std::net::Ipv4Addr;

use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};

use crate::network::range::{AddressRange, CidrRange, RangeSet};

pub trait NetworkInterfaceExtension {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network>;

    /// First non-loopback IPv4 address.
    fn get_agent_ipv4(&self) -> Option<Ipv4Addr>;

    /// Every non-loopback IPv4 network as a CIDR range.
    fn get_managed_ranges(&self) -> RangeSet;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network> {
        self.ips
            .iter()
            .filter_map(|ip| {
                if let IpNetwork::V4(ipv4) = ip {
                    Some(*ipv4)
                } else {
                    None
                }
            })
            .collect()
    }

    fn get_agent_ipv4(&self) -> Option<Ipv4Addr> {
        self.get_ipv4_nets()
            .into_iter()
            .map(|net| net.ip())
            .find(|ip| !ip.is_loopback())
    }

    fn get_managed_ranges(&self) -> RangeSet {
        self.get_ipv4_nets()
            .into_iter()
            .filter(|net| !net.ip().is_loopback())
            .map(|net| AddressRange::Cidr(cidr_from_network(net)))
            .collect()
    }
}

/// `Ipv4Network` already guarantees a prefix of at most 32.
pub fn cidr_from_network(net: Ipv4Network) -> CidrRange {
    CidrRange::new(net.network(), net.prefix()).unwrap_or_else(|_| CidrRange::host(net.ip()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
