//! # Domain Scope
//!
//! Contract for the oracle that knows which addresses lie outside the
//! administratively managed ranges.

use std::net::IpAddr;

use crate::network::range::RangeSet;

/// Answers whether an address is outside the managed domain.
pub trait DomainScope: Send + Sync {
    fn is_out_of_scope(&self, address: IpAddr) -> bool;
}

/// Treats everything outside a fixed [`RangeSet`] as out of scope.
#[derive(Debug, Clone, Default)]
pub struct RangeDomainScope {
    managed: RangeSet,
}

impl RangeDomainScope {
    pub fn new(managed: RangeSet) -> Self {
        Self { managed }
    }

    pub fn managed(&self) -> &RangeSet {
        &self.managed
    }
}

impl DomainScope for RangeDomainScope {
    fn is_out_of_scope(&self, address: IpAddr) -> bool {
        !self.managed.contains(address)
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
