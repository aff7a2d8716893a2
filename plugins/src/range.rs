//! # Policy Ranges
//!
//! The range variants acceptors are configured with. Literal ranges wrap a
//! [`RangeSet`]; the outscope variants defer to the domain-scope oracle and only
//! apply to nodes whose role is known.

use std::fmt;
use std::sync::Arc;

use scopr_common::domain::DomainScope;
use scopr_common::{Node, RangeSet};

#[derive(Clone)]
pub enum Range {
    /// Matches every node.
    Wildcard,
    /// Matches nodes whose address is in the set.
    Ip(RangeSet),
    /// Matches clients outside the managed domain.
    OutscopeClients(Arc<dyn DomainScope>),
    /// Matches servers outside the managed domain.
    OutscopeServers(Arc<dyn DomainScope>),
}

impl Range {
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Range::Wildcard => true,
            Range::Ip(ranges) => ranges.contains(node.address),
            Range::OutscopeClients(scope) => {
                node.is_client() && scope.is_out_of_scope(node.address)
            }
            Range::OutscopeServers(scope) => {
                node.is_server() && scope.is_out_of_scope(node.address)
            }
        }
    }

    /// Cannot be evaluated for a node without a role.
    pub fn is_role_sensitive(&self) -> bool {
        matches!(self, Range::OutscopeClients(_) | Range::OutscopeServers(_))
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Range::Wildcard => f.write_str("Wildcard"),
            Range::Ip(ranges) => f.debug_tuple("Ip").field(&ranges.to_string()).finish(),
            Range::OutscopeClients(_) => f.write_str("OutscopeClients"),
            Range::OutscopeServers(_) => f.write_str("OutscopeServers"),
        }
    }
}

impl From<RangeSet> for Range {
    fn from(ranges: RangeSet) -> Self {
        Range::Ip(ranges)
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
