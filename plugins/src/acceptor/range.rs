use std::any::Any;

use scopr_common::{Entity, Node};

use crate::acceptor::Acceptor;
use crate::range::Range;

/// Filters nodes by address range.
///
/// Exclusions win: a node matched by any exclude range is rejected even when an
/// include range also matches it.
#[derive(Debug, Clone)]
pub struct RangeAcceptor {
    include: Vec<Range>,
    exclude: Vec<Range>,
    role_sensitive: bool,
}

impl RangeAcceptor {
    pub fn new(include: Vec<Range>, exclude: Vec<Range>) -> Self {
        let role_sensitive: bool = include
            .iter()
            .chain(exclude.iter())
            .any(Range::is_role_sensitive);
        Self {
            include,
            exclude,
            role_sensitive,
        }
    }

    pub fn include(&self) -> &[Range] {
        &self.include
    }

    pub fn exclude(&self) -> &[Range] {
        &self.exclude
    }

    /// Some configured range needs the node's role.
    pub fn is_role_sensitive(&self) -> bool {
        self.role_sensitive
    }

    pub fn accepts_node(&self, node: &Node) -> bool {
        !self.exclude.iter().any(|range| range.matches(node))
            && self.include.iter().any(|range| range.matches(node))
    }
}

impl Acceptor for RangeAcceptor {
    fn is_applicable(&self, entity: &Entity) -> bool {
        match entity {
            Entity::Node(node) => node.role.is_some() || !self.role_sensitive,
            Entity::Endpoint(_) => false,
        }
    }

    fn accepts(&self, entity: &Entity) -> bool {
        match entity.as_node() {
            Some(node) => self.accepts_node(node),
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
