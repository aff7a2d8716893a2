//! Builds [`RangeAcceptor`]s from range identifiers.
//!
//! Symbolic names resolve through a fixed table of context-derived ranges;
//! everything else is range grammar text.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use scopr_common::config::ConfigNode;
use scopr_common::{GrammarError, RangeSet};
use tracing::debug;

use crate::acceptor::{Acceptor, RangeAcceptor};
use crate::builder::{collect_identifiers, EXCLUDE_TAG, INCLUDE_TAG};
use crate::context::DiscoveryContext;
use crate::error::PluginError;
use crate::range::Range;

pub const RANGE_TAG: &str = "range";

pub const PROBE_RANGES: &str = "probe_ranges";
pub const DDM_RELATED_CONNECTIONS: &str = "ddm_related_connections";
pub const OUTSCOPE_CLIENTS: &str = "outscope_clients";
pub const OUTSCOPE_SERVERS: &str = "outscope_servers";
pub const ANY_RANGE: &str = "*";

pub type RangeFactory = fn(&DiscoveryContext) -> Range;

static SYMBOLIC_RANGES: OnceLock<HashMap<&'static str, RangeFactory>> = OnceLock::new();

/// The symbolic range table, built once on first use.
fn symbolic_ranges() -> &'static HashMap<&'static str, RangeFactory> {
    SYMBOLIC_RANGES.get_or_init(|| {
        let entries: [(&'static str, RangeFactory); 5] = [
            (PROBE_RANGES, probe_ranges),
            (DDM_RELATED_CONNECTIONS, agent_address),
            (OUTSCOPE_CLIENTS, outscope_clients),
            (OUTSCOPE_SERVERS, outscope_servers),
            (ANY_RANGE, wildcard),
        ];
        HashMap::from(entries)
    })
}

fn wildcard(_ctx: &DiscoveryContext) -> Range {
    Range::Wildcard
}

fn probe_ranges(ctx: &DiscoveryContext) -> Range {
    Range::Ip(ctx.managed_ranges().clone())
}

fn agent_address(ctx: &DiscoveryContext) -> Range {
    Range::Ip(RangeSet::single(ctx.agent_address()))
}

fn outscope_clients(ctx: &DiscoveryContext) -> Range {
    Range::OutscopeClients(Arc::clone(ctx.domain_scope()))
}

fn outscope_servers(ctx: &DiscoveryContext) -> Range {
    Range::OutscopeServers(Arc::clone(ctx.domain_scope()))
}

/// Resolves one identifier: symbolic name first, range grammar otherwise.
pub fn resolve_range(identifier: &str, ctx: &DiscoveryContext) -> Result<Range, GrammarError> {
    let identifier: &str = identifier.trim();
    match symbolic_ranges().get(identifier) {
        Some(factory) => Ok(factory(ctx)),
        None => Ok(Range::Ip(RangeSet::parse(identifier)?)),
    }
}

pub fn is_symbolic(identifier: &str) -> bool {
    symbolic_ranges().contains_key(identifier.trim())
}

#[derive(Debug, Clone, Default)]
pub struct RangeAcceptorBuilder {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl RangeAcceptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `include/range` and `exclude/range` identifiers.
    pub fn from_config(descriptor: &ConfigNode) -> Result<Self, PluginError> {
        Ok(Self {
            include: collect_identifiers(descriptor, INCLUDE_TAG, RANGE_TAG)?,
            exclude: collect_identifiers(descriptor, EXCLUDE_TAG, RANGE_TAG)?,
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

    /// Without include ranges the agent's own managed ranges are included.
    pub fn build(&self, ctx: &DiscoveryContext) -> Result<RangeAcceptor, GrammarError> {
        let include: Vec<Range> = if self.include.is_empty() {
            vec![probe_ranges(ctx)]
        } else {
            self.include
                .iter()
                .map(|identifier| resolve_range(identifier, ctx))
                .collect::<Result<_, _>>()?
        };

        let exclude: Vec<Range> = self
            .exclude
            .iter()
            .map(|identifier| resolve_range(identifier, ctx))
            .collect::<Result<_, _>>()?;

        debug!(
            include = include.len(),
            exclude = exclude.len(),
            "built range acceptor"
        );

        Ok(RangeAcceptor::new(include, exclude))
    }
}

/// Registry entry for the `ranges` acceptor.
pub fn build(descriptor: &ConfigNode, ctx: &DiscoveryContext) -> Result<Arc<dyn Acceptor>, PluginError> {
    let acceptor: RangeAcceptor = RangeAcceptorBuilder::from_config(descriptor)?.build(ctx)?;
    Ok(Arc::new(acceptor))
}

/// The policy used when a scope configures no filtering: the agent's own ranges only.
pub fn own_ranges_only(ctx: &DiscoveryContext) -> RangeAcceptor {
    RangeAcceptor::new(vec![probe_ranges(ctx)], Vec::new())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
