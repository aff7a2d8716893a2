//! Shared fixtures.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use scopr_common::config::ConfigNode;
use scopr_common::domain::RangeDomainScope;
use scopr_common::ports::{KnownPort, PortCatalog};
use scopr_common::{Endpoint, Entity, Node, RangeSet};
use scopr_core::approach::Approach;
use scopr_core::reporter::Reporter;
use scopr_core::PluginCatalog;
use scopr_plugins::{DiscoveryContext, PluginError};

/// Agent 10.1.0.10 managing `10.1.0.0/16` and `172.16.0.0/12`.
pub(crate) fn context() -> DiscoveryContext {
    let managed = RangeSet::parse("10.1.0.0/16,172.16.0.0/12").unwrap();
    let catalog: PortCatalog = [
        KnownPort::new(22, true, "ssh"),
        KnownPort::new(80, true, "http"),
        KnownPort::new(443, true, "https"),
        KnownPort::new(8080, false, "http"),
        KnownPort::new(1521, false, "oracle"),
        KnownPort::new(5432, true, "postgres"),
    ]
    .into_iter()
    .collect();

    DiscoveryContext::new(
        Ipv4Addr::new(10, 1, 0, 10),
        managed.clone(),
        Arc::new(catalog),
        Arc::new(RangeDomainScope::new(managed)),
    )
}

#[derive(Debug, Default)]
pub(crate) struct NullApproach;

impl Approach for NullApproach {
    fn reset(&mut self) {}
}

#[derive(Debug, Default)]
pub(crate) struct NullReporter;

impl Reporter for NullReporter {
    fn reset(&mut self) {}
}

fn null_approach(_: &ConfigNode, _: &DiscoveryContext) -> Result<Box<dyn Approach>, PluginError> {
    Ok(Box::new(NullApproach))
}

fn null_reporter(_: &ConfigNode, _: &DiscoveryContext) -> Result<Box<dyn Reporter>, PluginError> {
    Ok(Box::new(NullReporter))
}

/// Approaches `netstat` and `lsof`; reporters `cmdb` and `audit`.
pub(crate) fn catalog() -> PluginCatalog {
    PluginCatalog::new()
        .with_approach("netstat", null_approach)
        .with_approach("lsof", null_approach)
        .with_reporter("cmdb", null_reporter)
        .with_reporter("audit", null_reporter)
}

pub(crate) fn addr(text: &str) -> IpAddr {
    text.parse().unwrap()
}

pub(crate) fn client(text: &str) -> Entity {
    Entity::Node(Node::client(addr(text)))
}

pub(crate) fn server(text: &str) -> Entity {
    Entity::Node(Node::server(addr(text)))
}

pub(crate) fn unknown(text: &str) -> Entity {
    Entity::Node(Node::new(addr(text)))
}

pub(crate) fn listening(text: &str, port: u16) -> Entity {
    Entity::Endpoint(Endpoint::new(Node::server(addr(text)), port))
}
