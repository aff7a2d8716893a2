use std::collections::BTreeMap;
use std::sync::Arc;

use scopr_common::{Node, RangeSet};
use scopr_plugins::builder::ranges::RangeAcceptorBuilder;
use scopr_plugins::builder::services::ServicesAcceptorBuilder;
use scopr_plugins::{AcceptorPluginEngine, PortSet, Range, RangeAcceptor, ServiceAcceptor};

use crate::util::{addr, client, context, listening, server, unknown};

fn ip(spec: &str) -> Range {
    Range::Ip(RangeSet::parse(spec).unwrap())
}

#[test]
fn range_exclusion_wins_over_inclusion() {
    let acceptor = RangeAcceptor::new(vec![ip("10.0.0.0/8")], vec![ip("10.0.0.0/8")]);
    let engine = AcceptorPluginEngine::new().with("ranges", Arc::new(acceptor));
    assert!(!engine.accepts(&server("10.1.1.1")));
}

#[test]
fn wildcard_services_minus_ssh() {
    let acceptor = ServiceAcceptor::new(PortSet::wildcard(), [22].into_iter().collect(), BTreeMap::new());
    let engine = AcceptorPluginEngine::new().with("services", Arc::new(acceptor));
    assert!(engine.accepts(&listening("10.1.1.1", 80)));
    assert!(!engine.accepts(&listening("10.1.1.1", 22)));
}

#[test]
fn one_rejecting_acceptor_rejects_the_entity() {
    let engine = AcceptorPluginEngine::new()
        .with("ranges", Arc::new(RangeAcceptor::new(vec![Range::Wildcard], vec![])))
        .with("lab", Arc::new(RangeAcceptor::new(vec![ip("192.168.0.0/16")], vec![])));
    assert!(!engine.accepts(&server("10.1.1.1")));
    assert!(engine.accepts(&server("192.168.1.1")));
}

#[test]
fn outscope_ranges_follow_the_domain_oracle() {
    let ctx = context();
    let acceptor = RangeAcceptorBuilder::new()
        .include("*")
        .exclude("outscope_clients")
        .build(&ctx)
        .unwrap();
    let engine = AcceptorPluginEngine::new().with("ranges", Arc::new(acceptor));

    // Clients outside the managed ranges are dropped, servers are kept.
    assert!(!engine.accepts(&client("8.8.8.8")));
    assert!(engine.accepts(&client("10.1.4.4")));
    assert!(engine.accepts(&server("8.8.8.8")));
    // Nodes without a role cannot be judged by a role-sensitive policy.
    assert!(engine.accepts(&unknown("8.8.8.8")));
}

#[test]
fn symbolic_and_literal_ranges_mix() {
    let ctx = context();
    let acceptor = RangeAcceptorBuilder::new()
        .include("probe_ranges")
        .include("192.168.10.0/24")
        .exclude("ddm_related_connections")
        .build(&ctx)
        .unwrap();

    assert!(acceptor.accepts_node(&Node::new(addr("10.1.200.1"))));
    assert!(acceptor.accepts_node(&Node::new(addr("172.20.0.1"))));
    assert!(acceptor.accepts_node(&Node::new(addr("192.168.10.77"))));
    assert!(!acceptor.accepts_node(&Node::new(addr("10.1.0.10"))));
    assert!(!acceptor.accepts_node(&Node::new(addr("10.2.0.1"))));
}

#[test]
fn service_names_resolve_through_the_catalog() {
    let ctx = context();
    let acceptor = ServicesAcceptorBuilder::new()
        .include("known_services")
        .include("oracle")
        .exclude("postgres")
        .build(&ctx);
    let engine = AcceptorPluginEngine::new().with("services", Arc::new(acceptor));

    assert!(engine.accepts(&listening("10.1.1.1", 443)));
    assert!(engine.accepts(&listening("10.1.1.1", 1521)));
    assert!(!engine.accepts(&listening("10.1.1.1", 5432)));
    assert!(!engine.accepts(&listening("10.1.1.1", 8080)));
    assert_eq!(
        engine.include_port_names(1521).into_iter().collect::<Vec<_>>(),
        vec!["oracle".to_string()]
    );
}
