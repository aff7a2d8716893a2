use std::sync::Arc;

use scopr_common::config::ConfigNode;
use scopr_core::observer::TracingObserver;
use scopr_core::{load_scopes, DiscoveryScope, ScopeLoader, ScopeOverrides};
use scopr_plugins::{Range, RangeAcceptor, ServiceAcceptor};

use crate::logging;
use crate::util::{catalog, client, context, listening, server, unknown};

const FIXTURE: &str = include_str!("../../fixtures/scopes.json");

fn fixture() -> ConfigNode {
    serde_json::from_str(FIXTURE).unwrap()
}

fn load() -> Vec<DiscoveryScope> {
    logging::init();
    let ctx = context();
    let catalog = catalog();
    ScopeLoader::new(&catalog, &ctx)
        .with_observer(Arc::new(TracingObserver))
        .load_all(&fixture())
        .unwrap()
}

#[test]
fn loads_scopes_from_json() {
    let scopes = load();
    let names: Vec<&str> = scopes.iter().map(DiscoveryScope::name).collect();
    assert_eq!(names, vec!["datacenter", "lab"]);

    let datacenter = &scopes[0];
    assert_eq!(datacenter.approaches().names().collect::<Vec<_>>(), vec!["netstat"]);
    assert_eq!(datacenter.reporters().names().collect::<Vec<_>>(), vec!["cmdb", "audit"]);
    assert_eq!(datacenter.acceptors().names().collect::<Vec<_>>(), vec!["ranges", "services"]);
}

#[test]
fn default_policy_of_datacenter() {
    let scopes = load();
    let datacenter = &scopes[0];

    assert!(datacenter.accepts(&server("10.1.4.4")));
    assert!(datacenter.accepts(&server("172.16.8.1")));
    assert!(datacenter.accepts(&server("192.168.20.9")));
    assert!(!datacenter.accepts(&server("192.168.30.9")));
    assert!(!datacenter.accepts(&server("10.1.99.20")));
    assert!(datacenter.accepts(&server("10.1.99.51")));

    // outscope_clients makes the range policy role sensitive.
    assert!(!datacenter.accepts(&client("192.168.10.1")));
    assert!(datacenter.accepts(&unknown("8.8.8.8")));

    assert!(datacenter.accepts(&listening("10.1.4.4", 443)));
    assert!(datacenter.accepts(&listening("10.1.4.4", 1521)));
    assert!(!datacenter.accepts(&listening("10.1.4.4", 22)));
    assert!(!datacenter.accepts(&listening("10.1.4.4", 8080)));
}

#[test]
fn reporter_policies() {
    let scopes = load();
    let datacenter = &scopes[0];

    // cmdb has no filtering of its own.
    assert_eq!(datacenter.accepts_for_reporter("cmdb", &server("192.168.20.9")), Some(true));

    // audit narrows ranges and keeps the default services policy.
    assert_eq!(datacenter.accepts_for_reporter("audit", &server("192.168.20.9")), Some(false));
    assert_eq!(datacenter.accepts_for_reporter("audit", &server("192.168.10.9")), Some(true));
    assert_eq!(datacenter.accepts_for_reporter("audit", &listening("192.168.10.9", 22)), Some(false));
    assert_eq!(datacenter.accepts_for_reporter("audit", &listening("192.168.10.9", 80)), Some(true));

    // audit's own ranges never lift the default exclusions.
    assert!(!datacenter.accepts(&client("192.168.10.9")));
    assert_eq!(datacenter.accepts_for_reporter("audit", &client("192.168.10.9")), Some(false));
    assert_eq!(datacenter.accepts_for_reporter("audit", &server("10.1.4.4")), Some(false));

    assert_eq!(datacenter.accepts_for_reporter("syslog", &server("192.168.10.9")), None);
}

#[test]
fn reporter_with_services_only_keeps_default_ranges() {
    logging::init();
    let ctx = context();
    let catalog = catalog();
    let with_services_only = FIXTURE.replace(
        r#""attributes": { "name": "cmdb" }"#,
        r#""attributes": { "name": "cmdb" },
                  "children": [
                    {
                      "tag": "filtering",
                      "children": [
                        {
                          "tag": "services",
                          "children": [
                            { "tag": "include", "children": [{ "tag": "service", "text": "https" }] }
                          ]
                        }
                      ]
                    }
                  ]"#,
    );
    let root: ConfigNode = serde_json::from_str(&with_services_only).unwrap();
    let scopes = ScopeLoader::new(&catalog, &ctx).load_all(&root).unwrap();
    let datacenter = &scopes[0];

    let cmdb = datacenter.reporter_engine("cmdb").unwrap();
    assert_eq!(cmdb.names().collect::<Vec<_>>(), vec!["cmdb:services", "ranges", "services"]);

    for rejected in [server("192.168.30.9"), server("10.1.99.20"), client("192.168.10.9")] {
        assert!(!datacenter.accepts(&rejected));
        assert_eq!(datacenter.accepts_for_reporter("cmdb", &rejected), Some(false));
    }
    assert_eq!(datacenter.accepts_for_reporter("cmdb", &server("10.1.4.4")), Some(true));
    assert_eq!(datacenter.accepts_for_reporter("cmdb", &listening("10.1.4.4", 443)), Some(true));
    assert_eq!(datacenter.accepts_for_reporter("cmdb", &listening("10.1.4.4", 80)), Some(false));
    assert_eq!(datacenter.accepts_for_reporter("cmdb", &listening("10.1.4.4", 1521)), Some(false));
}

#[test]
fn scope_without_filtering_sees_own_ranges_only() {
    let scopes = load();
    let lab = &scopes[1];

    assert!(lab.reporters().is_empty());
    assert!(lab.accepts(&server("10.1.0.1")));
    assert!(!lab.accepts(&server("10.2.0.1")));
    assert!(lab.accepts(&listening("10.2.0.1", 22)));
}

#[test]
fn overrides_replace_configured_acceptors() {
    logging::init();
    let ctx = context();
    let catalog = catalog();
    let overrides = ScopeOverrides::new()
        .with_acceptor("services", Arc::new(ServiceAcceptor::default()))
        .with_reporter_acceptor("cmdb", "ranges", Arc::new(RangeAcceptor::new(vec![Range::Wildcard], vec![])));

    let scopes = load_scopes(&fixture(), &catalog, &ctx, overrides).unwrap();
    let datacenter = &scopes[0];

    // An empty services policy rejects every port.
    assert!(!datacenter.accepts(&listening("10.1.4.4", 443)));
    assert_eq!(datacenter.accepts_for_reporter("cmdb", &server("203.0.113.9")), Some(true));
    assert_eq!(datacenter.accepts_for_reporter("cmdb", &listening("10.1.4.4", 443)), Some(false));
    assert!(!datacenter.accepts(&server("203.0.113.9")));
}

#[test]
fn malformed_range_aborts_loading() {
    logging::init();
    let ctx = context();
    let catalog = catalog();
    let broken = FIXTURE.replace("10.1.99.1-10.1.99.50", "10.1.99.1-10.1.99.50/24");
    let root: ConfigNode = serde_json::from_str(&broken).unwrap();

    let err = load_scopes(&root, &catalog, &ctx, ScopeOverrides::default()).unwrap_err();
    assert_eq!(err.to_string(), "building filtering of scope 'datacenter'");
    assert!(format!("{err:#}").contains("10.1.99.1-10.1.99.50/24"));
}

#[test]
fn reset_keeps_policies() {
    let mut scopes = load();
    let datacenter = &mut scopes[0];
    datacenter.reset();
    assert!(datacenter.accepts(&server("10.1.4.4")));
    assert_eq!(datacenter.reporters().len(), 2);
}
