use std::net::{IpAddr, Ipv4Addr};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scopr_common::network::range::{AddressRange, SpanRange};
use scopr_common::{GrammarError, RangeSet};

use crate::logging;

const SAMPLES: usize = 2_000;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5c0b_e5ed)
}

fn random_v4(rng: &mut StdRng) -> Ipv4Addr {
    Ipv4Addr::from(rng.random::<u32>())
}

/// Addresses near `base`, so narrow ranges see hits as well as misses.
fn nearby_v4(rng: &mut StdRng, base: Ipv4Addr) -> Ipv4Addr {
    let offset: u32 = rng.random_range(0..1 << 20);
    Ipv4Addr::from(u32::from(base).wrapping_add(offset).wrapping_sub(1 << 19))
}

fn contains(set: &RangeSet, addr: &str) -> bool {
    let addr: IpAddr = addr.parse().unwrap();
    set.contains(addr)
}

#[test]
fn full_wildcard_contains_everything() {
    logging::init();
    let set = RangeSet::parse("*.*.*.*").unwrap();
    let mut rng = rng();

    assert!(set.contains_v4(Ipv4Addr::UNSPECIFIED));
    assert!(set.contains_v4(Ipv4Addr::BROADCAST));
    for _ in 0..SAMPLES {
        let addr = random_v4(&mut rng);
        assert!(set.contains_v4(addr), "{addr} not in *.*.*.*");
    }
}

#[test]
fn prefix_and_netmask_notations_agree() {
    let mut rng = rng();

    for prefix in 0..=32u32 {
        let mask = Ipv4Addr::from(u32::MAX.checked_shl(32 - prefix).unwrap_or(0));
        let base = random_v4(&mut rng);
        let by_prefix = RangeSet::parse(&format!("{base}/{prefix}")).unwrap();
        let by_mask = RangeSet::parse(&format!("{base}/{mask}")).unwrap();

        for _ in 0..200 {
            let addr = nearby_v4(&mut rng, base);
            assert_eq!(
                by_prefix.contains_v4(addr),
                by_mask.contains_v4(addr),
                "{base}/{prefix} and {base}/{mask} disagree on {addr}"
            );
        }
        assert!(by_prefix.contains_v4(base));
    }

    let by_prefix = RangeSet::parse("10.0.0.0/8").unwrap();
    let by_mask = RangeSet::parse("10.0.0.0/255.0.0.0").unwrap();
    for _ in 0..SAMPLES {
        let addr = random_v4(&mut rng);
        assert_eq!(by_prefix.contains_v4(addr), by_mask.contains_v4(addr));
    }
}

#[test]
fn span_boundaries() {
    let set = RangeSet::parse("10.0.3.15-10.0.6.42").unwrap();
    assert!(contains(&set, "10.0.3.15"));
    assert!(!contains(&set, "10.0.3.14"));
    assert!(contains(&set, "10.0.4.200"));
    assert!(contains(&set, "10.0.6.42"));
    assert!(!contains(&set, "10.0.6.43"));
    assert!(!contains(&set, "10.1.4.4"));
}

#[test]
fn span_is_a_numeric_interval() {
    let mut rng = rng();

    for _ in 0..200 {
        let a = random_v4(&mut rng);
        let b = nearby_v4(&mut rng, a);
        let (from, to) = if a <= b { (a, b) } else { (b, a) };
        let span = SpanRange::new(from, to);

        for _ in 0..50 {
            let addr = nearby_v4(&mut rng, from);
            let expected = from <= addr && addr <= to;
            assert_eq!(span.matches(addr), expected, "{span} on {addr}");
        }
        assert!(span.matches(from));
        assert!(span.matches(to));
    }
}

#[test]
fn inverted_span_matches_nothing() {
    let set = RangeSet::parse("10.0.6.42-10.0.3.15").unwrap();
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let addr = nearby_v4(&mut rng, Ipv4Addr::new(10, 0, 4, 0));
        assert!(!set.contains_v4(addr));
    }
}

#[test]
fn brace_and_bracket_octets() {
    let set = RangeSet::parse("10.0.{1,3,5-7}.*").unwrap();
    assert!(contains(&set, "10.0.6.9"));
    assert!(contains(&set, "10.0.1.0"));
    assert!(!contains(&set, "10.0.4.9"));
    assert!(!contains(&set, "10.0.8.9"));

    let set = RangeSet::parse("192.168.[10-20].1").unwrap();
    assert!(contains(&set, "192.168.15.1"));
    assert!(!contains(&set, "192.168.15.2"));
    assert!(!contains(&set, "192.168.21.1"));
}

#[test]
fn incomplete_prefix_pads_with_wildcards() {
    let set = RangeSet::parse("10.0.").unwrap();
    assert!(contains(&set, "10.0.255.255"));
    assert!(contains(&set, "10.0.0.0"));
    assert!(!contains(&set, "10.1.0.0"));
}

#[test]
fn comma_lists_are_unions() {
    let set = RangeSet::parse("10.0.0.1,192.168.0.0/16").unwrap();
    assert_eq!(set.len(), 2);
    assert!(contains(&set, "192.168.5.5"));
    assert!(contains(&set, "10.0.0.1"));
    assert!(!contains(&set, "10.0.0.2"));

    // Commas inside braces belong to the octet.
    let set = RangeSet::parse("10.{1,2}.0.*, 172.16.0.1").unwrap();
    assert_eq!(set.len(), 2);
}

#[test]
fn ipv6_never_matches() {
    let set = RangeSet::parse("*.*.*.*").unwrap();
    assert!(!contains(&set, "::1"));
    assert!(!contains(&set, "fe80::1"));
}

#[test]
fn parsing_twice_gives_identical_verdicts() {
    let specs = [
        "10.0.0.0/8",
        "10.0.0.0/255.255.0.0",
        "10.0.3.15-10.0.6.42",
        "10.0.{1,3,5-7}.*",
        "10.[0-3].",
        "192.168.1.1,10.0.0.0/24",
    ];
    let mut rng = rng();

    for spec in specs {
        let first = RangeSet::parse(spec).unwrap();
        let second = RangeSet::parse(spec).unwrap();
        let reparsed: RangeSet = first.to_string().parse().unwrap();
        for _ in 0..SAMPLES {
            let addr = nearby_v4(&mut rng, Ipv4Addr::new(10, 0, 4, 0));
            let verdict = first.contains_v4(addr);
            assert_eq!(verdict, second.contains_v4(addr), "{spec} on {addr}");
            assert_eq!(verdict, reparsed.contains_v4(addr), "{spec} reprinted as {first}");
        }
    }
}

#[test]
fn malformed_tokens_fail_fast() {
    assert!(matches!(
        RangeSet::parse("10.0.0.1-10.0.0.9/24"),
        Err(GrammarError::MixedNotation(_))
    ));
    assert!(matches!(
        RangeSet::parse("10.0.0.0/255.255.0.1"),
        Err(GrammarError::UnknownNetmask(_))
    ));
    assert!(matches!(RangeSet::parse("10.0.0.0/33"), Err(GrammarError::InvalidPrefix(_))));
    assert!(matches!(
        RangeSet::parse("10.0.0.256"),
        Err(GrammarError::OctetOutOfRange { value: 256, .. })
    ));
    assert!(matches!(RangeSet::parse("10.0.0"), Err(GrammarError::OctetCount { count: 3, .. })));
    assert!(matches!(RangeSet::parse("10.0.a.1"), Err(GrammarError::InvalidOctet(_))));
    assert!(RangeSet::parse("10.0.*.1-10.0.0.9").is_err());
    assert!(RangeSet::parse("10.0.[9-3].1").is_err());

    let range: Result<AddressRange, _> = "10.0.0.0/8".parse();
    assert!(matches!(range, Ok(AddressRange::Cidr(_))));
}
