//! # IPv4 Range Model
//!
//! Parsed range forms and their membership tests.
//!
//! * [`CidrRange`]: `10.0.0.0/8`, `10.0.0.0/255.0.0.0`.
//! * [`SpanRange`]: `10.0.3.15-10.0.6.42`.
//! * [`SetRange`]: `10.0.0.1`, `10.0.*.1`, `10.[1-5].0.0`, `10.0.{1,3,5-7}.*`, `10.0.`.
//!
//! A [`RangeSet`] is the union of the comma-separated ranges of one configured string.

use std::cmp::Ordering;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::error::GrammarError;
use crate::network::grammar;
use crate::network::octet::OctetSpec;

/// An address plus prefix length, e.g. `192.168.0.0/16`.
///
/// The literal address is kept as written; host bits are masked off on both sides when matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CidrRange {
    address: Ipv4Addr,
    prefix: u8,
}

impl CidrRange {
    pub fn new(address: Ipv4Addr, prefix: u8) -> Result<Self, GrammarError> {
        if prefix > 32 {
            return Err(GrammarError::InvalidPrefix(prefix.to_string()));
        }
        Ok(Self { address, prefix })
    }

    /// A `/32` range holding exactly `address`.
    pub fn host(address: Ipv4Addr) -> Self {
        Self {
            address,
            prefix: 32,
        }
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// `2^32 - 2^(32 - prefix)`, i.e. the top `prefix` bits set.
    pub fn mask(&self) -> u32 {
        u32::MAX.checked_shl(32 - u32::from(self.prefix)).unwrap_or(0)
    }

    pub fn matches(&self, addr: Ipv4Addr) -> bool {
        let mask: u32 = self.mask();
        u32::from(addr) & mask == u32::from(self.address) & mask
    }
}

impl fmt::Display for CidrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix)
    }
}

/// Bounds of one octet position inside a [`SpanRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OctetBound {
    pub from: u8,
    pub to: u8,
    pub equal: bool,
}

/// Where the walk of a [`SpanRange`] stands relative to its bounds.
#[derive(Debug, Clone, Copy)]
enum Tracking {
    /// Every octet so far equals both bounds.
    Both,
    /// The address sits on the lower bound; later octets must not drop below it.
    From,
    /// The address sits on the upper bound; later octets must not exceed it.
    To,
}

/// Inclusive address span, e.g. `10.0.3.15-10.0.6.42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanRange {
    from: Ipv4Addr,
    to: Ipv4Addr,
    bounds: [OctetBound; 4],
}

impl SpanRange {
    pub fn new(from: Ipv4Addr, to: Ipv4Addr) -> Self {
        let (lo, hi) = (from.octets(), to.octets());
        let bounds: [OctetBound; 4] = std::array::from_fn(|i| OctetBound {
            from: lo[i],
            to: hi[i],
            equal: lo[i] == hi[i],
        });
        Self { from, to, bounds }
    }

    pub fn from(&self) -> Ipv4Addr {
        self.from
    }

    pub fn to(&self) -> Ipv4Addr {
        self.to
    }

    pub fn bounds(&self) -> &[OctetBound; 4] {
        &self.bounds
    }

    /// A span written upside down matches nothing.
    pub fn is_inverted(&self) -> bool {
        self.from > self.to
    }

    /// Walks the octets most significant first.
    ///
    /// Once an octet lies strictly inside the bounds that still apply, the less
    /// significant octets are free and the walk stops.
    ///
    /// The span is the numeric interval `[from, to]`, not a per-octet box:
    /// `10.0.4.1` lies in `10.0.3.15-10.1.0.0` although its last octet is
    /// below 15.
    pub fn matches(&self, addr: Ipv4Addr) -> bool {
        let mut tracking = Tracking::Both;

        for (bound, octet) in self.bounds.iter().zip(addr.octets()) {
            tracking = match tracking {
                Tracking::Both if bound.equal => {
                    if octet != bound.from {
                        return false;
                    }
                    Tracking::Both
                }
                Tracking::Both => match (octet.cmp(&bound.from), octet.cmp(&bound.to)) {
                    (Ordering::Less, _) | (_, Ordering::Greater) => return false,
                    (Ordering::Equal, _) => Tracking::From,
                    (_, Ordering::Equal) => Tracking::To,
                    (Ordering::Greater, Ordering::Less) => return true,
                },
                Tracking::From => match octet.cmp(&bound.from) {
                    Ordering::Less => return false,
                    Ordering::Greater => return true,
                    Ordering::Equal => Tracking::From,
                },
                Tracking::To => match octet.cmp(&bound.to) {
                    Ordering::Greater => return false,
                    Ordering::Less => return true,
                    Ordering::Equal => Tracking::To,
                },
            };
        }

        true
    }
}

impl fmt::Display for SpanRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// One [`OctetSpec`] per dotted-quad position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRange {
    octets: [OctetSpec; 4],
}

impl SetRange {
    pub fn new(octets: [OctetSpec; 4]) -> Self {
        Self { octets }
    }

    pub fn octets(&self) -> &[OctetSpec; 4] {
        &self.octets
    }

    pub fn matches(&self, addr: Ipv4Addr) -> bool {
        self.octets
            .iter()
            .zip(addr.octets())
            .all(|(spec, octet)| spec.contains(octet))
    }
}

impl fmt::Display for SetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = &self.octets;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

/// A single parsed range token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressRange {
    Cidr(CidrRange),
    Span(SpanRange),
    Set(SetRange),
}

impl AddressRange {
    pub fn matches(&self, addr: Ipv4Addr) -> bool {
        match self {
            AddressRange::Cidr(range) => range.matches(addr),
            AddressRange::Span(range) => range.matches(addr),
            AddressRange::Set(range) => range.matches(addr),
        }
    }
}

impl FromStr for AddressRange {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        grammar::parse_range(s)
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressRange::Cidr(range) => range.fmt(f),
            AddressRange::Span(range) => range.fmt(f),
            AddressRange::Set(range) => range.fmt(f),
        }
    }
}

impl From<CidrRange> for AddressRange {
    fn from(range: CidrRange) -> Self {
        AddressRange::Cidr(range)
    }
}

impl From<SpanRange> for AddressRange {
    fn from(range: SpanRange) -> Self {
        AddressRange::Span(range)
    }
}

impl From<SetRange> for AddressRange {
    fn from(range: SetRange) -> Self {
        AddressRange::Set(range)
    }
}

/// Union of the ranges in one comma-separated string.
///
/// Parse once at configuration load and reuse; matching never allocates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    ranges: Vec<AddressRange>,
}

impl RangeSet {
    /// Parses `"10.0.0.1, 192.168.0.0/16, 172.16.{1,2}.*"`.
    pub fn parse(spec: &str) -> Result<Self, GrammarError> {
        let ranges: Vec<AddressRange> = grammar::split_top_level(spec)
            .into_iter()
            .map(grammar::parse_range)
            .collect::<Result<_, _>>()?;
        Ok(Self { ranges })
    }

    pub fn from_ranges(ranges: Vec<AddressRange>) -> Self {
        Self { ranges }
    }

    pub fn single(addr: Ipv4Addr) -> Self {
        Self {
            ranges: vec![AddressRange::Cidr(CidrRange::host(addr))],
        }
    }

    pub fn push(&mut self, range: AddressRange) {
        self.ranges.push(range);
    }

    /// IPv6 addresses are never members.
    pub fn contains(&self, addr: IpAddr) -> bool {
        match addr {
            IpAddr::V4(v4) => self.contains_v4(v4),
            IpAddr::V6(_) => false,
        }
    }

    pub fn contains_v4(&self, addr: Ipv4Addr) -> bool {
        self.ranges.iter().any(|range| range.matches(addr))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AddressRange> {
        self.ranges.iter()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl FromStr for RangeSet {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangeSet::parse(s)
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ranges.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl FromIterator<AddressRange> for RangeSet {
    fn from_iter<I: IntoIterator<Item = AddressRange>>(iter: I) -> Self {
        Self {
            ranges: iter.into_iter().collect(),
        }
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
