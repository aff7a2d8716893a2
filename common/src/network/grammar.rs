//! # Range Grammar
//!
//! Turns range text into [`AddressRange`] values.
//!
//! ```text
//! rangeset  := range (',' range)*
//! range     := cidr | span | octetform
//! cidr      := quad '/' (prefixlen | netmask)
//! span      := strict_quad '-' strict_quad
//! octetform := octet '.' octet '.' octet '.' octet '.'?
//! octet     := digits | '*' | '[' digits '-' digits ']' | '{' item (',' item)* '}'
//! item      := digits | digits '-' digits
//! ```
//!
//! A trailing `.` marks an incomplete prefix: missing trailing octets become `*`.

use std::net::Ipv4Addr;

use tracing::warn;

use crate::error::GrammarError;
use crate::network::octet::OctetSpec;
use crate::network::range::{AddressRange, CidrRange, SetRange, SpanRange};

/// Every standard dotted netmask and its prefix length.
pub const NETMASKS: [(&str, u8); 33] = [
    ("255.255.255.255", 32),
    ("255.255.255.254", 31),
    ("255.255.255.252", 30),
    ("255.255.255.248", 29),
    ("255.255.255.240", 28),
    ("255.255.255.224", 27),
    ("255.255.255.192", 26),
    ("255.255.255.128", 25),
    ("255.255.255.0", 24),
    ("255.255.254.0", 23),
    ("255.255.252.0", 22),
    ("255.255.248.0", 21),
    ("255.255.240.0", 20),
    ("255.255.224.0", 19),
    ("255.255.192.0", 18),
    ("255.255.128.0", 17),
    ("255.255.0.0", 16),
    ("255.254.0.0", 15),
    ("255.252.0.0", 14),
    ("255.248.0.0", 13),
    ("255.240.0.0", 12),
    ("255.224.0.0", 11),
    ("255.192.0.0", 10),
    ("255.128.0.0", 9),
    ("255.0.0.0", 8),
    ("254.0.0.0", 7),
    ("252.0.0.0", 6),
    ("248.0.0.0", 5),
    ("240.0.0.0", 4),
    ("224.0.0.0", 3),
    ("192.0.0.0", 2),
    ("128.0.0.0", 1),
    ("0.0.0.0", 0),
];

/// Looks up the prefix length of a dotted netmask.
pub fn netmask_prefix(mask: &str) -> Option<u8> {
    NETMASKS
        .iter()
        .find(|(text, _)| *text == mask)
        .map(|&(_, prefix)| prefix)
}

/// Splits a range set at its top-level commas.
///
/// Only `{...}` nesting is tracked; brackets never contain commas in valid input.
/// Pieces are trimmed and empty pieces dropped.
pub fn split_top_level(spec: &str) -> Vec<&str> {
    let mut pieces: Vec<&str> = Vec::new();
    let mut depth: usize = 0;
    let mut start: usize = 0;

    for (idx, ch) in spec.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(&spec[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    pieces.push(&spec[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Parses one range token (already split from its range set).
pub fn parse_range(token: &str) -> Result<AddressRange, GrammarError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(GrammarError::EmptyToken);
    }

    if token.contains('-') && token.contains('/') {
        return Err(GrammarError::MixedNotation(token.to_string()));
    }

    if let Some(range) = parse_cidr(token)? {
        return Ok(range);
    }

    if let Some(range) = parse_span(token)? {
        return Ok(range);
    }

    parse_octet_form(token)
}

/// Parses `quad/prefix` and `quad/netmask`.
fn parse_cidr(token: &str) -> Result<Option<AddressRange>, GrammarError> {
    let Some((addr_str, suffix)) = token.split_once('/') else {
        return Ok(None);
    };

    let address: Ipv4Addr = parse_strict_quad(addr_str.trim())?;
    let prefix: u8 = parse_prefix(suffix.trim())?;

    Ok(Some(CidrRange::new(address, prefix)?.into()))
}

fn parse_prefix(suffix: &str) -> Result<u8, GrammarError> {
    if is_digits(suffix) {
        return match suffix.parse::<u8>() {
            Ok(prefix) if prefix <= 32 => Ok(prefix),
            _ => Err(GrammarError::InvalidPrefix(suffix.to_string())),
        };
    }

    if suffix.contains('.') {
        return netmask_prefix(suffix).ok_or_else(|| GrammarError::UnknownNetmask(suffix.to_string()));
    }

    Err(GrammarError::InvalidPrefix(suffix.to_string()))
}

/// Parses `from-to` where the `-` sits outside any `[...]` or `{...}`.
fn parse_span(token: &str) -> Result<Option<AddressRange>, GrammarError> {
    let separators: Vec<usize> = top_level_dashes(token);
    let idx: usize = match separators.as_slice() {
        [] => return Ok(None),
        [idx] => *idx,
        _ => return Err(GrammarError::MalformedSpan(token.to_string())),
    };

    let (from_str, to_str) = (token[..idx].trim(), token[idx + 1..].trim());
    if from_str.is_empty() || to_str.is_empty() {
        return Err(GrammarError::MalformedSpan(token.to_string()));
    }

    let span = SpanRange::new(parse_strict_quad(from_str)?, parse_strict_quad(to_str)?);
    if span.is_inverted() {
        warn!(range = %span, "range span starts above its end and will match nothing");
    }

    Ok(Some(span.into()))
}

fn top_level_dashes(token: &str) -> Vec<usize> {
    let mut depth: usize = 0;
    let mut found: Vec<usize> = Vec::new();

    for (idx, ch) in token.char_indices() {
        match ch {
            '[' | '{' => depth += 1,
            ']' | '}' => depth = depth.saturating_sub(1),
            '-' if depth == 0 => found.push(idx),
            _ => {}
        }
    }

    found
}

/// Parses wildcard, bracket, brace and incomplete-prefix forms.
fn parse_octet_form(token: &str) -> Result<AddressRange, GrammarError> {
    let (body, incomplete) = match token.strip_suffix('.') {
        Some(body) => (body, true),
        None => (token, false),
    };

    let mut parts: Vec<&str> = body.split('.').map(str::trim).collect();
    if incomplete {
        while parts.len() < 4 {
            parts.push("*");
        }
    }

    let [a, b, c, d] = parts.as_slice() else {
        return Err(GrammarError::OctetCount {
            token: token.to_string(),
            count: parts.len(),
        });
    };

    let octets: [OctetSpec; 4] = [
        parse_octet(a)?,
        parse_octet(b)?,
        parse_octet(c)?,
        parse_octet(d)?,
    ];

    Ok(SetRange::new(octets).into())
}

fn parse_octet(s: &str) -> Result<OctetSpec, GrammarError> {
    if s == "*" {
        return Ok(OctetSpec::full());
    }

    if let Some(inner) = s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        let Some((from, to)) = inner.split_once('-') else {
            return Err(GrammarError::InvalidOctet(s.to_string()));
        };
        return parse_octet_span(from.trim(), to.trim(), s);
    }

    if let Some(inner) = s.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
        let mut spec = OctetSpec::empty();
        for item in inner.split(',').map(str::trim) {
            let part: OctetSpec = match item.split_once('-') {
                Some((from, to)) => parse_octet_span(from.trim(), to.trim(), s)?,
                None if is_digits(item) => OctetSpec::single(parse_octet_value(item, s)?),
                None => return Err(GrammarError::InvalidOctet(s.to_string())),
            };
            spec.extend(&part);
        }
        return Ok(spec);
    }

    if is_digits(s) {
        return Ok(OctetSpec::single(parse_octet_value(s, s)?));
    }

    Err(GrammarError::InvalidOctet(s.to_string()))
}

fn parse_octet_span(from: &str, to: &str, whole: &str) -> Result<OctetSpec, GrammarError> {
    if !is_digits(from) || !is_digits(to) {
        return Err(GrammarError::InvalidOctet(whole.to_string()));
    }

    let (from, to) = (parse_octet_value(from, whole)?, parse_octet_value(to, whole)?);
    if from > to {
        return Err(GrammarError::InvertedOctetSpan(whole.to_string()));
    }

    Ok(OctetSpec::span(from, to))
}

/// Parses a dotted quad whose four octets are plain digits.
fn parse_strict_quad(s: &str) -> Result<Ipv4Addr, GrammarError> {
    let parts: Vec<&str> = s.split('.').collect();
    let [a, b, c, d] = parts.as_slice() else {
        return Err(GrammarError::OctetCount {
            token: s.to_string(),
            count: parts.len(),
        });
    };

    let mut octets = [0u8; 4];
    for (slot, part) in octets.iter_mut().zip([a, b, c, d]) {
        if !is_digits(part) {
            return Err(GrammarError::NotLiteralAddress(s.to_string()));
        }
        *slot = parse_octet_value(part, s)?;
    }

    Ok(Ipv4Addr::from(octets))
}

/// `digits` is known to be ASCII digits only.
fn parse_octet_value(digits: &str, token: &str) -> Result<u8, GrammarError> {
    let value: u64 = digits.parse().unwrap_or(u64::MAX);
    u8::try_from(value).map_err(|_| GrammarError::OctetOutOfRange {
        token: token.to_string(),
        value,
    })
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
