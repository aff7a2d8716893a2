//! # Octet Sets
//!
//! One position of a dotted quad in the wildcard family of range notations
//! (`10.0.*.1`, `10.[1-5].0.0`, `10.{1,3,5-7}.0.0`).

use std::fmt;

/// Set of values allowed at a single dotted-quad position.
///
/// Values keep the order they were written in, with duplicates removed.
/// Membership is answered from a 256-bit mask.
#[derive(Clone, PartialEq, Eq)]
pub struct OctetSpec {
    values: Vec<u8>,
    mask: [u128; 2],
}

impl OctetSpec {
    /// Every value 0..=255 (`*`).
    pub fn full() -> Self {
        Self::span(0, 255)
    }

    pub fn single(value: u8) -> Self {
        let mut spec = Self::empty();
        spec.push(value);
        spec
    }

    /// Inclusive span `[from-to]`. Callers guarantee `from <= to`.
    pub fn span(from: u8, to: u8) -> Self {
        let mut spec = Self::empty();
        for value in from..=to {
            spec.push(value);
        }
        spec
    }

    pub(crate) fn empty() -> Self {
        Self {
            values: Vec::new(),
            mask: [0; 2],
        }
    }

    /// Adds `value` unless it is already present.
    pub(crate) fn push(&mut self, value: u8) {
        if !self.contains(value) {
            let (word, bit) = Self::slot(value);
            self.mask[word] |= 1 << bit;
            self.values.push(value);
        }
    }

    pub(crate) fn extend(&mut self, other: &OctetSpec) {
        for &value in &other.values {
            self.push(value);
        }
    }

    pub fn contains(&self, value: u8) -> bool {
        let (word, bit) = Self::slot(value);
        self.mask[word] & (1 << bit) != 0
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == 256
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    fn slot(value: u8) -> (usize, u32) {
        ((value / 128) as usize, (value % 128) as u32)
    }
}

impl fmt::Debug for OctetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OctetSpec({self})")
    }
}

/// Writes the most compact notation: a digit, `*`, `[a-b]` or `{...}`.
impl fmt::Display for OctetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_full() {
            return write!(f, "*");
        }
        if let [single] = self.values.as_slice() {
            return write!(f, "{single}");
        }

        let first = self.values[0];
        let last = self.values[self.values.len() - 1];
        let contiguous = self
            .values
            .windows(2)
            .all(|pair| pair[1] == pair[0].wrapping_add(1));
        if contiguous && last > first {
            return write!(f, "[{first}-{last}]");
        }

        let items: Vec<String> = self.values.iter().map(u8::to_string).collect();
        write!(f, "{{{}}}", items.join(","))
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
