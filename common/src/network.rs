//! # Network Ranges
//!
//! * [`grammar`]: parses range text.
//! * [`range`]: parsed ranges and [`range::RangeSet`].
//! * [`octet`]: per-position value sets of the wildcard forms.
//! * [`node`]: the entities filtering decides about.
//! * [`interface`]: managed ranges derived from local interfaces.

pub mod grammar;
pub mod interface;
pub mod node;
pub mod octet;
pub mod range;
