//! # scopr-common
//!
//! Shared building blocks for discovery filtering:
//!
//! * **[`network`]**: the IPv4 range grammar, matchers and the discovered-entity model.
//! * **[`ports`]** and **[`domain`]**: contracts for the known-ports catalog and the
//!   domain-scope oracle, each with an in-memory implementation.
//! * **[`config`]**: the descriptor tree scopes are built from.

pub mod config;
pub mod domain;
pub mod error;
pub mod network;
pub mod ports;

pub use error::GrammarError;
pub use network::node::{Endpoint, Entity, Node, Role};
pub use network::range::{AddressRange, RangeSet};
