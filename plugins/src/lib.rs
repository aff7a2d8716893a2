//! # scopr-plugins
//!
//! Filtering policies for discovery.
//!
//! * **[`range`]**: the range variants a policy is configured with.
//! * **[`acceptor`]**: the [`Acceptor`] trait and its range and service implementations.
//! * **[`engine`]**: [`AcceptorPluginEngine`], the conjunction of named acceptors.
//! * **[`builder`]**: acceptors built from configuration, dispatched by plugin name.
//! * **[`context`]**: run-time facts about the discovering agent.

pub mod acceptor;
pub mod builder;
pub mod context;
pub mod engine;
pub mod error;
pub mod range;

pub use acceptor::{Acceptor, PortSet, RangeAcceptor, ServiceAcceptor};
pub use builder::AcceptorRegistry;
pub use context::DiscoveryContext;
pub use engine::AcceptorPluginEngine;
pub use error::{PluginError, PluginKind};
pub use range::Range;
