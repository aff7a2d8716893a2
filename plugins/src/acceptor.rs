//! The central **abstraction** for filtering decisions.
//!
//! An acceptor is a named include/exclude policy. The engine first asks whether
//! the acceptor has an opinion on an entity ([`Acceptor::is_applicable`]) and only
//! then asks for the verdict ([`Acceptor::accepts`]).

use std::any::Any;
use std::fmt;

use scopr_common::Entity;

pub mod range;
pub mod service;

pub use range::RangeAcceptor;
pub use service::{PortSet, ServiceAcceptor};

pub trait Acceptor: Send + Sync + fmt::Debug {
    /// Whether this acceptor can judge `entity` at all.
    fn is_applicable(&self, entity: &Entity) -> bool;

    /// The verdict for an applicable entity.
    fn accepts(&self, entity: &Entity) -> bool;

    fn as_any(&self) -> &dyn Any;
}
