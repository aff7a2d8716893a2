//! Cross-crate integration tests for the range grammar, the acceptor policies and
//! scope assembly.

pub mod logging;

#[cfg(test)]
mod util;

#[cfg(test)]
mod discovery;
#[cfg(test)]
mod network;
