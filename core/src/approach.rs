//! # Server Detection Approaches
//!
//! An approach is one way of detecting servers during a discovery run. The
//! probing itself lives outside this crate; a scope only owns the configured
//! instances and resets them between runs.

use std::fmt;

use scopr_common::config::ConfigNode;
use scopr_plugins::{DiscoveryContext, PluginError};

pub const APPROACH_TAG: &str = "approach";

pub trait Approach: Send + Sync + fmt::Debug {
    /// Drops whatever the approach gathered during the previous run.
    fn reset(&mut self);
}

pub type ApproachFactory =
    fn(&ConfigNode, &DiscoveryContext) -> Result<Box<dyn Approach>, PluginError>;

/// The active approaches of a scope, in configuration order.
#[derive(Debug, Default)]
pub struct ApproachEngine {
    approaches: Vec<(String, Box<dyn Approach>)>,
}

impl ApproachEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, approach: Box<dyn Approach>) {
        self.approaches.push((name.into(), approach));
    }

    pub fn reset(&mut self) {
        for (_, approach) in &mut self.approaches {
            approach.reset();
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Approach> {
        self.approaches
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, approach)| approach.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.approaches.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.approaches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approaches.is_empty()
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
