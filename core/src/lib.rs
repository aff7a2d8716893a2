//! # scopr-core
//!
//! Assembles discovery scopes from configuration.
//!
//! * **[`discovery`]**: [`DiscoveryScope`] and the loader that builds it.
//! * **[`registry`]**: factory tables for approaches, reporters and acceptors.
//! * **[`approach`]** and **[`reporter`]**: the plugin kinds a scope owns.
//! * **[`observer`]**: hooks notified of filtering decisions.

pub mod approach;
pub mod discovery;
pub mod observer;
pub mod registry;
pub mod reporter;

pub use discovery::{load_scope, load_scopes, DiscoveryScope, ScopeLoader, ScopeOverrides};
pub use registry::{PluginCatalog, PluginRegistry};
