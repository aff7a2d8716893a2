//! Scope assembly.
//!
//! For every scope the loader
//! 1. builds the approach engine from the active `approach` descriptors,
//! 2. builds the default acceptor engine, falling back to the agent's own ranges,
//! 3. applies the caller's acceptor overrides,
//! 4. derives one engine per reporter by adding its own acceptors to the default,
//! 5. applies the caller's reporter overrides.
//!
//! Unknown plugin names are logged and skipped. Anything else that goes wrong,
//! malformed ranges included, aborts loading the scope.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use scopr_common::config::ConfigNode;
use scopr_plugins::builder::ranges::own_ranges_only;
use scopr_plugins::builder::RANGES_PLUGIN;
use scopr_plugins::{AcceptorPluginEngine, DiscoveryContext, PluginError};
use tracing::{debug, info, warn};

use crate::approach::{ApproachEngine, APPROACH_TAG};
use crate::discovery::{DiscoveryScope, ScopeOverrides};
use crate::observer::DiscoveryObserver;
use crate::registry::PluginCatalog;
use crate::reporter::{ReporterEngine, ReporterSlot, REPORTER_TAG};

pub const SCOPES_TAG: &str = "scopes";
pub const SCOPE_TAG: &str = "scope";
pub const APPROACHES_TAG: &str = "serverDetectionApproach";
pub const REPORTING_TAG: &str = "reporting";
pub const FILTERING_TAG: &str = "filtering";
pub const DEFAULT_FILTERING_PATH: &str = "reporting/configuration/filtering";

/// Builds [`DiscoveryScope`]s from configuration.
#[derive(Debug)]
pub struct ScopeLoader<'a> {
    catalog: &'a PluginCatalog,
    ctx: &'a DiscoveryContext,
    overrides: ScopeOverrides,
    observers: Vec<Arc<dyn DiscoveryObserver>>,
}

impl<'a> ScopeLoader<'a> {
    pub fn new(catalog: &'a PluginCatalog, ctx: &'a DiscoveryContext) -> Self {
        Self {
            catalog,
            ctx,
            overrides: ScopeOverrides::default(),
            observers: Vec::new(),
        }
    }

    pub fn with_overrides(mut self, overrides: ScopeOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Attaches `observer` to every scope loaded from now on.
    pub fn with_observer(mut self, observer: Arc<dyn DiscoveryObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Loads every `scope` below `root`, in configuration order.
    ///
    /// `root` is either the `scopes` element or a document containing one.
    pub fn load_all(&self, root: &ConfigNode) -> anyhow::Result<Vec<DiscoveryScope>> {
        let scopes: &ConfigNode = if root.tag == SCOPES_TAG {
            root
        } else {
            root.element(SCOPES_TAG)
                .ok_or_else(|| anyhow!("configuration has no <{SCOPES_TAG}> element"))?
        };

        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut loaded: Vec<DiscoveryScope> = Vec::new();

        for descriptor in scopes.elements_named(SCOPE_TAG) {
            let scope: DiscoveryScope = self.load(descriptor)?;
            if !seen.insert(scope.name().to_string()) {
                bail!("scope '{}' is defined more than once", scope.name());
            }
            loaded.push(scope);
        }

        debug!(scopes = loaded.len(), "loaded discovery scopes");
        Ok(loaded)
    }

    /// Loads a single `scope` element.
    pub fn load(&self, descriptor: &ConfigNode) -> anyhow::Result<DiscoveryScope> {
        let name: &str = descriptor
            .name()
            .ok_or_else(|| missing_name(SCOPE_TAG))
            .context("loading discovery scope")?;

        let approaches: ApproachEngine = self
            .build_approaches(descriptor)
            .with_context(|| format!("building approaches of scope '{name}'"))?;

        let mut acceptors: AcceptorPluginEngine = self
            .build_default_engine(descriptor)
            .with_context(|| format!("building filtering of scope '{name}'"))?;

        for (acceptor_name, acceptor) in self.overrides.acceptors() {
            debug!(scope = name, acceptor = %acceptor_name, "overriding acceptor");
            acceptors.insert(acceptor_name.clone(), Arc::clone(acceptor));
        }

        let mut reporters: ReporterEngine = self
            .build_reporters(descriptor, &acceptors)
            .with_context(|| format!("building reporters of scope '{name}'"))?;

        self.apply_reporter_overrides(name, &mut reporters);

        info!(
            scope = name,
            approaches = approaches.len(),
            acceptors = acceptors.len(),
            reporters = reporters.len(),
            "scope loaded"
        );

        Ok(DiscoveryScope::new(
            name,
            approaches,
            reporters,
            acceptors,
            self.observers.clone(),
        ))
    }

    fn build_approaches(&self, scope: &ConfigNode) -> Result<ApproachEngine, PluginError> {
        let mut engine = ApproachEngine::new();
        let Some(section) = scope.element(APPROACHES_TAG) else {
            return Ok(engine);
        };

        for descriptor in section.elements_named(APPROACH_TAG) {
            let name: &str = descriptor.name().ok_or_else(|| missing_name(APPROACH_TAG))?;
            let factory = match self.catalog.approaches.get(name) {
                Ok(factory) => factory,
                Err(e) => {
                    warn!(approach = name, "{e}, skipping it");
                    continue;
                }
            };
            engine.push(name, factory(descriptor, self.ctx)?);
        }

        Ok(engine)
    }

    fn build_default_engine(&self, scope: &ConfigNode) -> Result<AcceptorPluginEngine, PluginError> {
        let engine: AcceptorPluginEngine = match scope.find(DEFAULT_FILTERING_PATH) {
            Some(filtering) => self.catalog.acceptors.build_engine(filtering, self.ctx)?,
            None => AcceptorPluginEngine::new(),
        };

        if engine.is_empty() {
            debug!(
                managed = %self.ctx.managed_ranges(),
                "no filtering configured, accepting the agent's own ranges only"
            );
            return Ok(AcceptorPluginEngine::new()
                .with(RANGES_PLUGIN, Arc::new(own_ranges_only(self.ctx))));
        }

        Ok(engine)
    }

    fn build_reporters(
        &self,
        scope: &ConfigNode,
        default: &AcceptorPluginEngine,
    ) -> anyhow::Result<ReporterEngine> {
        let mut reporters = ReporterEngine::new();
        let Some(reporting) = scope.element(REPORTING_TAG) else {
            return Ok(reporters);
        };

        for descriptor in reporting.elements_named(REPORTER_TAG) {
            let name: &str = descriptor.name().ok_or_else(|| missing_name(REPORTER_TAG))?;
            let factory = match self.catalog.reporters.get(name) {
                Ok(factory) => factory,
                Err(e) => {
                    warn!(reporter = name, "{e}, skipping it");
                    continue;
                }
            };

            let reporter = factory(descriptor, self.ctx)
                .with_context(|| format!("building reporter '{name}'"))?;
            let acceptors: AcceptorPluginEngine = self
                .narrow(name, descriptor.element(FILTERING_TAG), default)
                .with_context(|| format!("building filtering of reporter '{name}'"))?;

            debug!(reporter = name, acceptors = acceptors.len(), "built reporter");
            reporters.push(ReporterSlot::new(name, reporter, acceptors));
        }

        Ok(reporters)
    }

    /// A reporter's engine: the default engine plus the reporter's own acceptors.
    ///
    /// Every default acceptor is kept, so a reporter never accepts more than the
    /// scope does. Descriptors with content are added under
    /// `<reporter>:<plugin>` and constrain alongside the default acceptor of the
    /// same plugin. Bare descriptors such as `<ranges/>` add nothing.
    fn narrow(
        &self,
        reporter: &str,
        filtering: Option<&ConfigNode>,
        default: &AcceptorPluginEngine,
    ) -> Result<AcceptorPluginEngine, PluginError> {
        let mut engine: AcceptorPluginEngine = default.clone();
        let Some(filtering) = filtering else {
            return Ok(engine);
        };

        for descriptor in filtering.elements().filter(|descriptor| !descriptor.is_empty()) {
            match self.catalog.acceptors.build(descriptor, self.ctx) {
                Ok(acceptor) => {
                    engine.insert(reporter_acceptor_name(reporter, &descriptor.tag), acceptor);
                }
                Err(e) if e.is_unknown_plugin() => {
                    warn!(plugin = %descriptor.tag, "{e}, skipping it");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(engine)
    }

    fn apply_reporter_overrides(&self, scope: &str, reporters: &mut ReporterEngine) {
        for (reporter, acceptors) in self.overrides.reporters() {
            let Some(slot) = reporters.get_mut(reporter) else {
                warn!(scope, reporter = %reporter, "override names a reporter this scope does not have");
                continue;
            };
            for (name, acceptor) in acceptors {
                slot.acceptors_mut().insert(name.clone(), Arc::clone(acceptor));
            }
        }
    }
}

/// Name under which a reporter's own `plugin` acceptor joins the default ones.
pub fn reporter_acceptor_name(reporter: &str, plugin: &str) -> String {
    format!("{reporter}:{plugin}")
}

fn missing_name(tag: &str) -> PluginError {
    PluginError::MissingAttribute {
        tag: tag.to_string(),
        attribute: "name",
    }
}

/// Loads one scope element.
pub fn load_scope(
    descriptor: &ConfigNode,
    catalog: &PluginCatalog,
    ctx: &DiscoveryContext,
    overrides: ScopeOverrides,
) -> anyhow::Result<DiscoveryScope> {
    ScopeLoader::new(catalog, ctx)
        .with_overrides(overrides)
        .load(descriptor)
}

/// Loads every scope below `root`, in configuration order.
pub fn load_scopes(
    root: &ConfigNode,
    catalog: &PluginCatalog,
    ctx: &DiscoveryContext,
    overrides: ScopeOverrides,
) -> anyhow::Result<Vec<DiscoveryScope>> {
    ScopeLoader::new(catalog, ctx)
        .with_overrides(overrides)
        .load_all(root)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
