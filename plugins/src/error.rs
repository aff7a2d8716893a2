use std::fmt;

use scopr_common::GrammarError;
use thiserror::Error;

/// Which registry a plugin name was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    Acceptor,
    Approach,
    Reporter,
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            PluginKind::Acceptor => "acceptor",
            PluginKind::Approach => "approach",
            PluginKind::Reporter => "reporter",
        };
        f.write_str(kind)
    }
}

#[derive(Debug, Error)]
pub enum PluginError {
    /// Logged and skipped by callers; the rest of the scope still loads.
    #[error("no {kind} plugin registered under '{name}'")]
    UnknownPlugin { kind: PluginKind, name: String },

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error("<{tag}> element has no {attribute}")]
    MissingAttribute { tag: String, attribute: &'static str },
}

impl PluginError {
    pub fn unknown(kind: PluginKind, name: impl Into<String>) -> Self {
        PluginError::UnknownPlugin {
            kind,
            name: name.into(),
        }
    }

    pub fn is_unknown_plugin(&self) -> bool {
        matches!(self, PluginError::UnknownPlugin { .. })
    }
}
