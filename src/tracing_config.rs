//! Log output for the `descgen` binary.
//!
//! `DESCGEN_LOG` (or `RUST_LOG`) holds `EnvFilter` directives, e.g.
//! `DESCGEN_LOG=descgen::selector=debug` to see why an enum was skipped.
//! `DESCGEN_LOG_FORMAT` picks `text` (default), `tree` or `json`.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a `DESCGEN_LOG_FORMAT` value. Unknown values select `Text`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("DESCGEN_LOG_FORMAT").unwrap_or_default())
    }
}

/// `DESCGEN_LOG` wins over `RUST_LOG`; `None` when neither is set.
fn filter_from_env() -> Option<EnvFilter> {
    match std::env::var("DESCGEN_LOG") {
        Ok(directives) => Some(EnvFilter::builder().parse_lossy(directives)),
        Err(_) if std::env::var_os("RUST_LOG").is_some() => Some(EnvFilter::from_default_env()),
        Err(_) => None,
    }
}

/// Install the global subscriber. All output goes to stderr; stdout carries
/// generated sources.
pub fn init_tracing() {
    let Some(filter) = filter_from_env() else {
        return;
    };
    let registry = Registry::default().with(filter);

    match LogFormat::from_env() {
        // Passes open one span each, so plain indentation is enough
        LogFormat::Tree => registry
            .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
    }
}
