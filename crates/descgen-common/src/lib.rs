//! Common types and utilities for the descgen generator.
//!
//! This crate provides foundational types used across all descgen crates:
//! - Source spans (`Span`)
//! - Line/column positions (`LineMap`, `Position`)
//! - Shared enums (`NewLineKind`, `AttributeMatch`)
//! - Diagnostics and message templates

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Common types shared by the emitter and the CLI
pub mod common;
pub use common::{AttributeMatch, NewLineKind};

// Diagnostics, codes and message templates
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

#[cfg(test)]
#[path = "tests/common_tests.rs"]
mod common_tests;
