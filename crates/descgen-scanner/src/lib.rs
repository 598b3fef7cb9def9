//! C# scanner/tokenizer for the descgen generator.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `is_reserved_keyword` - Reserved word lookup, shared with the emitter

pub mod syntax_kind;
pub use syntax_kind::{SyntaxKind, is_reserved_keyword, keyword_kind};

pub mod scanner;
pub use scanner::{ScannerDiagnostic, ScannerSnapshot, ScannerState, token_flags};

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
