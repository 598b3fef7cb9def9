//! Parser state and token helpers.
//!
//! Parsing methods are split across:
//! - `state_declarations` - compilation unit, namespaces, types, enums
//! - `state_attributes` - attribute lists and argument expressions

mod state_attributes;
mod state_declarations;

use descgen_common::Span;
use descgen_common::diagnostics::{diagnostic_codes, format_message, get_message_template};
use descgen_scanner::{ScannerState, SyntaxKind};

use crate::ast::{Identifier, SourceFile};

/// Guard against stack overflow on pathological nesting.
const MAX_RECURSION_DEPTH: u32 = 256;

/// A syntax error found while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) file_name: String,
    pub(crate) current_token: SyntaxKind,
    /// End offset of the previously consumed token.
    pub(crate) previous_token_end: u32,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) recursion_depth: u32,
}

/// Parse `text` and return the tree together with its diagnostics.
#[must_use]
pub fn parse_source(file_name: impl Into<String>, text: impl Into<String>) -> (SourceFile, Vec<ParseDiagnostic>) {
    let mut parser = ParserState::new(file_name.into(), text.into());
    let source_file = parser.parse_source_file();
    (source_file, parser.take_diagnostics())
}

impl ParserState {
    #[must_use]
    pub fn new(file_name: String, source_text: String) -> Self {
        Self {
            scanner: ScannerState::new(source_text),
            file_name,
            current_token: SyntaxKind::Unknown,
            previous_token_end: 0,
            parse_diagnostics: Vec::new(),
            recursion_depth: 0,
        }
    }

    #[must_use]
    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<ParseDiagnostic> {
        std::mem::take(&mut self.parse_diagnostics)
    }

    #[must_use]
    pub fn source_text(&self) -> &str {
        self.scanner.source_text()
    }

    // =========================================================================
    // Token Helpers
    // =========================================================================

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.previous_token_end = self.token_end();
        self.current_token = self.scanner.scan();
        self.current_token
    }

    pub(crate) const fn token(&self) -> SyntaxKind {
        self.current_token
    }

    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    /// Current token is the identifier `text` (contextual keyword check).
    pub(crate) fn is_identifier_text(&self, text: &str) -> bool {
        self.current_token == SyntaxKind::Identifier
            && !self.scanner.is_verbatim_identifier()
            && self.scanner.get_token_value() == text
    }

    pub(crate) fn token_start(&self) -> u32 {
        u32_from_usize(self.scanner.get_token_start())
    }

    pub(crate) fn token_end(&self) -> u32 {
        u32_from_usize(self.scanner.get_token_end())
    }

    pub(crate) fn token_span(&self) -> Span {
        Span::new(self.token_start(), self.token_end())
    }

    pub(crate) fn token_text(&self) -> String {
        self.scanner.get_token_text().to_string()
    }

    pub(crate) fn token_value(&self) -> String {
        self.scanner.get_token_value().to_string()
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report `'x' expected` at the current token.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        self.error_at_current_token(diagnostic_codes::EXPECTED, &[kind.punctuation_text()]);
        false
    }

    /// Run `f` speculatively and rewind the scanner afterwards.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.scanner.snapshot();
        let saved_token = self.current_token;
        let saved_previous_end = self.previous_token_end;
        let diagnostics_len = self.parse_diagnostics.len();
        let result = f(self);
        self.scanner.restore(snapshot);
        self.current_token = saved_token;
        self.previous_token_end = saved_previous_end;
        self.parse_diagnostics.truncate(diagnostics_len);
        result
    }

    /// Kind of the token after the current one.
    pub(crate) fn peek_token(&mut self) -> SyntaxKind {
        self.look_ahead(|p| p.next_token())
    }

    pub(crate) fn parse_identifier(&mut self) -> Option<Identifier> {
        if !self.is_token(SyntaxKind::Identifier) {
            self.error_at_current_token(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
            return None;
        }
        let identifier = Identifier {
            text: self.token_value(),
            is_verbatim: self.scanner.is_verbatim_identifier(),
            span: self.token_span(),
        };
        self.next_token();
        Some(identifier)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn error_at_current_token(&mut self, code: u32, args: &[&str]) {
        let start = self.token_start();
        let length = self.token_end().saturating_sub(start);
        self.error_at(start, length, code, args);
    }

    pub(crate) fn error_at(&mut self, start: u32, length: u32, code: u32, args: &[&str]) {
        // One diagnostic per position keeps recovery from cascading
        if self.parse_diagnostics.last().is_some_and(|d| d.start == start) {
            return;
        }
        let message = get_message_template(code)
            .map(|template| format_message(template, args))
            .unwrap_or_default();
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message,
            code,
        });
    }

    /// Move scanner diagnostics into the parse diagnostics, sorted by position.
    pub(crate) fn collect_scanner_diagnostics(&mut self) {
        for diag in self.scanner.take_diagnostics() {
            let message = get_message_template(diag.code).unwrap_or_default().to_string();
            self.parse_diagnostics.push(ParseDiagnostic {
                start: u32_from_usize(diag.pos),
                length: u32_from_usize(diag.length),
                message,
                code: diag.code,
            });
        }
        self.parse_diagnostics.sort_by_key(|d| d.start);
    }

    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }
}

pub(crate) fn u32_from_usize(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
