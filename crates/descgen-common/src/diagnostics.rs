//! Diagnostic types and message lookup.
//!
//! Codes are grouped by phase: 1xxx for scanning and parsing, 5xxx for
//! generation, 6xxx for the command line driver.

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// A diagnostic attached to a span of a source file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
        }
    }

    /// Create a new warning diagnostic.
    #[must_use]
    pub const fn warning(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Warning,
            code,
        }
    }

    /// Create a diagnostic from a registered code, formatting its template with `args`.
    ///
    /// Unknown codes fall back to an error whose text is the joined arguments.
    #[must_use]
    pub fn from_code(file: String, start: u32, length: u32, code: u32, args: &[&str]) -> Self {
        match get_diagnostic_message(code) {
            Some(def) => Self {
                file,
                start,
                length,
                message_text: format_message(def.message, args),
                category: def.category,
                code,
            },
            None => Self::error(file, start, length, args.join(" "), code),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

// =============================================================================
// Codes and Messages
// =============================================================================

pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const EXPECTED: u32 = 1005;
    pub const ASTERISK_SLASH_EXPECTED: u32 = 1010;
    pub const UNTERMINATED_CHARACTER_LITERAL: u32 = 1011;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const DECLARATION_EXPECTED: u32 = 1128;

    pub const DESCRIPTION_ARGUMENT_COUNT: u32 = 5001;
    pub const DESCRIPTION_ARGUMENT_NOT_STRING: u32 = 5002;
    pub const DUPLICATE_HINT_NAME: u32 = 5003;
    pub const ENUM_NOT_RESOLVED: u32 = 5004;

    pub const FILE_NOT_FOUND: u32 = 6053;
    pub const NO_INPUTS_FOUND: u32 = 18003;
}

pub mod diagnostic_messages {
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected.";
    pub const EXPECTED: &str = "'{0}' expected.";
    pub const ASTERISK_SLASH_EXPECTED: &str = "'*/' expected.";
    pub const UNTERMINATED_CHARACTER_LITERAL: &str = "Unterminated character literal.";
    pub const INVALID_CHARACTER: &str = "Invalid character.";
    pub const DECLARATION_EXPECTED: &str = "Declaration expected.";

    pub const DESCRIPTION_ARGUMENT_COUNT: &str =
        "Attribute '{0}' on enum member '{1}' must have exactly one constructor argument, but has {2}.";
    pub const DESCRIPTION_ARGUMENT_NOT_STRING: &str =
        "The argument of attribute '{0}' on enum member '{1}' is not a constant string.";
    pub const DUPLICATE_HINT_NAME: &str =
        "A generated source named '{0}' was already added; the companion for enum '{1}' is skipped.";
    pub const ENUM_NOT_RESOLVED: &str = "Enum '{0}' could not be resolved: {1}";

    pub const FILE_NOT_FOUND: &str = "File '{0}' not found.";
    pub const NO_INPUTS_FOUND: &str = "No inputs were found in the configured locations.";
}

use self::diagnostic_codes as codes;
use self::diagnostic_messages as messages;

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: codes::UNTERMINATED_STRING_LITERAL,
        category: DiagnosticCategory::Error,
        message: messages::UNTERMINATED_STRING_LITERAL,
    },
    DiagnosticMessage {
        code: codes::IDENTIFIER_EXPECTED,
        category: DiagnosticCategory::Error,
        message: messages::IDENTIFIER_EXPECTED,
    },
    DiagnosticMessage {
        code: codes::EXPECTED,
        category: DiagnosticCategory::Error,
        message: messages::EXPECTED,
    },
    DiagnosticMessage {
        code: codes::ASTERISK_SLASH_EXPECTED,
        category: DiagnosticCategory::Error,
        message: messages::ASTERISK_SLASH_EXPECTED,
    },
    DiagnosticMessage {
        code: codes::UNTERMINATED_CHARACTER_LITERAL,
        category: DiagnosticCategory::Error,
        message: messages::UNTERMINATED_CHARACTER_LITERAL,
    },
    DiagnosticMessage {
        code: codes::INVALID_CHARACTER,
        category: DiagnosticCategory::Error,
        message: messages::INVALID_CHARACTER,
    },
    DiagnosticMessage {
        code: codes::DECLARATION_EXPECTED,
        category: DiagnosticCategory::Error,
        message: messages::DECLARATION_EXPECTED,
    },
    DiagnosticMessage {
        code: codes::DESCRIPTION_ARGUMENT_COUNT,
        category: DiagnosticCategory::Error,
        message: messages::DESCRIPTION_ARGUMENT_COUNT,
    },
    DiagnosticMessage {
        code: codes::DESCRIPTION_ARGUMENT_NOT_STRING,
        category: DiagnosticCategory::Error,
        message: messages::DESCRIPTION_ARGUMENT_NOT_STRING,
    },
    DiagnosticMessage {
        code: codes::DUPLICATE_HINT_NAME,
        category: DiagnosticCategory::Error,
        message: messages::DUPLICATE_HINT_NAME,
    },
    DiagnosticMessage {
        code: codes::ENUM_NOT_RESOLVED,
        category: DiagnosticCategory::Error,
        message: messages::ENUM_NOT_RESOLVED,
    },
    DiagnosticMessage {
        code: codes::FILE_NOT_FOUND,
        category: DiagnosticCategory::Error,
        message: messages::FILE_NOT_FOUND,
    },
    DiagnosticMessage {
        code: codes::NO_INPUTS_FOUND,
        category: DiagnosticCategory::Error,
        message: messages::NO_INPUTS_FOUND,
    },
];
