//! Token kinds produced by the scanner.
//!
//! Only the reserved words the declaration parser branches on get their own
//! kind; the rest scan as `OtherKeyword`. Contextual keywords (`record`,
//! `partial`, `file`, `nameof`, `global`, ...) scan as `Identifier` and are
//! recognized by text in the parser.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Names and literals
    Identifier,
    NumericLiteral,
    CharacterLiteral,
    StringLiteral,
    VerbatimStringLiteral,
    RawStringLiteral,
    InterpolatedStringLiteral,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    LessThanToken,
    GreaterThanToken,
    SemicolonToken,
    CommaToken,
    DotToken,
    ColonToken,
    ColonColonToken,
    EqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    QuestionToken,
    ExclamationToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    TildeToken,

    // Keywords the parser dispatches on
    AbstractKeyword,
    ClassKeyword,
    ConstKeyword,
    DefaultKeyword,
    DelegateKeyword,
    EnumKeyword,
    EventKeyword,
    ExternKeyword,
    FalseKeyword,
    InterfaceKeyword,
    InternalKeyword,
    NamespaceKeyword,
    NewKeyword,
    NullKeyword,
    OverrideKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadonlyKeyword,
    RefKeyword,
    SealedKeyword,
    StaticKeyword,
    StructKeyword,
    ThisKeyword,
    TrueKeyword,
    TypeofKeyword,
    UnsafeKeyword,
    UsingKeyword,
    VirtualKeyword,
    VolatileKeyword,
    OtherKeyword,
}

impl SyntaxKind {
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::AbstractKeyword
                | Self::ClassKeyword
                | Self::ConstKeyword
                | Self::DefaultKeyword
                | Self::DelegateKeyword
                | Self::EnumKeyword
                | Self::EventKeyword
                | Self::ExternKeyword
                | Self::FalseKeyword
                | Self::InterfaceKeyword
                | Self::InternalKeyword
                | Self::NamespaceKeyword
                | Self::NewKeyword
                | Self::NullKeyword
                | Self::OverrideKeyword
                | Self::PrivateKeyword
                | Self::ProtectedKeyword
                | Self::PublicKeyword
                | Self::ReadonlyKeyword
                | Self::RefKeyword
                | Self::SealedKeyword
                | Self::StaticKeyword
                | Self::StructKeyword
                | Self::ThisKeyword
                | Self::TrueKeyword
                | Self::TypeofKeyword
                | Self::UnsafeKeyword
                | Self::UsingKeyword
                | Self::VirtualKeyword
                | Self::VolatileKeyword
                | Self::OtherKeyword
        )
    }

    #[must_use]
    pub const fn is_string_literal(self) -> bool {
        matches!(
            self,
            Self::StringLiteral
                | Self::VerbatimStringLiteral
                | Self::RawStringLiteral
                | Self::InterpolatedStringLiteral
        )
    }

    /// Text of a punctuation token, used for `'{0}' expected` diagnostics.
    #[must_use]
    pub const fn punctuation_text(self) -> &'static str {
        match self {
            Self::OpenBraceToken => "{",
            Self::CloseBraceToken => "}",
            Self::OpenParenToken => "(",
            Self::CloseParenToken => ")",
            Self::OpenBracketToken => "[",
            Self::CloseBracketToken => "]",
            Self::LessThanToken => "<",
            Self::GreaterThanToken => ">",
            Self::SemicolonToken => ";",
            Self::CommaToken => ",",
            Self::DotToken => ".",
            Self::ColonToken => ":",
            Self::ColonColonToken => "::",
            Self::EqualsToken => "=",
            Self::EqualsGreaterThanToken => "=>",
            Self::PlusToken => "+",
            Self::MinusToken => "-",
            Self::AsteriskToken => "*",
            Self::SlashToken => "/",
            Self::PercentToken => "%",
            Self::QuestionToken => "?",
            Self::ExclamationToken => "!",
            Self::AmpersandToken => "&",
            Self::BarToken => "|",
            Self::CaretToken => "^",
            Self::TildeToken => "~",
            _ => "",
        }
    }
}

/// Every reserved word of the language, sorted for binary search.
static RESERVED_KEYWORDS: &[&str] = &[
    "abstract",
    "as",
    "base",
    "bool",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "checked",
    "class",
    "const",
    "continue",
    "decimal",
    "default",
    "delegate",
    "do",
    "double",
    "else",
    "enum",
    "event",
    "explicit",
    "extern",
    "false",
    "finally",
    "fixed",
    "float",
    "for",
    "foreach",
    "goto",
    "if",
    "implicit",
    "in",
    "int",
    "interface",
    "internal",
    "is",
    "lock",
    "long",
    "namespace",
    "new",
    "null",
    "object",
    "operator",
    "out",
    "override",
    "params",
    "private",
    "protected",
    "public",
    "readonly",
    "ref",
    "return",
    "sbyte",
    "sealed",
    "short",
    "sizeof",
    "stackalloc",
    "static",
    "string",
    "struct",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "uint",
    "ulong",
    "unchecked",
    "unsafe",
    "ushort",
    "using",
    "virtual",
    "void",
    "volatile",
    "while",
];

/// True when `text` is a reserved word and needs an `@` prefix to be used as an identifier.
#[must_use]
pub fn is_reserved_keyword(text: &str) -> bool {
    RESERVED_KEYWORDS.binary_search(&text).is_ok()
}

/// Map reserved word text to its token kind.
#[must_use]
pub fn keyword_kind(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "abstract" => SyntaxKind::AbstractKeyword,
        "class" => SyntaxKind::ClassKeyword,
        "const" => SyntaxKind::ConstKeyword,
        "default" => SyntaxKind::DefaultKeyword,
        "delegate" => SyntaxKind::DelegateKeyword,
        "enum" => SyntaxKind::EnumKeyword,
        "event" => SyntaxKind::EventKeyword,
        "extern" => SyntaxKind::ExternKeyword,
        "false" => SyntaxKind::FalseKeyword,
        "interface" => SyntaxKind::InterfaceKeyword,
        "internal" => SyntaxKind::InternalKeyword,
        "namespace" => SyntaxKind::NamespaceKeyword,
        "new" => SyntaxKind::NewKeyword,
        "null" => SyntaxKind::NullKeyword,
        "override" => SyntaxKind::OverrideKeyword,
        "private" => SyntaxKind::PrivateKeyword,
        "protected" => SyntaxKind::ProtectedKeyword,
        "public" => SyntaxKind::PublicKeyword,
        "readonly" => SyntaxKind::ReadonlyKeyword,
        "ref" => SyntaxKind::RefKeyword,
        "sealed" => SyntaxKind::SealedKeyword,
        "static" => SyntaxKind::StaticKeyword,
        "struct" => SyntaxKind::StructKeyword,
        "this" => SyntaxKind::ThisKeyword,
        "true" => SyntaxKind::TrueKeyword,
        "typeof" => SyntaxKind::TypeofKeyword,
        "unsafe" => SyntaxKind::UnsafeKeyword,
        "using" => SyntaxKind::UsingKeyword,
        "virtual" => SyntaxKind::VirtualKeyword,
        "volatile" => SyntaxKind::VolatileKeyword,
        _ if is_reserved_keyword(text) => SyntaxKind::OtherKeyword,
        _ => return None,
    };
    Some(kind)
}
