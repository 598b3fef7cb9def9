//! Syntax tree types.
//!
//! The tree only models what the generator needs; everything else in a
//! source file is skipped during parsing.

use descgen_common::Span;
use smallvec::SmallVec;

// =============================================================================
// Modifiers
// =============================================================================

pub mod modifier_flags {
    pub const NONE: u32 = 0;
    pub const PUBLIC: u32 = 1 << 0;
    pub const PRIVATE: u32 = 1 << 1;
    pub const PROTECTED: u32 = 1 << 2;
    pub const INTERNAL: u32 = 1 << 3;
    pub const FILE: u32 = 1 << 4;
    pub const STATIC: u32 = 1 << 5;
    pub const SEALED: u32 = 1 << 6;
    pub const ABSTRACT: u32 = 1 << 7;
    pub const PARTIAL: u32 = 1 << 8;
    pub const READONLY: u32 = 1 << 9;
    pub const REF: u32 = 1 << 10;
    pub const UNSAFE: u32 = 1 << 11;
    pub const NEW: u32 = 1 << 12;
    pub const VIRTUAL: u32 = 1 << 13;
    pub const OVERRIDE: u32 = 1 << 14;
    pub const EXTERN: u32 = 1 << 15;
    pub const CONST: u32 = 1 << 16;
    pub const VOLATILE: u32 = 1 << 17;
    pub const REQUIRED: u32 = 1 << 18;
    pub const ASYNC: u32 = 1 << 19;

    pub const ACCESSIBILITY: u32 = PUBLIC | PRIVATE | PROTECTED | INTERNAL | FILE;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub flags: u32,
    pub span: Span,
}

impl Modifiers {
    #[must_use]
    pub const fn has(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }

    #[must_use]
    pub const fn has_accessibility(&self) -> bool {
        self.flags & modifier_flags::ACCESSIBILITY != 0
    }
}

// =============================================================================
// Names
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier {
    /// Name without the `@` prefix.
    pub text: String,
    /// Written as `@name`.
    pub is_verbatim: bool,
    pub span: Span,
}

impl Identifier {
    #[must_use]
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            is_verbatim: false,
            span,
        }
    }
}

/// A possibly qualified name such as `global::System.ComponentModel.Description`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QualifiedName {
    /// `global` in `global::X`, or an `extern alias` name.
    pub alias: Option<Identifier>,
    pub segments: SmallVec<[Identifier; 2]>,
    /// Source text of the name with trivia removed.
    pub text: String,
    pub span: Span,
}

impl QualifiedName {
    /// Right-most segment.
    #[must_use]
    pub fn last(&self) -> Option<&Identifier> {
        self.segments.last()
    }
}

// =============================================================================
// Attributes
// =============================================================================

/// `[target: A(args), B]`
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeList {
    pub target: Option<String>,
    pub attributes: Vec<Attribute>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: QualifiedName,
    /// `None` when the attribute is written without parentheses.
    pub arguments: Option<Vec<AttributeArgument>>,
    pub span: Span,
}

impl Attribute {
    /// Number of written arguments, named ones included.
    #[must_use]
    pub fn argument_count(&self) -> usize {
        self.arguments.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArgumentName {
    /// `Name = value`, assigns a property or field of the attribute.
    Equals(Identifier),
    /// `name: value`, names a constructor parameter.
    Colon(Identifier),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AttributeArgument {
    pub name: Option<ArgumentName>,
    pub expression: Expression,
    pub span: Span,
}

impl AttributeArgument {
    /// Positional and `name:` arguments bind to constructor parameters.
    #[must_use]
    pub const fn is_constructor_argument(&self) -> bool {
        !matches!(self.name, Some(ArgumentName::Equals(_)))
    }
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringLiteralKind {
    Regular,
    Verbatim,
    Raw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
    Complement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    BitwiseAnd,
    BitwiseOr,
    ExclusiveOr,
}

/// Attribute argument expression.
///
/// Shapes an attribute argument can legally take are modeled; anything else
/// is kept as `Other` with its source text.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    String {
        value: String,
        kind: StringLiteralKind,
    },
    InterpolatedString(String),
    Character(String),
    Number(String),
    Boolean(bool),
    Null,
    Default,
    Name(QualifiedName),
    NameOf(Box<Expression>),
    TypeOf(String),
    Parenthesized(Box<Expression>),
    Cast {
        target: String,
        operand: Box<Expression>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    Other(String),
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct SourceFile {
    pub file_name: String,
    pub members: Vec<Declaration>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Declaration {
    Namespace(NamespaceDeclaration),
    Type(TypeDeclaration),
    Enum(EnumDeclaration),
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamespaceDeclaration {
    pub name: QualifiedName,
    /// `namespace A.B;` form.
    pub is_file_scoped: bool,
    pub members: Vec<Declaration>,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Record,
    RecordStruct,
}

impl TypeKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Record => "record",
            Self::RecordStruct => "record struct",
        }
    }
}

/// Class, struct, interface or record declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDeclaration {
    pub kind: TypeKind,
    pub attributes: Vec<AttributeList>,
    pub modifiers: Modifiers,
    pub name: Identifier,
    pub type_parameters: Vec<Identifier>,
    /// Nested type declarations; other members are not kept.
    pub members: Vec<Declaration>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumDeclaration {
    pub attributes: Vec<AttributeList>,
    pub modifiers: Modifiers,
    pub name: Identifier,
    /// Underlying type text after `:`.
    pub base_type: Option<String>,
    pub members: Vec<EnumMemberDeclaration>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumMemberDeclaration {
    pub attributes: Vec<AttributeList>,
    pub name: Identifier,
    /// Initializer source text after `=`.
    pub initializer: Option<String>,
    pub span: Span,
}

impl EnumMemberDeclaration {
    /// All attributes across every attribute list, in source order.
    pub fn all_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().flat_map(|list| list.attributes.iter())
    }
}
