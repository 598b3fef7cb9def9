//! Resolved enum model handed to the emitter.

use descgen_common::Span;
use descgen_parser::TypeKind;

use crate::accessibility::Accessibility;
use crate::constants::ConstantValue;

/// An enum with everything generation needs, detached from the syntax tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedEnumType {
    pub name: String,
    /// Dotted namespace path; `None` for the global namespace.
    pub namespace: Option<String>,
    /// Enclosing types, outermost first.
    pub containing_types: Vec<ContainingType>,
    pub declared_accessibility: Accessibility,
    /// Members in declaration order.
    pub members: Vec<ResolvedMember>,
    pub file_name: String,
    /// Span of the enum's identifier.
    pub name_span: Span,
}

impl ResolvedEnumType {
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        !self.containing_types.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainingType {
    pub name: String,
    pub kind: TypeKind,
    pub type_parameters: Vec<String>,
    pub accessibility: Accessibility,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedMember {
    pub name: String,
    pub attributes: Vec<ResolvedAttribute>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAttribute {
    /// Attribute class the written name binds to, e.g. `DescriptionAttribute`.
    pub class_name: String,
    /// Name as written, e.g. `System.ComponentModel.Description`.
    pub written_name: String,
    /// Positional and `name:` arguments in source order.
    pub constructor_arguments: Vec<ConstantValue>,
    /// `Name = value` property assignments.
    pub named_arguments: Vec<(String, ConstantValue)>,
    pub span: Span,
}
