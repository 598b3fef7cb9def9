//! Declared accessibility of types.

use std::fmt;

use descgen_parser::{Modifiers, TypeKind, modifier_flags};

/// Accessibility levels ordered from most to least restrictive.
///
/// The ordering is total: combining two levels keeps the smaller one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Accessibility {
    Private = 1,
    ProtectedAndInternal = 2,
    Protected = 3,
    Internal = 4,
    ProtectedOrInternal = 5,
    Public = 6,
}

impl Accessibility {
    /// Accessibility spelled by `modifiers`, if any.
    #[must_use]
    pub const fn from_modifiers(modifiers: &Modifiers) -> Option<Self> {
        let private = modifiers.has(modifier_flags::PRIVATE);
        let protected = modifiers.has(modifier_flags::PROTECTED);
        let internal = modifiers.has(modifier_flags::INTERNAL);

        if modifiers.has(modifier_flags::PUBLIC) {
            Some(Self::Public)
        } else if private && protected {
            Some(Self::ProtectedAndInternal)
        } else if protected && internal {
            Some(Self::ProtectedOrInternal)
        } else if private {
            Some(Self::Private)
        } else if protected {
            Some(Self::Protected)
        } else if internal || modifiers.has(modifier_flags::FILE) {
            Some(Self::Internal)
        } else {
            None
        }
    }

    /// Accessibility of a type declared without an accessibility modifier.
    ///
    /// `container` is the kind of the directly enclosing type, `None` at
    /// namespace level.
    #[must_use]
    pub const fn default_for(container: Option<TypeKind>) -> Self {
        match container {
            None => Self::Internal,
            Some(TypeKind::Interface) => Self::Public,
            Some(_) => Self::Private,
        }
    }

    /// Declared accessibility, falling back to the default for `container`.
    #[must_use]
    pub const fn declared(modifiers: &Modifiers, container: Option<TypeKind>) -> Self {
        match Self::from_modifiers(modifiers) {
            Some(accessibility) => accessibility,
            None => Self::default_for(container),
        }
    }

    /// The more restrictive of `self` and `other`.
    #[must_use]
    pub fn restrict(self, other: Self) -> Self {
        self.min(other)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::ProtectedAndInternal => "private protected",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::ProtectedOrInternal => "protected internal",
            Self::Public => "public",
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
