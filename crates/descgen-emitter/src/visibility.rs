//! Visibility of the generated class.

use descgen_binder::{Accessibility, ResolvedEnumType};

/// The most restrictive accessibility across the enum and every type
/// enclosing it.
#[must_use]
pub fn effective_accessibility(resolved: &ResolvedEnumType) -> Accessibility {
    resolved
        .containing_types
        .iter()
        .fold(resolved.declared_accessibility, |effective, containing| {
            effective.restrict(containing.accessibility)
        })
}

/// Modifier keyword for the generated class.
///
/// Private, private protected and protected all map to `protected`.
#[must_use]
pub const fn visibility_keyword(accessibility: Accessibility) -> &'static str {
    match accessibility {
        Accessibility::Public => "public",
        Accessibility::Internal | Accessibility::ProtectedOrInternal => "internal",
        Accessibility::Private | Accessibility::ProtectedAndInternal | Accessibility::Protected => {
            "protected"
        }
    }
}
