//! Names used in generated sources.

use std::borrow::Cow;

use descgen_binder::ResolvedEnumType;
use descgen_scanner::is_reserved_keyword;

/// Prefix reserved words with `@` so they stay identifiers.
#[must_use]
pub fn escape_identifier(name: &str) -> Cow<'_, str> {
    if is_reserved_keyword(name) {
        Cow::Owned(format!("@{name}"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Dotted name with every segment escaped.
#[must_use]
pub fn escape_dotted_name(name: &str) -> String {
    name.split('.')
        .map(escape_identifier)
        .collect::<Vec<_>>()
        .join(".")
}

/// The enum's name qualified by its containing types, with their type
/// parameter lists: `Outer<T>.Inner.Color`. Namespaces are not included.
#[must_use]
pub fn qualified_type_name(resolved: &ResolvedEnumType) -> String {
    let mut name = String::new();
    for containing in &resolved.containing_types {
        name.push_str(&escape_identifier(&containing.name));
        if !containing.type_parameters.is_empty() {
            let parameters: Vec<Cow<'_, str>> = containing
                .type_parameters
                .iter()
                .map(|parameter| escape_identifier(parameter))
                .collect();
            name.push('<');
            name.push_str(&parameters.join(", "));
            name.push('>');
        }
        name.push('.');
    }
    name.push_str(&escape_identifier(&resolved.name));
    name
}

/// `{Enum}Extensions`
#[must_use]
pub fn extensions_class_name(resolved: &ResolvedEnumType) -> String {
    format!("{}Extensions", resolved.name)
}

/// `{Enum}_Extensions_Class`, the key a generated source is added under.
#[must_use]
pub fn hint_name(resolved: &ResolvedEnumType) -> String {
    format!("{}_Extensions_Class", resolved.name)
}
