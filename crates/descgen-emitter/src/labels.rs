//! Per-member label resolution.

use descgen_binder::{ConstantValue, ResolvedMember};
use descgen_common::AttributeMatch;

use crate::extension_emitter::GenerateError;

/// Label for `member`: the string argument of its first description
/// attribute, or the member's own name when it has none.
pub fn resolve_label(
    enum_name: &str,
    member: &ResolvedMember,
    attribute_match: AttributeMatch,
) -> Result<String, GenerateError> {
    let Some(attribute) = member
        .attributes
        .iter()
        .find(|attribute| attribute_match.matches_class_name(&attribute.class_name))
    else {
        return Ok(member.name.clone());
    };

    match attribute.constructor_arguments.as_slice() {
        [ConstantValue::String(label)] => Ok(label.clone()),
        [other] => Err(GenerateError::ArgumentNotString {
            enum_name: enum_name.to_string(),
            member: member.name.clone(),
            attribute: attribute.written_name.clone(),
            found: other.kind_name(),
            span: attribute.span,
        }),
        arguments => Err(GenerateError::ArgumentCount {
            enum_name: enum_name.to_string(),
            member: member.name.clone(),
            attribute: attribute.written_name.clone(),
            count: arguments.len(),
            span: attribute.span,
        }),
    }
}
