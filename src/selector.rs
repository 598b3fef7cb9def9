//! Candidate selection.
//!
//! An enum is a candidate when every one of its members carries a
//! description attribute written with exactly one argument. Named arguments
//! count towards that one; an attribute written without parentheses has
//! none. Enums without members qualify. Anything else is skipped silently.

use descgen_common::AttributeMatch;
use descgen_parser::{EnumDeclaration, EnumMemberDeclaration, EnumSite};
use tracing::debug;

/// Keep the enum sites whose members are all described, in input order.
pub fn find_qualifying_enums<'a>(
    sites: impl IntoIterator<Item = EnumSite<'a>>,
    attribute_match: AttributeMatch,
) -> Vec<EnumSite<'a>> {
    sites
        .into_iter()
        .filter(|site| {
            let qualifies = is_described_enum(site.declaration, attribute_match);
            if !qualifies {
                debug!(
                    file = %site.file.file_name,
                    enum_name = site.name(),
                    "skipping enum with undescribed members"
                );
            }
            qualifies
        })
        .collect()
}

#[must_use]
pub fn is_described_enum(declaration: &EnumDeclaration, attribute_match: AttributeMatch) -> bool {
    declaration
        .members
        .iter()
        .all(|member| is_described_member(member, attribute_match))
}

fn is_described_member(member: &EnumMemberDeclaration, attribute_match: AttributeMatch) -> bool {
    member.all_attributes().any(|attribute| {
        attribute_match.matches_written_name(&attribute.name.text) && attribute.argument_count() == 1
    })
}
