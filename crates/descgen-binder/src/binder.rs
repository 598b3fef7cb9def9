//! Enum resolution.

use descgen_parser::{
    ArgumentName, Attribute, EnumSite, Identifier, QualifiedName, SourceFile, TypeDeclaration,
};
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, trace};

use crate::accessibility::Accessibility;
use crate::constants::evaluate_constant;
use crate::symbols::{ContainingType, ResolvedAttribute, ResolvedEnumType, ResolvedMember};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("enum '{enum_name}' declares member '{member}' more than once")]
    DuplicateMember { enum_name: String, member: String },
    #[error("enum '{enum_name}' belongs to '{site_file}', not to '{binder_file}'")]
    ForeignSite {
        enum_name: String,
        site_file: String,
        binder_file: String,
    },
}

/// Resolves enum sites of one source file.
pub struct Binder<'a> {
    file: &'a SourceFile,
}

impl<'a> Binder<'a> {
    #[must_use]
    pub const fn new(file: &'a SourceFile) -> Self {
        Self { file }
    }

    /// Resolve every enum in the file, in document order.
    #[must_use]
    pub fn resolve_all(&self) -> Vec<Result<ResolvedEnumType, BindError>> {
        self.file
            .enum_sites()
            .iter()
            .map(|site| self.resolve_enum(site))
            .collect()
    }

    pub fn resolve_enum(&self, site: &EnumSite<'_>) -> Result<ResolvedEnumType, BindError> {
        let declaration = site.declaration;
        if !std::ptr::eq(site.file, self.file) {
            return Err(BindError::ForeignSite {
                enum_name: declaration.name.text.clone(),
                site_file: site.file.file_name.clone(),
                binder_file: self.file.file_name.clone(),
            });
        }

        let namespace = namespace_path(site);
        let containing_types = containing_chain(&site.containing_types);
        let container_kind = site.containing_types.last().map(|ty| ty.kind);
        let declared_accessibility = Accessibility::declared(&declaration.modifiers, container_kind);

        let mut seen = FxHashSet::default();
        let mut members = Vec::with_capacity(declaration.members.len());
        for member in &declaration.members {
            if !seen.insert(member.name.text.as_str()) {
                return Err(BindError::DuplicateMember {
                    enum_name: declaration.name.text.clone(),
                    member: member.name.text.clone(),
                });
            }
            let attributes = member.all_attributes().map(resolve_attribute).collect();
            members.push(ResolvedMember {
                name: member.name.text.clone(),
                attributes,
                span: member.span,
            });
        }

        debug!(
            file = %self.file.file_name,
            enum_name = %declaration.name.text,
            namespace = namespace.as_deref().unwrap_or("<global>"),
            depth = containing_types.len(),
            accessibility = %declared_accessibility,
            "resolved enum"
        );

        Ok(ResolvedEnumType {
            name: declaration.name.text.clone(),
            namespace,
            containing_types,
            declared_accessibility,
            members,
            file_name: self.file.file_name.clone(),
            name_span: declaration.name.span,
        })
    }
}

fn namespace_path(site: &EnumSite<'_>) -> Option<String> {
    let segments: Vec<&str> = site
        .namespaces
        .iter()
        .flat_map(|namespace| namespace.name.segments.iter())
        .map(|segment| segment.text.as_str())
        .collect();
    (!segments.is_empty()).then(|| segments.join("."))
}

fn containing_chain(types: &[&TypeDeclaration]) -> Vec<ContainingType> {
    let mut container = None;
    let mut chain = Vec::with_capacity(types.len());
    for ty in types {
        chain.push(ContainingType {
            name: ty.name.text.clone(),
            kind: ty.kind,
            type_parameters: ty.type_parameters.iter().map(|p| p.text.clone()).collect(),
            accessibility: Accessibility::declared(&ty.modifiers, container),
        });
        container = Some(ty.kind);
    }
    chain
}

fn resolve_attribute(attribute: &Attribute) -> ResolvedAttribute {
    let mut constructor_arguments = Vec::new();
    let mut named_arguments = Vec::new();
    for argument in attribute.arguments.iter().flatten() {
        let value = evaluate_constant(&argument.expression);
        match &argument.name {
            Some(ArgumentName::Equals(name)) => named_arguments.push((name.text.clone(), value)),
            Some(ArgumentName::Colon(_)) | None => constructor_arguments.push(value),
        }
    }

    let class_name = resolve_attribute_class_name(&attribute.name);
    trace!(written = %attribute.name.text, class_name = %class_name, "resolved attribute");
    ResolvedAttribute {
        class_name,
        written_name: attribute.name.text.clone(),
        constructor_arguments,
        named_arguments,
        span: attribute.span,
    }
}

/// Class name an attribute reference binds to: the right-most segment,
/// with `Attribute` appended unless already present or the name is
/// written verbatim (`@Description`).
#[must_use]
pub fn resolve_attribute_class_name(name: &QualifiedName) -> String {
    match name.last() {
        Some(segment) => attribute_class_name(segment),
        None => name.text.clone(),
    }
}

fn attribute_class_name(segment: &Identifier) -> String {
    if segment.is_verbatim || segment.text.ends_with("Attribute") {
        segment.text.clone()
    } else {
        format!("{}Attribute", segment.text)
    }
}
