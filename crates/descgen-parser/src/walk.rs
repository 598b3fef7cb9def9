//! Pre-order walk over enum declarations.

use crate::ast::{Declaration, EnumDeclaration, NamespaceDeclaration, SourceFile, TypeDeclaration};

/// An enum declaration together with everything that encloses it.
#[derive(Clone, Debug)]
pub struct EnumSite<'a> {
    pub file: &'a SourceFile,
    /// Enclosing namespace declarations, outermost first.
    pub namespaces: Vec<&'a NamespaceDeclaration>,
    /// Enclosing type declarations, outermost first.
    pub containing_types: Vec<&'a TypeDeclaration>,
    pub declaration: &'a EnumDeclaration,
}

impl EnumSite<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.declaration.name.text
    }

    #[must_use]
    pub const fn is_nested(&self) -> bool {
        !self.containing_types.is_empty()
    }
}

impl SourceFile {
    /// Every enum declaration in the file, in document order.
    #[must_use]
    pub fn enum_sites(&self) -> Vec<EnumSite<'_>> {
        let mut walker = Walker {
            file: self,
            namespaces: Vec::new(),
            containing_types: Vec::new(),
            sites: Vec::new(),
        };
        walker.visit_members(&self.members);
        walker.sites
    }
}

struct Walker<'a> {
    file: &'a SourceFile,
    namespaces: Vec<&'a NamespaceDeclaration>,
    containing_types: Vec<&'a TypeDeclaration>,
    sites: Vec<EnumSite<'a>>,
}

impl<'a> Walker<'a> {
    fn visit_members(&mut self, members: &'a [Declaration]) {
        for member in members {
            match member {
                Declaration::Namespace(namespace) => {
                    self.namespaces.push(namespace);
                    self.visit_members(&namespace.members);
                    self.namespaces.pop();
                }
                Declaration::Type(ty) => {
                    self.containing_types.push(ty);
                    self.visit_members(&ty.members);
                    self.containing_types.pop();
                }
                Declaration::Enum(declaration) => self.sites.push(EnumSite {
                    file: self.file,
                    namespaces: self.namespaces.clone(),
                    containing_types: self.containing_types.clone(),
                    declaration,
                }),
            }
        }
    }
}
