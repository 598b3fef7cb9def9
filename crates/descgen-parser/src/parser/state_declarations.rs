//! Compilation unit, namespace, type and enum declarations.

use descgen_common::Span;
use descgen_common::diagnostics::diagnostic_codes;
use descgen_scanner::SyntaxKind;
use tracing::trace;

use super::ParserState;
use crate::ast::{
    AttributeList, Declaration, EnumDeclaration, EnumMemberDeclaration, Identifier, Modifiers,
    NamespaceDeclaration, SourceFile, TypeDeclaration, TypeKind, modifier_flags,
};

/// Where a member declaration appears.
#[derive(Clone, Copy, PartialEq, Eq)]
enum MemberContext {
    /// Compilation unit or file-scoped namespace: runs to end of file.
    TopLevel,
    /// Block namespace body.
    Namespace,
    /// Class, struct, interface or record body.
    TypeBody,
}

impl ParserState {
    // =========================================================================
    // Source File
    // =========================================================================

    /// Parse the whole file.
    pub fn parse_source_file(&mut self) -> SourceFile {
        self.next_token();
        let members = self.parse_members(MemberContext::TopLevel);
        self.collect_scanner_diagnostics();
        let end = super::u32_from_usize(self.source_text().len());
        trace!(
            file = %self.file_name,
            members = members.len(),
            diagnostics = self.parse_diagnostics.len(),
            "parsed source file"
        );
        SourceFile {
            file_name: self.file_name.clone(),
            members,
            span: Span::new(0, end),
        }
    }

    fn parse_members(&mut self, context: MemberContext) -> Vec<Declaration> {
        let mut members = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CloseBraceToken if context != MemberContext::TopLevel => break,
                SyntaxKind::CloseBraceToken => {
                    self.error_at_current_token(diagnostic_codes::DECLARATION_EXPECTED, &[]);
                    self.next_token();
                }
                _ => {
                    if let Some(declaration) = self.parse_member_declaration(context) {
                        members.push(declaration);
                    }
                }
            }
        }
        members
    }

    fn parse_member_declaration(&mut self, context: MemberContext) -> Option<Declaration> {
        let start = self.token_start();
        let attributes = self.parse_attribute_lists();
        let modifiers = self.parse_modifiers();

        match self.token() {
            SyntaxKind::NamespaceKeyword if context != MemberContext::TypeBody => {
                self.parse_namespace_declaration(start).map(Declaration::Namespace)
            }
            SyntaxKind::ClassKeyword => {
                self.next_token();
                self.parse_type_declaration(TypeKind::Class, attributes, modifiers, start)
                    .map(Declaration::Type)
            }
            SyntaxKind::StructKeyword => {
                self.next_token();
                self.parse_type_declaration(TypeKind::Struct, attributes, modifiers, start)
                    .map(Declaration::Type)
            }
            SyntaxKind::InterfaceKeyword => {
                self.next_token();
                self.parse_type_declaration(TypeKind::Interface, attributes, modifiers, start)
                    .map(Declaration::Type)
            }
            SyntaxKind::Identifier if self.is_start_of_record() => {
                self.next_token();
                let kind = if self.parse_optional(SyntaxKind::StructKeyword) {
                    TypeKind::RecordStruct
                } else {
                    self.parse_optional(SyntaxKind::ClassKeyword);
                    TypeKind::Record
                };
                self.parse_type_declaration(kind, attributes, modifiers, start)
                    .map(Declaration::Type)
            }
            SyntaxKind::EnumKeyword => {
                self.next_token();
                self.parse_enum_declaration(attributes, modifiers, start)
                    .map(Declaration::Enum)
            }
            _ => {
                self.skip_member();
                None
            }
        }
    }

    fn is_start_of_record(&mut self) -> bool {
        self.is_identifier_text("record")
            && matches!(
                self.peek_token(),
                SyntaxKind::Identifier | SyntaxKind::ClassKeyword | SyntaxKind::StructKeyword
            )
    }

    // =========================================================================
    // Modifiers
    // =========================================================================

    pub(crate) fn parse_modifiers(&mut self) -> Modifiers {
        let start = self.token_start();
        let mut end = start;
        let mut flags = modifier_flags::NONE;
        loop {
            let flag = match self.token() {
                SyntaxKind::PublicKeyword => modifier_flags::PUBLIC,
                SyntaxKind::PrivateKeyword => modifier_flags::PRIVATE,
                SyntaxKind::ProtectedKeyword => modifier_flags::PROTECTED,
                SyntaxKind::InternalKeyword => modifier_flags::INTERNAL,
                SyntaxKind::StaticKeyword => modifier_flags::STATIC,
                SyntaxKind::SealedKeyword => modifier_flags::SEALED,
                SyntaxKind::AbstractKeyword => modifier_flags::ABSTRACT,
                SyntaxKind::ReadonlyKeyword => modifier_flags::READONLY,
                SyntaxKind::RefKeyword => modifier_flags::REF,
                SyntaxKind::UnsafeKeyword => modifier_flags::UNSAFE,
                SyntaxKind::NewKeyword => modifier_flags::NEW,
                SyntaxKind::VirtualKeyword => modifier_flags::VIRTUAL,
                SyntaxKind::OverrideKeyword => modifier_flags::OVERRIDE,
                SyntaxKind::ExternKeyword => modifier_flags::EXTERN,
                SyntaxKind::ConstKeyword => modifier_flags::CONST,
                SyntaxKind::VolatileKeyword => modifier_flags::VOLATILE,
                SyntaxKind::Identifier => match self.contextual_modifier() {
                    Some(flag) => flag,
                    None => break,
                },
                _ => break,
            };
            flags |= flag;
            end = self.token_end();
            self.next_token();
        }
        Modifiers {
            flags,
            span: Span::new(start, end.max(start)),
        }
    }

    /// `partial`, `file`, `required` and `async` only act as modifiers
    /// when another keyword or name follows.
    fn contextual_modifier(&mut self) -> Option<u32> {
        if self.scanner.is_verbatim_identifier() {
            return None;
        }
        let flag = match self.scanner.get_token_value() {
            "partial" => modifier_flags::PARTIAL,
            "file" => modifier_flags::FILE,
            "required" => modifier_flags::REQUIRED,
            "async" => modifier_flags::ASYNC,
            _ => return None,
        };
        let next = self.peek_token();
        (next == SyntaxKind::Identifier || next.is_keyword()).then_some(flag)
    }

    // =========================================================================
    // Namespaces
    // =========================================================================

    fn parse_namespace_declaration(&mut self, start: u32) -> Option<NamespaceDeclaration> {
        self.next_token();
        let Some(name) = self.parse_qualified_name() else {
            self.skip_member();
            return None;
        };

        if self.parse_optional(SyntaxKind::SemicolonToken) {
            let members = self.parse_members(MemberContext::TopLevel);
            let end = super::u32_from_usize(self.source_text().len());
            return Some(NamespaceDeclaration {
                name,
                is_file_scoped: true,
                members,
                span: Span::new(start, end),
            });
        }

        let members = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let members = self.parse_members(MemberContext::Namespace);
            self.parse_expected(SyntaxKind::CloseBraceToken);
            members
        } else {
            Vec::new()
        };
        let end = self.previous_token_end.max(start);
        self.parse_optional(SyntaxKind::SemicolonToken);
        Some(NamespaceDeclaration {
            name,
            is_file_scoped: false,
            members,
            span: Span::new(start, end),
        })
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Parse a class, struct, interface or record after its keyword.
    fn parse_type_declaration(
        &mut self,
        kind: TypeKind,
        attributes: Vec<AttributeList>,
        modifiers: Modifiers,
        start: u32,
    ) -> Option<TypeDeclaration> {
        let Some(name) = self.parse_identifier() else {
            self.skip_member();
            return None;
        };
        let type_parameters = if self.is_token(SyntaxKind::LessThanToken) {
            self.parse_type_parameter_list()
        } else {
            Vec::new()
        };

        // Primary constructor, base list and constraints are not modeled
        self.skip_type_header();

        let mut members = Vec::new();
        if self.parse_optional(SyntaxKind::OpenBraceToken) {
            if self.enter_recursion() {
                members = self.parse_members(MemberContext::TypeBody);
                self.exit_recursion();
            } else {
                self.skip_balanced_until_close_brace();
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
            let end = self.previous_token_end.max(start);
            self.parse_optional(SyntaxKind::SemicolonToken);
            return Some(TypeDeclaration {
                kind,
                attributes,
                modifiers,
                name,
                type_parameters,
                members,
                span: Span::new(start, end),
            });
        }

        // `record R(int X);` has no body
        if !self.parse_optional(SyntaxKind::SemicolonToken) {
            self.error_at_current_token(diagnostic_codes::EXPECTED, &["{"]);
        }
        let end = self.previous_token_end.max(start);
        Some(TypeDeclaration {
            kind,
            attributes,
            modifiers,
            name,
            type_parameters,
            members,
            span: Span::new(start, end),
        })
    }

    fn parse_type_parameter_list(&mut self) -> Vec<Identifier> {
        self.next_token();
        let mut parameters = Vec::new();
        loop {
            self.parse_attribute_lists();
            if self.is_token(SyntaxKind::OtherKeyword)
                && matches!(self.scanner.get_token_value(), "in" | "out")
            {
                self.next_token();
            }
            match self.parse_identifier() {
                Some(parameter) => parameters.push(parameter),
                None => break,
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        if !self.parse_expected(SyntaxKind::GreaterThanToken) {
            while !matches!(
                self.token(),
                SyntaxKind::GreaterThanToken
                    | SyntaxKind::OpenBraceToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::EndOfFileToken
            ) {
                self.next_token();
            }
            self.parse_optional(SyntaxKind::GreaterThanToken);
        }
        parameters
    }

    /// Skip to the `{` or `;` that follows a type header.
    fn skip_type_header(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::OpenBraceToken | SyntaxKind::SemicolonToken if depth == 0 => return,
                SyntaxKind::CloseBraceToken if depth == 0 => return,
                SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.next_token();
        }
    }

    // =========================================================================
    // Enums
    // =========================================================================

    /// Parse an enum after the `enum` keyword.
    fn parse_enum_declaration(
        &mut self,
        attributes: Vec<AttributeList>,
        modifiers: Modifiers,
        start: u32,
    ) -> Option<EnumDeclaration> {
        let Some(name) = self.parse_identifier() else {
            self.skip_member();
            return None;
        };

        let base_type = if self.parse_optional(SyntaxKind::ColonToken) {
            let mut text = String::new();
            while !matches!(
                self.token(),
                SyntaxKind::OpenBraceToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EndOfFileToken
            ) {
                text.push_str(self.scanner.get_token_text());
                self.next_token();
            }
            Some(text)
        } else {
            None
        };

        let mut members = Vec::new();
        if self.parse_expected(SyntaxKind::OpenBraceToken) {
            members = self.parse_enum_members();
            self.parse_expected(SyntaxKind::CloseBraceToken);
        }
        let end = self.previous_token_end.max(start);
        self.parse_optional(SyntaxKind::SemicolonToken);

        Some(EnumDeclaration {
            attributes,
            modifiers,
            name,
            base_type,
            members,
            span: Span::new(start, end),
        })
    }

    fn parse_enum_members(&mut self) -> Vec<EnumMemberDeclaration> {
        let mut members = Vec::new();
        loop {
            if matches!(
                self.token(),
                SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
            ) {
                break;
            }
            let start = self.token_start();
            let attributes = self.parse_attribute_lists();
            let Some(name) = self.parse_identifier() else {
                self.skip_enum_member_rest();
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
                continue;
            };

            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                let init_start = self.token_start();
                let init_end = self.skip_enum_member_rest();
                let text = self
                    .source_text()
                    .get(init_start as usize..init_end as usize)
                    .unwrap_or("")
                    .trim()
                    .to_string();
                Some(text)
            } else {
                None
            };

            let end = self.previous_token_end.max(start);
            members.push(EnumMemberDeclaration {
                attributes,
                name,
                initializer,
                span: Span::new(start, end),
            });

            if self.parse_optional(SyntaxKind::CommaToken) {
                continue;
            }
            if !matches!(
                self.token(),
                SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
            ) {
                self.error_at_current_token(diagnostic_codes::EXPECTED, &[","]);
                self.skip_enum_member_rest();
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }
        members
    }

    /// Skip to the `,` or `}` ending an enum member; returns the end of the
    /// last skipped token.
    fn skip_enum_member_rest(&mut self) -> u32 {
        let mut depth = 0u32;
        let mut end = self.token_start();
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return end,
                SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken if depth == 0 => return end,
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken => depth = depth.saturating_sub(1),
                _ => {}
            }
            end = self.token_end();
            self.next_token();
        }
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Skip a member the tree does not model (field, method, property,
    /// using directive, delegate, ...). Stops before a `}` that closes the
    /// enclosing body.
    pub(crate) fn skip_member(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::SemicolonToken if depth == 0 => {
                    self.next_token();
                    return;
                }
                SyntaxKind::CloseBraceToken if depth == 0 => return,
                SyntaxKind::OpenBraceToken if depth == 0 => {
                    self.next_token();
                    self.skip_balanced_until_close_brace();
                    self.parse_optional(SyntaxKind::CloseBraceToken);
                    match self.token() {
                        // Property initializer or lambda field: keep going
                        SyntaxKind::EqualsToken => {}
                        SyntaxKind::SemicolonToken => {
                            self.next_token();
                            return;
                        }
                        _ => return,
                    }
                }
                SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.next_token();
        }
    }

    /// Skip tokens up to, but not including, the `}` matching an already
    /// consumed `{`.
    pub(crate) fn skip_balanced_until_close_brace(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseBraceToken => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.next_token();
        }
    }
}
