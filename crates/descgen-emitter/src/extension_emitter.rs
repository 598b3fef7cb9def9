//! `GetDescription` extension class emission.
//!
//! For an enum `Color` in namespace `N` the emitter produces:
//!
//! ```text
//! namespace N
//! {
//!     public static class ColorExtensions
//!     {
//!         public static string GetDescription(this Color value)
//!         {
//!             switch (value)
//!             {
//!                 case Color.Red:
//!                     return "Bright Red";
//!                 default:
//!                     return value.ToString();
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! One `case` per member in declaration order, then the `default` section.
//! Nested enums are referenced through their containing types and the class
//! visibility is the most restrictive level along that chain.

use descgen_binder::ResolvedEnumType;
use descgen_common::diagnostics::diagnostic_codes;
use descgen_common::{AttributeMatch, Diagnostic, Span};
use thiserror::Error;
use tracing::debug;

use crate::ir::{IRNode, IRParam, IRSwitchCase};
use crate::ir_printer::{IRPrinter, PrinterOptions};
use crate::labels::resolve_label;
use crate::naming::{
    escape_dotted_name, escape_identifier, extensions_class_name, hint_name, qualified_type_name,
};
use crate::visibility::{effective_accessibility, visibility_keyword};

const METHOD_NAME: &str = "GetDescription";
const PARAMETER_NAME: &str = "value";

/// A description attribute whose arguments cannot supply a label.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error(
        "attribute '{attribute}' on '{enum_name}.{member}' has {count} constructor arguments, expected exactly one"
    )]
    ArgumentCount {
        enum_name: String,
        member: String,
        attribute: String,
        count: usize,
        span: Span,
    },
    #[error(
        "attribute '{attribute}' on '{enum_name}.{member}' has a {found} argument, expected a constant string"
    )]
    ArgumentNotString {
        enum_name: String,
        member: String,
        attribute: String,
        found: &'static str,
        span: Span,
    },
}

impl GenerateError {
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::ArgumentCount { .. } => diagnostic_codes::DESCRIPTION_ARGUMENT_COUNT,
            Self::ArgumentNotString { .. } => diagnostic_codes::DESCRIPTION_ARGUMENT_NOT_STRING,
        }
    }

    /// Span of the offending attribute.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::ArgumentCount { span, .. } | Self::ArgumentNotString { span, .. } => *span,
        }
    }

    #[must_use]
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        let span = self.span();
        match self {
            Self::ArgumentCount {
                member,
                attribute,
                count,
                ..
            } => Diagnostic::from_code(
                file.to_string(),
                span.start,
                span.len(),
                self.code(),
                &[attribute.as_str(), member.as_str(), &count.to_string()],
            ),
            Self::ArgumentNotString {
                member, attribute, ..
            } => Diagnostic::from_code(
                file.to_string(),
                span.start,
                span.len(),
                self.code(),
                &[attribute.as_str(), member.as_str()],
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmitterOptions {
    pub printer: PrinterOptions,
    pub attribute_match: AttributeMatch,
}

/// One generated source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Key the source is added under, without extension.
    pub hint_name: String,
    /// Qualified name of the enum the unit describes.
    pub enum_name: String,
    pub text: String,
}

pub struct ExtensionEmitter {
    options: EmitterOptions,
}

impl ExtensionEmitter {
    #[must_use]
    pub const fn new(options: EmitterOptions) -> Self {
        Self { options }
    }

    /// Build the IR for the extension class of `resolved`, placed in
    /// `namespace` (the global namespace when `None`).
    pub fn build(
        &self,
        resolved: &ResolvedEnumType,
        namespace: Option<&str>,
    ) -> Result<IRNode, GenerateError> {
        let type_name = qualified_type_name(resolved);

        let mut cases = Vec::with_capacity(resolved.members.len() + 1);
        for member in &resolved.members {
            let label = resolve_label(&resolved.name, member, self.options.attribute_match)?;
            cases.push(IRSwitchCase::case(
                IRNode::prop(IRNode::id(type_name.as_str()), escape_identifier(&member.name)),
                vec![IRNode::ret(Some(IRNode::string(label)))],
            ));
        }
        cases.push(IRSwitchCase::default_case(vec![IRNode::ret(Some(
            IRNode::call(IRNode::prop(IRNode::id(PARAMETER_NAME), "ToString"), vec![]),
        ))]));

        let method = IRNode::MethodDeclaration {
            modifiers: vec!["public", "static"],
            return_type: "string".to_string(),
            name: METHOD_NAME.to_string(),
            parameters: vec![IRParam {
                modifiers: vec!["this"],
                type_name,
                name: PARAMETER_NAME.to_string(),
            }],
            body: vec![IRNode::switch(IRNode::id(PARAMETER_NAME), cases)],
        };

        let class = IRNode::ClassDeclaration {
            modifiers: vec![visibility_keyword(effective_accessibility(resolved)), "static"],
            name: extensions_class_name(resolved),
            members: vec![method],
        };

        let root = match namespace.filter(|name| !name.is_empty()) {
            Some(name) => IRNode::NamespaceDeclaration {
                name: escape_dotted_name(name),
                members: vec![class],
            },
            None => class,
        };
        Ok(IRNode::CompilationUnit(vec![root]))
    }

    /// Build and print the extension class of `resolved`.
    pub fn generate(
        &self,
        resolved: &ResolvedEnumType,
        namespace: Option<&str>,
    ) -> Result<GeneratedUnit, GenerateError> {
        let unit = self.build(resolved, namespace)?;
        let mut printer = IRPrinter::with_options(self.options.printer);
        printer.emit(&unit);

        let hint_name = hint_name(resolved);
        debug!(
            enum_name = %resolved.name,
            hint_name = %hint_name,
            members = resolved.members.len(),
            "generated extension class"
        );
        Ok(GeneratedUnit {
            hint_name,
            enum_name: qualified_type_name(resolved),
            text: printer.take_output(),
        })
    }
}

/// Generate the extension class of `resolved` in `namespace`.
pub fn generate(
    resolved: &ResolvedEnumType,
    namespace: Option<&str>,
    options: EmitterOptions,
) -> Result<GeneratedUnit, GenerateError> {
    ExtensionEmitter::new(options).generate(resolved, namespace)
}
