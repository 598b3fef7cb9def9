//! IR (Intermediate Representation) for generated C#.
//!
//! The extension emitter builds a tree of `IRNode`s instead of strings and
//! the [`IRPrinter`](crate::IRPrinter) turns that tree into text, so layout
//! rules live in one place and the tree can be inspected in tests.

/// Intermediate Representation node for generated C#
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IRNode {
    // =========================================================================
    // Expressions
    // =========================================================================
    /// String literal: `"hello"`; the value is stored unescaped
    StringLiteral(String),

    /// Identifier or type name: `value`, `Outer.Color`
    Identifier(String),

    /// Member access: `object.member`
    PropertyAccess { object: Box<Self>, property: String },

    /// Invocation: `callee(args)`
    CallExpr {
        callee: Box<Self>,
        arguments: Vec<Self>,
    },

    // =========================================================================
    // Statements
    // =========================================================================
    /// `return expr;` or `return;`
    ReturnStatement(Option<Box<Self>>),

    /// `switch (expression) { case ...: ... default: ... }`
    SwitchStatement {
        expression: Box<Self>,
        cases: Vec<IRSwitchCase>,
    },

    // =========================================================================
    // Declarations
    // =========================================================================
    /// Method with a block body
    MethodDeclaration {
        modifiers: Vec<&'static str>,
        return_type: String,
        name: String,
        parameters: Vec<IRParam>,
        body: Vec<Self>,
    },

    /// Class declaration
    ClassDeclaration {
        modifiers: Vec<&'static str>,
        name: String,
        members: Vec<Self>,
    },

    /// Block-bodied namespace declaration
    NamespaceDeclaration { name: String, members: Vec<Self> },

    /// Root of a generated file
    CompilationUnit(Vec<Self>),
}

/// Method parameter: `this Color value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IRParam {
    pub modifiers: Vec<&'static str>,
    pub type_name: String,
    pub name: String,
}

/// Switch section with a single label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IRSwitchCase {
    pub test: Option<IRNode>, // None for default case
    pub statements: Vec<IRNode>,
}

// =============================================================================
// Builder Helpers
// =============================================================================

impl IRNode {
    /// Create an identifier node
    pub fn id(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Create a string literal
    pub fn string(s: impl Into<String>) -> Self {
        Self::StringLiteral(s.into())
    }

    /// Create a member access
    pub fn prop(object: Self, property: impl Into<String>) -> Self {
        Self::PropertyAccess {
            object: Box::new(object),
            property: property.into(),
        }
    }

    /// Create an invocation
    pub fn call(callee: Self, args: Vec<Self>) -> Self {
        Self::CallExpr {
            callee: Box::new(callee),
            arguments: args,
        }
    }

    /// Create a return statement
    pub fn ret(expr: Option<Self>) -> Self {
        Self::ReturnStatement(expr.map(Box::new))
    }

    /// Create a switch statement
    pub fn switch(expression: Self, cases: Vec<IRSwitchCase>) -> Self {
        Self::SwitchStatement {
            expression: Box::new(expression),
            cases,
        }
    }
}

impl IRSwitchCase {
    /// `case test: statements`
    #[must_use]
    pub const fn case(test: IRNode, statements: Vec<IRNode>) -> Self {
        Self {
            test: Some(test),
            statements,
        }
    }

    /// `default: statements`
    #[must_use]
    pub const fn default_case(statements: Vec<IRNode>) -> Self {
        Self {
            test: None,
            statements,
        }
    }

    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.test.is_none()
    }
}
