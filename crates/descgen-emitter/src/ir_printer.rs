//! IR printer.
//!
//! Prints an [`IRNode`] tree in normalized layout: four-space indentation,
//! every brace on its own line, single spaces between tokens, the chosen
//! line terminator between lines and no trailing line terminator.

use std::fmt::Write as _;

use descgen_common::NewLineKind;

use crate::ir::{IRNode, IRParam, IRSwitchCase};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrinterOptions {
    pub new_line: NewLineKind,
}

pub struct IRPrinter {
    output: String,
    indent_level: u32,
    indent_str: &'static str,
    new_line: &'static str,
}

impl Default for IRPrinter {
    fn default() -> Self {
        Self::with_options(PrinterOptions::default())
    }
}

impl IRPrinter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str: "    ",
            new_line: options.new_line.as_str(),
        }
    }

    /// Print `node` with default options.
    #[must_use]
    pub fn emit_to_string(node: &IRNode) -> String {
        let mut printer = Self::new();
        printer.emit(node);
        printer.take_output()
    }

    pub fn emit(&mut self, node: &IRNode) {
        self.emit_node(node);
    }

    #[must_use]
    pub fn get_output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    fn emit_node(&mut self, node: &IRNode) {
        match node {
            IRNode::StringLiteral(value) => {
                self.write("\"");
                self.write_escaped(value);
                self.write("\"");
            }
            IRNode::Identifier(name) => self.write(name),
            IRNode::PropertyAccess { object, property } => {
                self.emit_node(object);
                self.write(".");
                self.write(property);
            }
            IRNode::CallExpr { callee, arguments } => {
                self.emit_node(callee);
                self.write("(");
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_node(argument);
                }
                self.write(")");
            }
            IRNode::ReturnStatement(expression) => {
                self.write("return");
                if let Some(expression) = expression {
                    self.write(" ");
                    self.emit_node(expression);
                }
                self.write(";");
            }
            IRNode::SwitchStatement { expression, cases } => {
                self.write("switch (");
                self.emit_node(expression);
                self.write(")");
                self.write_line();
                self.write_indent();
                self.write("{");
                self.increase_indent();
                for case in cases {
                    self.emit_switch_case(case);
                }
                self.decrease_indent();
                self.write_line();
                self.write_indent();
                self.write("}");
            }
            IRNode::MethodDeclaration {
                modifiers,
                return_type,
                name,
                parameters,
                body,
            } => {
                self.write_modifiers(modifiers);
                self.write(return_type);
                self.write(" ");
                self.write(name);
                self.write("(");
                self.emit_parameters(parameters);
                self.write(")");
                self.emit_block(body);
            }
            IRNode::ClassDeclaration {
                modifiers,
                name,
                members,
            } => {
                self.write_modifiers(modifiers);
                self.write("class ");
                self.write(name);
                self.emit_block(members);
            }
            IRNode::NamespaceDeclaration { name, members } => {
                self.write("namespace ");
                self.write(name);
                self.emit_block(members);
            }
            IRNode::CompilationUnit(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        self.write_line();
                    }
                    self.write_indent();
                    self.emit_node(member);
                }
            }
        }
    }

    /// `{`, one line per child, `}` with the braces at the current indentation.
    fn emit_block(&mut self, children: &[IRNode]) {
        self.write_line();
        self.write_indent();
        self.write("{");
        self.increase_indent();
        for child in children {
            self.write_line();
            self.write_indent();
            self.emit_node(child);
        }
        self.decrease_indent();
        self.write_line();
        self.write_indent();
        self.write("}");
    }

    fn emit_switch_case(&mut self, case: &IRSwitchCase) {
        self.write_line();
        self.write_indent();
        if let Some(test) = &case.test {
            self.write("case ");
            self.emit_node(test);
            self.write(":");
        } else {
            self.write("default:");
        }

        self.increase_indent();
        for statement in &case.statements {
            self.write_line();
            self.write_indent();
            self.emit_node(statement);
        }
        self.decrease_indent();
    }

    fn emit_parameters(&mut self, parameters: &[IRParam]) {
        for (i, parameter) in parameters.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write_modifiers(&parameter.modifiers);
            self.write(&parameter.type_name);
            self.write(" ");
            self.write(&parameter.name);
        }
    }

    fn write_modifiers(&mut self, modifiers: &[&str]) {
        for modifier in modifiers {
            self.write(modifier);
            self.write(" ");
        }
    }

    // =========================================================================
    // Output
    // =========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Write `s` as the body of a regular C# string literal.
    fn write_escaped(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\0' => self.output.push_str("\\0"),
                '\u{7}' => self.output.push_str("\\a"),
                '\u{8}' => self.output.push_str("\\b"),
                '\u{C}' => self.output.push_str("\\f"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{B}' => self.output.push_str("\\v"),
                // Other controls and the line/paragraph separators would
                // break the literal
                c if c.is_control() || c == '\u{2028}' || c == '\u{2029}' => {
                    let _ = write!(self.output, "\\u{:04X}", c as u32);
                }
                _ => self.output.push(c),
            }
        }
    }

    fn write_line(&mut self) {
        self.output.push_str(self.new_line);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

#[cfg(test)]
#[path = "../tests/ir_printer.rs"]
mod tests;
