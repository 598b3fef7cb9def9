//! Declaration-level C# parser for the descgen generator.
//!
//! The parser recovers the declaration skeleton of a C# file: namespaces,
//! type declarations with their modifiers and type parameters, enums with
//! their members, and attribute lists with constant-expression arguments.
//! Member bodies are skipped by balanced-brace scanning.

pub mod ast;
pub use ast::*;

pub mod parser;
pub use parser::{ParseDiagnostic, ParserState, parse_source};

pub mod walk;
pub use walk::EnumSite;

#[cfg(test)]
#[path = "tests/parser_tests.rs"]
mod parser_tests;
