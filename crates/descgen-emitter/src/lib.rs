//! Extension class emission for described enums.
//!
//! The emitter turns a [`ResolvedEnumType`](descgen_binder::ResolvedEnumType)
//! into a small IR tree (namespace, static class, extension method, switch)
//! and prints it as normalized C# text.

pub mod ir;
pub use ir::{IRNode, IRParam, IRSwitchCase};

pub mod ir_printer;
pub use ir_printer::{IRPrinter, PrinterOptions};

pub mod naming;
pub use naming::{escape_identifier, extensions_class_name, hint_name, qualified_type_name};

pub mod visibility;
pub use visibility::{effective_accessibility, visibility_keyword};

pub mod labels;
pub use labels::resolve_label;

pub mod extension_emitter;
pub use extension_emitter::{EmitterOptions, ExtensionEmitter, GenerateError, GeneratedUnit, generate};

#[cfg(test)]
#[path = "tests/extension_emitter_tests.rs"]
mod extension_emitter_tests;
