//! descgen: `GetDescription()` extension classes for described C# enums.
//!
//! For every enum whose members all carry `[Description("...")]`, descgen
//! generates a static `{Enum}Extensions` class whose `GetDescription`
//! extension method maps each member to its label:
//!
//! ```text
//! .cs files -> parse -> select -> bind -> emit -> {Enum}_Extensions_Class.cs
//! ```
//!
//! The workspace crates do the language work (`descgen-scanner`,
//! `descgen-parser`, `descgen-binder`, `descgen-emitter`); this crate holds
//! the candidate selector, the generation pipeline and the command line.

// Re-export the workspace crates under one roof
pub use descgen_binder as binder;
pub use descgen_common as common;
pub use descgen_emitter as emitter;
pub use descgen_parser as parser;
pub use descgen_scanner as scanner;

// Candidate selection - which enums get an extension class
pub mod selector;
pub use selector::{find_qualifying_enums, is_described_enum};

// Two-phase generation over parsed files
pub mod pipeline;
pub use pipeline::{
    AddSourceError, GeneratedSource, GeneratedSources, GenerationResult, Generator,
    GeneratorOptions, generate_all, parse_sources,
};

// Command line support
pub mod cli;

pub mod tracing_config;

#[cfg(test)]
#[path = "tests/selector_tests.rs"]
mod selector_tests;
