//! Generation pipeline.
//!
//! A pass runs in two phases over already parsed files:
//!
//! 1. selection: [`find_qualifying_enums`] over every enum site, files in
//!    the order given and declarations in document order;
//! 2. generation: each candidate is bound and handed to the emitter.
//!
//! Phase 2 is a pure map and runs on the rayon pool when `parallel` is set.
//! Results are always added to [`GeneratedSources`] in selection order, so a
//! parallel pass produces the same sources and diagnostics as a sequential
//! one. A failure in one enum becomes a diagnostic and the pass continues.

use descgen_binder::Binder;
use descgen_common::diagnostics::diagnostic_codes;
use descgen_common::{AttributeMatch, Diagnostic};
use descgen_emitter::{EmitterOptions, GeneratedUnit, PrinterOptions, generate};
use descgen_parser::{EnumSite, ParseDiagnostic, SourceFile, parse_source};
use indexmap::IndexMap;
use indexmap::map::Entry;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info_span};

use crate::selector::find_qualifying_enums;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub attribute_match: AttributeMatch,
    pub printer: PrinterOptions,
    pub parallel: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            attribute_match: AttributeMatch::default(),
            printer: PrinterOptions::default(),
            parallel: true,
        }
    }
}

impl GeneratorOptions {
    const fn emitter_options(&self) -> EmitterOptions {
        EmitterOptions {
            printer: self.printer,
            attribute_match: self.attribute_match,
        }
    }
}

// =============================================================================
// Generated sources
// =============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddSourceError {
    #[error("a generated source named '{0}' was already added")]
    DuplicateHintName(String),
}

/// One source added to the compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedSource {
    pub hint_name: String,
    /// Qualified name of the described enum.
    pub enum_name: String,
    /// File the enum was declared in.
    pub origin: String,
    pub text: String,
}

/// Generated sources keyed by hint name, in the order they were added.
#[derive(Clone, Debug, Default)]
pub struct GeneratedSources {
    sources: IndexMap<String, GeneratedSource>,
}

impl GeneratedSources {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `unit` under its hint name. Hint names are unique per pass.
    pub fn add(&mut self, unit: GeneratedUnit, origin: &str) -> Result<(), AddSourceError> {
        match self.sources.entry(unit.hint_name) {
            Entry::Occupied(entry) => Err(AddSourceError::DuplicateHintName(entry.key().clone())),
            Entry::Vacant(entry) => {
                let hint_name = entry.key().clone();
                entry.insert(GeneratedSource {
                    hint_name,
                    enum_name: unit.enum_name,
                    origin: origin.to_string(),
                    text: unit.text,
                });
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn get(&self, hint_name: &str) -> Option<&GeneratedSource> {
        self.sources.get(hint_name)
    }

    #[must_use]
    pub fn contains(&self, hint_name: &str) -> bool {
        self.sources.contains_key(hint_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedSource> {
        self.sources.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct GenerationResult {
    pub sources: GeneratedSources,
    pub diagnostics: Vec<Diagnostic>,
}

// =============================================================================
// Generator
// =============================================================================

pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    #[must_use]
    pub const fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Every qualifying enum across `files`, in selection order.
    #[must_use]
    pub fn find_candidates<'a>(&self, files: &'a [SourceFile]) -> Vec<EnumSite<'a>> {
        find_qualifying_enums(
            files.iter().flat_map(SourceFile::enum_sites),
            self.options.attribute_match,
        )
    }

    /// Select and generate over `files`.
    #[must_use]
    pub fn run(&self, files: &[SourceFile]) -> GenerationResult {
        let _span = info_span!("generate", files = files.len()).entered();

        let candidates = self.find_candidates(files);
        debug!(candidates = candidates.len(), "selected candidate enums");

        let outcomes: Vec<Result<GeneratedUnit, Diagnostic>> = if self.options.parallel {
            candidates
                .par_iter()
                .map(|site| self.generate_site(site))
                .collect()
        } else {
            candidates
                .iter()
                .map(|site| self.generate_site(site))
                .collect()
        };

        let mut result = GenerationResult::default();
        for (site, outcome) in candidates.iter().zip(outcomes) {
            let unit = match outcome {
                Ok(unit) => unit,
                Err(diagnostic) => {
                    result.diagnostics.push(diagnostic);
                    continue;
                }
            };
            let enum_name = unit.enum_name.clone();
            if let Err(AddSourceError::DuplicateHintName(hint_name)) =
                result.sources.add(unit, &site.file.file_name)
            {
                let span = site.declaration.name.span;
                result.diagnostics.push(Diagnostic::from_code(
                    site.file.file_name.clone(),
                    span.start,
                    span.len(),
                    diagnostic_codes::DUPLICATE_HINT_NAME,
                    &[hint_name.as_str(), enum_name.as_str()],
                ));
            }
        }
        result
    }

    /// Bind one candidate and emit its extension class.
    fn generate_site(&self, site: &EnumSite<'_>) -> Result<GeneratedUnit, Diagnostic> {
        let file_name = &site.file.file_name;
        let resolved = Binder::new(site.file).resolve_enum(site).map_err(|error| {
            let span = site.declaration.name.span;
            Diagnostic::from_code(
                file_name.clone(),
                span.start,
                span.len(),
                diagnostic_codes::ENUM_NOT_RESOLVED,
                &[site.name(), error.to_string().as_str()],
            )
        })?;
        generate(
            &resolved,
            resolved.namespace.as_deref(),
            self.options.emitter_options(),
        )
        .map_err(|error| error.to_diagnostic(file_name))
    }
}

/// Select and generate over `files` with `options`.
#[must_use]
pub fn generate_all(files: &[SourceFile], options: GeneratorOptions) -> GenerationResult {
    Generator::new(options).run(files)
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse `(file_name, text)` inputs, keeping their order.
///
/// Parse diagnostics are converted and returned alongside the trees; a file
/// with errors still contributes whatever declarations were recovered.
#[must_use]
pub fn parse_sources(inputs: &[(String, String)], parallel: bool) -> (Vec<SourceFile>, Vec<Diagnostic>) {
    let parse_one = |(file_name, text): &(String, String)| {
        let (file, diagnostics) = parse_source(file_name.as_str(), text.as_str());
        let diagnostics: Vec<Diagnostic> = diagnostics
            .into_iter()
            .map(|diagnostic| parse_diagnostic(file_name, diagnostic))
            .collect();
        (file, diagnostics)
    };

    let parsed: Vec<(SourceFile, Vec<Diagnostic>)> = if parallel {
        inputs.par_iter().map(parse_one).collect()
    } else {
        inputs.iter().map(parse_one).collect()
    };

    let mut files = Vec::with_capacity(parsed.len());
    let mut diagnostics = Vec::new();
    for (file, file_diagnostics) in parsed {
        files.push(file);
        diagnostics.extend(file_diagnostics);
    }
    (files, diagnostics)
}

fn parse_diagnostic(file_name: &str, diagnostic: ParseDiagnostic) -> Diagnostic {
    Diagnostic::error(
        file_name.to_string(),
        diagnostic.start,
        diagnostic.length,
        diagnostic.message,
        diagnostic.code,
    )
}
