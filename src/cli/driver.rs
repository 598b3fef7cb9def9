//! One command line run: configuration, discovery, parsing, generation and
//! output.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use descgen_common::Diagnostic;
use descgen_common::diagnostics::diagnostic_codes;

use super::args::CliArgs;
use super::config::{ResolvedConfig, find_config_path, load_config, resolve_config};
use super::fs::{FileDiscoveryOptions, discover_source_files};
use crate::pipeline::{GeneratedSources, Generator, parse_sources};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_DIAGNOSTICS_OUTPUTS_SKIPPED: i32 = 1;
pub const EXIT_DIAGNOSTICS_OUTPUTS_GENERATED: i32 = 2;

#[derive(Debug, Default)]
pub struct GenerationOutcome {
    pub diagnostics: Vec<Diagnostic>,
    pub sources: GeneratedSources,
    /// Files written under the output directory.
    pub written_files: Vec<PathBuf>,
    pub files_read: Vec<PathBuf>,
    /// `(display name, text)` of every input, for diagnostic rendering.
    pub inputs: Vec<(String, String)>,
    /// Qualifying enums, filled by `--listCandidates` runs only.
    pub candidates: Vec<String>,
    /// Whether sources go to an output directory rather than stdout.
    pub has_out_dir: bool,
}

impl GenerationOutcome {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.diagnostics.is_empty() {
            EXIT_SUCCESS
        } else if self.sources.is_empty() {
            EXIT_DIAGNOSTICS_OUTPUTS_SKIPPED
        } else {
            EXIT_DIAGNOSTICS_OUTPUTS_GENERATED
        }
    }
}

pub fn run(args: &CliArgs, cwd: &Path) -> Result<GenerationOutcome> {
    let config_path = find_config_path(cwd, args.project.as_deref())?;
    let config = config_path.as_deref().map(load_config).transpose()?;
    let base_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
    let resolved = resolve_config(config.as_ref(), &base_dir, cwd, args)?;
    debug!(
        config = ?config_path,
        attribute_match = resolved.generator.attribute_match.as_str(),
        parallel = resolved.generator.parallel,
        "resolved configuration"
    );

    let mut outcome = GenerationOutcome {
        has_out_dir: resolved.out_dir.is_some(),
        ..GenerationOutcome::default()
    };

    let discovered = discover_source_files(&discovery_options(&resolved))?;
    for missing in &discovered.missing {
        outcome.diagnostics.push(Diagnostic::from_code(
            String::new(),
            0,
            0,
            diagnostic_codes::FILE_NOT_FOUND,
            &[missing.display().to_string().as_str()],
        ));
    }
    if discovered.files.is_empty() {
        outcome.diagnostics.push(Diagnostic::from_code(
            String::new(),
            0,
            0,
            diagnostic_codes::NO_INPUTS_FOUND,
            &[],
        ));
        return Ok(outcome);
    }

    for path in &discovered.files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read source file: {}", path.display()))?;
        outcome.inputs.push((display_name(path, cwd), text));
    }
    outcome.files_read = discovered.files;

    let (files, parse_diagnostics) = parse_sources(&outcome.inputs, resolved.generator.parallel);
    outcome.diagnostics.extend(parse_diagnostics);

    let generator = Generator::new(resolved.generator);
    if args.list_candidates {
        outcome.candidates = generator
            .find_candidates(&files)
            .iter()
            .map(|site| {
                let mut path: Vec<&str> = site
                    .namespaces
                    .iter()
                    .map(|namespace| namespace.name.text.as_str())
                    .chain(site.containing_types.iter().map(|ty| ty.name.text.as_str()))
                    .collect();
                path.push(site.name());
                format!("{}: {}", site.file.file_name, path.join("."))
            })
            .collect();
        return Ok(outcome);
    }

    let result = generator.run(&files);
    outcome.diagnostics.extend(result.diagnostics);
    outcome.sources = result.sources;

    if let Some(out_dir) = resolved.out_dir.as_deref() {
        outcome.written_files = write_sources(&outcome.sources, out_dir)?;
    }

    info!(
        files = outcome.files_read.len(),
        generated = outcome.sources.len(),
        diagnostics = outcome.diagnostics.len(),
        "generation finished"
    );
    Ok(outcome)
}

/// Write every source to `<out_dir>/<hint name>.cs`.
pub fn write_sources(sources: &GeneratedSources, out_dir: &Path) -> Result<Vec<PathBuf>> {
    if sources.is_empty() {
        return Ok(Vec::new());
    }
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(sources.len());
    for source in sources.iter() {
        let path = out_dir.join(format!("{}.cs", source.hint_name));
        std::fs::write(&path, &source.text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), enum_name = %source.enum_name, "wrote generated source");
        written.push(path);
    }
    Ok(written)
}

fn discovery_options(resolved: &ResolvedConfig) -> FileDiscoveryOptions {
    FileDiscoveryOptions {
        base_dir: resolved.base_dir.clone(),
        inputs: resolved.inputs.clone(),
        include: resolved.include.clone(),
        exclude: resolved.exclude.clone(),
        out_dir: resolved.out_dir.clone(),
        follow_links: false,
    }
}

/// Path relative to `cwd` when below it, with `/` separators.
#[must_use]
pub fn display_name(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
