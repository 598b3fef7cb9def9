//! Source file discovery.

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const SOURCE_EXTENSION: &str = "cs";

#[derive(Debug, Clone, Default)]
pub struct FileDiscoveryOptions {
    pub base_dir: PathBuf,
    /// Files taken as-is, or directories to search. Empty searches `base_dir`.
    pub inputs: Vec<PathBuf>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Generated output folder, never searched.
    pub out_dir: Option<PathBuf>,
    pub follow_links: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DiscoveredFiles {
    /// Sorted, without duplicates.
    pub files: Vec<PathBuf>,
    /// Explicit inputs that do not exist.
    pub missing: Vec<PathBuf>,
}

pub fn discover_source_files(options: &FileDiscoveryOptions) -> Result<DiscoveredFiles> {
    let include = build_glob_set(&options.include).context("invalid include pattern")?;
    let exclude = build_glob_set(&options.exclude).context("invalid exclude pattern")?;

    let mut files = BTreeSet::new();
    let mut missing = Vec::new();
    let roots: Vec<&Path> = if options.inputs.is_empty() {
        vec![options.base_dir.as_path()]
    } else {
        options.inputs.iter().map(PathBuf::as_path).collect()
    };

    for root in roots {
        if root.is_file() {
            files.insert(root.to_path_buf());
        } else if root.is_dir() {
            walk_directory(root, &include, &exclude, options, &mut files);
        } else {
            missing.push(root.to_path_buf());
        }
    }

    Ok(DiscoveredFiles {
        files: files.into_iter().collect(),
        missing,
    })
}

fn walk_directory(
    root: &Path,
    include: &GlobSet,
    exclude: &GlobSet,
    options: &FileDiscoveryOptions,
    files: &mut BTreeSet<PathBuf>,
) {
    for entry in WalkDir::new(root)
        .follow_links(options.follow_links)
        .into_iter()
        .filter_entry(|entry| {
            options
                .out_dir
                .as_deref()
                .is_none_or(|out_dir| entry.path() != out_dir)
        })
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_source_file(path) {
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let relative = normalize_separators(relative);
        if include.is_match(&relative) && !exclude.is_match(&relative) {
            files.insert(path.to_path_buf());
        }
    }
}

#[must_use]
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

/// `*` stays within one path segment; `**` crosses segments.
pub fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.trim_start_matches("./");
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid glob pattern: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("failed to build glob set")
}

fn normalize_separators(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
