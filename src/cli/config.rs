//! `descgen.json` loading and option resolution.
//!
//! ```json
//! {
//!   "include": ["src/**/*.cs"],
//!   "exclude": ["**/obj/**"],
//!   "outDir": "generated",
//!   "newLine": "crlf",
//!   "attributeMatch": "normalized",
//!   "parallel": true
//! }
//! ```
//!
//! Comments and trailing commas are accepted. Command line flags override
//! the file.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use descgen_common::{AttributeMatch, NewLineKind};

use super::args::CliArgs;
use crate::pipeline::GeneratorOptions;

pub const CONFIG_FILE_NAME: &str = "descgen.json";

/// Include patterns used when neither the file nor the command line names any.
pub const DEFAULT_INCLUDE: &[&str] = &["**/*.cs"];

/// Build output folders never hold hand-written sources.
pub const DEFAULT_EXCLUDE: &[&str] = &["**/bin/**", "**/obj/**"];

/// Accept `true` as well as `"true"` for boolean options.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true or false"
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DescgenConfig {
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub out_dir: Option<String>,
    #[serde(default)]
    pub new_line: Option<String>,
    #[serde(default)]
    pub attribute_match: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub parallel: Option<bool>,
}

/// Options after merging `descgen.json` with the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Directory relative paths are resolved against.
    pub base_dir: PathBuf,
    /// Explicit inputs: files, or directories to search.
    pub inputs: Vec<PathBuf>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub out_dir: Option<PathBuf>,
    pub generator: GeneratorOptions,
}

pub fn parse_config(source: &str) -> Result<DescgenConfig> {
    let normalized = strip_comments_and_trailing_commas(source);
    let config = serde_json::from_str(&normalized).context("failed to parse descgen.json")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<DescgenConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to load config: {}", path.display()))
}

/// Locate the configuration file.
///
/// `--project` may name the file or its directory and must exist. Without
/// it, `descgen.json` in `cwd` is used when present.
pub fn find_config_path(cwd: &Path, project: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(project) = project else {
        let candidate = cwd.join(CONFIG_FILE_NAME);
        return Ok(candidate.is_file().then_some(candidate));
    };

    let project = if project.is_absolute() {
        project.to_path_buf()
    } else {
        cwd.join(project)
    };
    let candidate = if project.is_dir() {
        project.join(CONFIG_FILE_NAME)
    } else {
        project
    };
    if !candidate.is_file() {
        bail!("config file not found: {}", candidate.display());
    }
    Ok(Some(candidate))
}

pub fn parse_new_line(value: &str) -> Result<NewLineKind> {
    match value.trim().to_lowercase().as_str() {
        "lf" => Ok(NewLineKind::LineFeed),
        "crlf" => Ok(NewLineKind::CarriageReturnLineFeed),
        _ => bail!("invalid newLine '{value}'. Expected 'lf' or 'crlf'"),
    }
}

pub fn parse_attribute_match(value: &str) -> Result<AttributeMatch> {
    match value.trim().to_lowercase().as_str() {
        "exact" => Ok(AttributeMatch::Exact),
        "normalized" => Ok(AttributeMatch::Normalized),
        _ => bail!("invalid attributeMatch '{value}'. Expected 'exact' or 'normalized'"),
    }
}

/// Merge `config` (found in `base_dir`) with the command line.
pub fn resolve_config(
    config: Option<&DescgenConfig>,
    base_dir: &Path,
    cwd: &Path,
    args: &CliArgs,
) -> Result<ResolvedConfig> {
    let config = config.cloned().unwrap_or_default();
    let mut generator = GeneratorOptions::default();

    if let Some(new_line) = config.new_line.as_deref() {
        generator.printer.new_line = parse_new_line(new_line)?;
    }
    if let Some(new_line) = args.new_line {
        generator.printer.new_line = new_line.to_new_line_kind();
    }

    if let Some(attribute_match) = config.attribute_match.as_deref() {
        generator.attribute_match = parse_attribute_match(attribute_match)?;
    }
    if let Some(attribute_match) = args.attribute_match {
        generator.attribute_match = attribute_match.to_attribute_match();
    }

    if let Some(parallel) = config.parallel {
        generator.parallel = parallel;
    }
    if args.no_parallel {
        generator.parallel = false;
    }

    // Inputs named on the command line are relative to the working
    // directory; everything from the file is relative to the file.
    let inputs = if args.files.is_empty() {
        config
            .files
            .iter()
            .flatten()
            .map(|file| base_dir.join(file))
            .collect()
    } else {
        args.files.iter().map(|file| cwd.join(file)).collect()
    };

    let out_dir = match (&args.out_dir, &config.out_dir) {
        (Some(out_dir), _) => Some(cwd.join(out_dir)),
        (None, Some(out_dir)) => Some(base_dir.join(out_dir)),
        (None, None) => None,
    };

    Ok(ResolvedConfig {
        base_dir: base_dir.to_path_buf(),
        inputs,
        include: config
            .include
            .unwrap_or_else(|| DEFAULT_INCLUDE.iter().map(ToString::to_string).collect()),
        exclude: config
            .exclude
            .unwrap_or_else(|| DEFAULT_EXCLUDE.iter().map(ToString::to_string).collect()),
        out_dir,
        generator,
    })
}

/// Drop `//` and `/* */` comments and commas directly before `}` or `]`.
fn strip_comments_and_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;
    // Comma held back until the next significant character is known.
    let mut pending_comma = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for next in chars.by_ref() {
                    if previous == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    previous = next;
                }
            }
            ',' => {
                if pending_comma {
                    out.push(',');
                }
                pending_comma = true;
            }
            c if c.is_whitespace() => out.push(c),
            c => {
                if pending_comma && c != '}' && c != ']' {
                    out.push(',');
                }
                pending_comma = false;
                if c == '"' {
                    in_string = true;
                }
                out.push(c);
            }
        }
    }
    if pending_comma {
        out.push(',');
    }
    out
}
