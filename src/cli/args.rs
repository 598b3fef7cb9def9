use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use descgen_common::{AttributeMatch, NewLineKind};

/// CLI arguments for the descgen binary.
#[derive(Parser, Debug)]
#[command(
    name = "descgen",
    version,
    about = "Generate GetDescription() extension classes for C# enums annotated with [Description]"
)]
pub struct CliArgs {
    /// Path to descgen.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Write each generated source to `<DIR>/<hint name>.cs` instead of stdout.
    #[arg(long = "outDir", alias = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// Line terminator of generated sources.
    #[arg(long = "newLine", alias = "new-line", value_enum, ignore_case = true)]
    pub new_line: Option<NewLine>,

    /// How attribute names are matched against `Description`.
    #[arg(long = "attributeMatch", alias = "attribute-match", value_enum, ignore_case = true)]
    pub attribute_match: Option<AttributeMatchArg>,

    /// Print the qualifying enums and stop.
    #[arg(long = "listCandidates", alias = "list-candidates")]
    pub list_candidates: bool,

    /// Parse and generate on the current thread.
    #[arg(long = "noParallel", alias = "no-parallel")]
    pub no_parallel: bool,

    /// Colorize diagnostics and show source snippets.
    #[arg(long)]
    pub pretty: bool,

    /// Input files or directories.
    pub files: Vec<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum NewLine {
    Lf,
    Crlf,
}

impl NewLine {
    #[must_use]
    pub const fn to_new_line_kind(self) -> NewLineKind {
        match self {
            Self::Lf => NewLineKind::LineFeed,
            Self::Crlf => NewLineKind::CarriageReturnLineFeed,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AttributeMatchArg {
    Exact,
    Normalized,
}

impl AttributeMatchArg {
    #[must_use]
    pub const fn to_attribute_match(self) -> AttributeMatch {
        match self {
            Self::Exact => AttributeMatch::Exact,
            Self::Normalized => AttributeMatch::Normalized,
        }
    }
}
