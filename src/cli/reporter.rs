use colored::Colorize;
use rustc_hash::FxHashMap;
use std::fmt::Write as _;
use std::path::Path;

use descgen_common::{Diagnostic, DiagnosticCategory, LineMap};

/// Renders diagnostics.
///
/// Plain: `file(line,col): error DG5001: message`.
/// Pretty: `file:line:col - error DG5001: message` followed by the source
/// line and a `~` underline, with color when enabled.
pub struct Reporter {
    pretty: bool,
    color: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    #[must_use]
    pub fn new(pretty: bool, color: bool) -> Self {
        Self {
            pretty,
            color,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Register the text of `file` so it is not read from disk again.
    pub fn add_source(&mut self, file: impl Into<String>, text: impl Into<String>) {
        let file = file.into();
        self.line_maps.remove(&file);
        self.sources.insert(file, text.into());
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let position = self.position_for(&diagnostic.file, diagnostic.start);
        let category = self.format_category(diagnostic.category);
        let code = self.format_code(diagnostic.code);

        let mut output = String::new();
        match position {
            Some((line, column)) if self.pretty => {
                let _ = write!(output, "{}:{line}:{column} - ", diagnostic.file);
            }
            Some((line, column)) => {
                let _ = write!(output, "{}({line},{column}): ", diagnostic.file);
            }
            None if diagnostic.file.is_empty() => {}
            None => {
                output.push_str(&diagnostic.file);
                output.push_str(": ");
            }
        }

        output.push_str(&category);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if self.pretty
            && let Some(snippet) =
                self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }
        output
    }

    /// The line holding `start`, underlined from `start` for `length`
    /// characters or to the end of the line.
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        if length == 0 {
            return None;
        }
        let (line_num, column) = self.position_for(file, start)?;
        let source = self.sources.get(file)?;
        let line_text = source.lines().nth(usize::try_from(line_num - 1).ok()?)?;

        let mut underline = String::new();
        let first = column - 1;
        let last = first + length;
        for (i, ch) in line_text.chars().enumerate() {
            let offset = u32::try_from(i).ok()?;
            if offset >= last {
                break;
            }
            let width = if ch == '\t' { 4 } else { 1 };
            let mark = if offset < first { ' ' } else { '~' };
            for _ in 0..width {
                underline.push(mark);
            }
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        let line_text = line_text.replace('\t', "    ");
        Some(format!("\n\n  {line_num:>3}   {line_text}\n        {underline}\n"))
    }

    /// 1-based line and column of `offset`.
    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        if file.is_empty() {
            return None;
        }
        self.ensure_source(file)?;
        let source = self.sources.get(file)?;
        let line_map = self
            .line_maps
            .entry(file.to_string())
            .or_insert_with(|| LineMap::build(source));
        let position = line_map.offset_to_position(offset, source);
        Some((position.line + 1, position.character + 1))
    }

    fn ensure_source(&mut self, file: &str) -> Option<()> {
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        Some(())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }

        let label = format!("DG{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
