//! Scanner state machine.
//!
//! Produces one token per `scan()` call, skipping whitespace, comments and
//! preprocessor lines. String and character literals are decoded into
//! `token_value` so later phases can evaluate attribute arguments without
//! re-lexing.

use descgen_common::diagnostics::diagnostic_codes;
use memchr::{memchr, memchr2, memmem};

use crate::syntax_kind::{SyntaxKind, keyword_kind};

pub mod token_flags {
    pub const NONE: u32 = 0;
    /// Identifier was written with an `@` prefix.
    pub const VERBATIM_IDENTIFIER: u32 = 1 << 0;
    /// Literal ran into end of line or end of file.
    pub const UNTERMINATED: u32 = 1 << 1;
    /// A line break precedes this token.
    pub const PRECEDING_LINE_BREAK: u32 = 1 << 2;
}

/// A lexical error, reported in byte offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub code: u32,
}

/// Saved scanner position for speculative lookahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    token_flags: u32,
    diagnostics_len: usize,
}

pub struct ScannerState {
    text: String,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    token_flags: u32,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    #[must_use]
    pub fn new(text: String) -> Self {
        // A leading BOM is not part of the source
        let pos = if text.starts_with('\u{FEFF}') { 3 } else { 0 };
        Self {
            text,
            pos,
            token: SyntaxKind::Unknown,
            token_start: pos,
            token_value: String::new(),
            token_flags: token_flags::NONE,
            diagnostics: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn get_token(&self) -> SyntaxKind {
        self.token
    }

    #[must_use]
    pub const fn get_token_start(&self) -> usize {
        self.token_start
    }

    #[must_use]
    pub const fn get_token_end(&self) -> usize {
        self.pos
    }

    /// Identifier name (without `@`) or decoded literal value.
    #[must_use]
    pub fn get_token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    #[must_use]
    pub fn get_token_text(&self) -> &str {
        self.text.get(self.token_start..self.pos).unwrap_or("")
    }

    #[must_use]
    pub const fn get_token_flags(&self) -> u32 {
        self.token_flags
    }

    #[must_use]
    pub const fn is_verbatim_identifier(&self) -> bool {
        self.token_flags & token_flags::VERBATIM_IDENTIFIER != 0
    }

    #[must_use]
    pub const fn has_preceding_line_break(&self) -> bool {
        self.token_flags & token_flags::PRECEDING_LINE_BREAK != 0
    }

    #[must_use]
    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<ScannerDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    // =========================================================================
    // Lookahead
    // =========================================================================

    #[must_use]
    pub fn snapshot(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    pub fn restore(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    // =========================================================================
    // Character Helpers
    // =========================================================================

    fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.text.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    fn error(&mut self, pos: usize, length: usize, code: u32) {
        self.diagnostics.push(ScannerDiagnostic { pos, length, code });
    }

    /// True when only whitespace separates `pos` from the previous line break.
    fn at_line_start(&self, pos: usize) -> bool {
        self.bytes()[..pos]
            .iter()
            .rev()
            .take_while(|&&b| b != b'\n' && b != b'\r')
            .all(|&b| b == b' ' || b == b'\t')
    }

    fn skip_to_line_end(&mut self) {
        let rest = &self.bytes()[self.pos..];
        let advance = memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
        self.pos += advance;
    }

    // =========================================================================
    // Trivia
    // =========================================================================

    fn skip_trivia(&mut self) {
        loop {
            let Some(b) = self.peek_byte(0) else {
                return;
            };
            match b {
                b'\n' | b'\r' => {
                    self.token_flags |= token_flags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                }
                b' ' | b'\t' | 0x0B | 0x0C => self.pos += 1,
                b'/' if self.peek_byte(1) == Some(b'/') => self.skip_to_line_end(),
                b'/' if self.peek_byte(1) == Some(b'*') => {
                    let start = self.pos;
                    let rest = &self.bytes()[self.pos + 2..];
                    match memmem::find(rest, b"*/") {
                        Some(end) => self.pos += 2 + end + 2,
                        None => {
                            self.pos = self.text.len();
                            self.error(start, 2, diagnostic_codes::ASTERISK_SLASH_EXPECTED);
                        }
                    }
                }
                b'#' if self.at_line_start(self.pos) => self.skip_to_line_end(),
                _ => match self.peek_char() {
                    Some(ch) if ch.is_whitespace() => self.pos += ch.len_utf8(),
                    _ => return,
                },
            }
        }
    }

    // =========================================================================
    // Scan
    // =========================================================================

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_flags = token_flags::NONE;
        self.token_value.clear();
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(b) = self.peek_byte(0) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match b {
            b'{' => self.punct(1, SyntaxKind::OpenBraceToken),
            b'}' => self.punct(1, SyntaxKind::CloseBraceToken),
            b'(' => self.punct(1, SyntaxKind::OpenParenToken),
            b')' => self.punct(1, SyntaxKind::CloseParenToken),
            b'[' => self.punct(1, SyntaxKind::OpenBracketToken),
            b']' => self.punct(1, SyntaxKind::CloseBracketToken),
            b'<' => self.punct(1, SyntaxKind::LessThanToken),
            b'>' => self.punct(1, SyntaxKind::GreaterThanToken),
            b';' => self.punct(1, SyntaxKind::SemicolonToken),
            b',' => self.punct(1, SyntaxKind::CommaToken),
            b':' if self.peek_byte(1) == Some(b':') => self.punct(2, SyntaxKind::ColonColonToken),
            b':' => self.punct(1, SyntaxKind::ColonToken),
            b'=' if self.peek_byte(1) == Some(b'>') => {
                self.punct(2, SyntaxKind::EqualsGreaterThanToken)
            }
            b'=' => self.punct(1, SyntaxKind::EqualsToken),
            b'+' => self.punct(1, SyntaxKind::PlusToken),
            b'-' => self.punct(1, SyntaxKind::MinusToken),
            b'*' => self.punct(1, SyntaxKind::AsteriskToken),
            b'/' => self.punct(1, SyntaxKind::SlashToken),
            b'%' => self.punct(1, SyntaxKind::PercentToken),
            b'?' => self.punct(1, SyntaxKind::QuestionToken),
            b'!' => self.punct(1, SyntaxKind::ExclamationToken),
            b'&' => self.punct(1, SyntaxKind::AmpersandToken),
            b'|' => self.punct(1, SyntaxKind::BarToken),
            b'^' => self.punct(1, SyntaxKind::CaretToken),
            b'~' => self.punct(1, SyntaxKind::TildeToken),
            b'.' if self.peek_byte(1).is_some_and(|d| d.is_ascii_digit()) => {
                self.scan_number()
            }
            b'.' => self.punct(1, SyntaxKind::DotToken),
            b'0'..=b'9' => self.scan_number(),
            b'"' => {
                if self.bytes()[self.pos..].starts_with(b"\"\"\"") {
                    self.scan_raw_string(0)
                } else {
                    self.pos += 1;
                    self.scan_regular_string()
                }
            }
            b'\'' => self.scan_char(),
            b'@' => self.scan_at(),
            b'$' => self.scan_interpolated(),
            _ => self.scan_identifier_or_unknown(),
        };
        self.token
    }

    fn punct(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    fn scan_identifier_or_unknown(&mut self) -> SyntaxKind {
        match self.peek_char() {
            Some(ch) if is_identifier_start(ch) => {
                let name = self.scan_identifier_text();
                let kind = keyword_kind(&name).unwrap_or(SyntaxKind::Identifier);
                self.token_value = name;
                kind
            }
            Some(ch) => {
                let start = self.pos;
                self.pos += ch.len_utf8();
                self.error(start, ch.len_utf8(), diagnostic_codes::INVALID_CHARACTER);
                SyntaxKind::Unknown
            }
            None => SyntaxKind::EndOfFileToken,
        }
    }

    fn scan_identifier_text(&mut self) -> String {
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if is_identifier_part(ch) {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
        self.text[start..self.pos].to_string()
    }

    /// `@identifier`, `@"verbatim"` or `@$"interpolated verbatim"`.
    fn scan_at(&mut self) -> SyntaxKind {
        match self.peek_byte(1) {
            Some(b'"') => {
                self.pos += 2;
                self.scan_verbatim_string()
            }
            Some(b'$') if self.peek_byte(2) == Some(b'"') => {
                self.pos += 3;
                self.skip_interpolated_body(true);
                SyntaxKind::InterpolatedStringLiteral
            }
            _ => {
                let next = self.text.get(self.pos + 1..).and_then(|s| s.chars().next());
                if next.is_some_and(is_identifier_start) {
                    self.pos += 1;
                    self.token_value = self.scan_identifier_text();
                    self.token_flags |= token_flags::VERBATIM_IDENTIFIER;
                    SyntaxKind::Identifier
                } else {
                    let start = self.pos;
                    self.pos += 1;
                    self.error(start, 1, diagnostic_codes::INVALID_CHARACTER);
                    SyntaxKind::Unknown
                }
            }
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let bytes = self.bytes();
        let mut end = self.pos;
        if bytes[end] == b'0' && matches!(bytes.get(end + 1), Some(b'x' | b'X' | b'b' | b'B')) {
            end += 2;
        }
        while let Some(&b) = bytes.get(end) {
            let exponent_sign = matches!(b, b'+' | b'-')
                && matches!(bytes.get(end.wrapping_sub(1)), Some(b'e' | b'E'))
                && !self.text[self.pos..end].starts_with("0x")
                && !self.text[self.pos..end].starts_with("0X");
            if b.is_ascii_alphanumeric() || b == b'_' || exponent_sign {
                end += 1;
            } else if b == b'.' && bytes.get(end + 1).is_some_and(|d| d.is_ascii_digit()) {
                end += 1;
            } else {
                break;
            }
        }
        self.pos = end;
        self.token_value = self.text[self.token_start..end].to_string();
        SyntaxKind::NumericLiteral
    }

    // =========================================================================
    // Strings and Characters
    // =========================================================================

    /// Body of `"..."` after the opening quote.
    fn scan_regular_string(&mut self) -> SyntaxKind {
        let mut value = String::new();
        loop {
            let Some(ch) = self.peek_char() else {
                self.unterminated(diagnostic_codes::UNTERMINATED_STRING_LITERAL);
                break;
            };
            match ch {
                '"' => {
                    self.pos += 1;
                    break;
                }
                '\n' | '\r' => {
                    self.unterminated(diagnostic_codes::UNTERMINATED_STRING_LITERAL);
                    break;
                }
                '\\' => self.scan_escape(&mut value),
                _ => {
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    /// Body of `@"..."` after the opening quote; `""` is an escaped quote.
    fn scan_verbatim_string(&mut self) -> SyntaxKind {
        let mut value = String::new();
        loop {
            let Some(ch) = self.peek_char() else {
                self.unterminated(diagnostic_codes::UNTERMINATED_STRING_LITERAL);
                break;
            };
            if ch == '"' {
                if self.peek_byte(1) == Some(b'"') {
                    value.push('"');
                    self.pos += 2;
                    continue;
                }
                self.pos += 1;
                break;
            }
            value.push(ch);
            self.pos += ch.len_utf8();
        }
        self.token_value = value;
        SyntaxKind::VerbatimStringLiteral
    }

    /// `"""..."""` raw string, optionally preceded by `dollars` `$` signs.
    fn scan_raw_string(&mut self, dollars: usize) -> SyntaxKind {
        let quotes = self.bytes()[self.pos..]
            .iter()
            .take_while(|&&b| b == b'"')
            .count();
        self.pos += quotes;
        let content_start = self.pos;
        let delimiter = "\"".repeat(quotes);

        let Some(found) = memmem::find(&self.bytes()[content_start..], delimiter.as_bytes()) else {
            self.pos = self.text.len();
            self.unterminated(diagnostic_codes::UNTERMINATED_STRING_LITERAL);
            return SyntaxKind::RawStringLiteral;
        };
        let content_end = content_start + found;
        self.pos = content_end + quotes;
        // Trailing quotes beyond the delimiter length belong to the literal
        while self.peek_byte(0) == Some(b'"') {
            self.pos += 1;
        }

        if dollars > 0 {
            return SyntaxKind::InterpolatedStringLiteral;
        }
        self.token_value = dedent_raw_content(&self.text[content_start..content_end]);
        SyntaxKind::RawStringLiteral
    }

    fn scan_char(&mut self) -> SyntaxKind {
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.peek_char() else {
                self.unterminated(diagnostic_codes::UNTERMINATED_CHARACTER_LITERAL);
                break;
            };
            match ch {
                '\'' => {
                    self.pos += 1;
                    break;
                }
                '\n' | '\r' => {
                    self.unterminated(diagnostic_codes::UNTERMINATED_CHARACTER_LITERAL);
                    break;
                }
                '\\' => self.scan_escape(&mut value),
                _ => {
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
        self.token_value = value;
        SyntaxKind::CharacterLiteral
    }

    fn unterminated(&mut self, code: u32) {
        self.token_flags |= token_flags::UNTERMINATED;
        let start = self.token_start;
        self.error(start, self.pos - start, code);
    }

    /// Decode one escape sequence starting at `\`.
    fn scan_escape(&mut self, out: &mut String) {
        self.pos += 1;
        let Some(ch) = self.peek_char() else {
            return;
        };
        self.pos += ch.len_utf8();
        let decoded = match ch {
            '\'' => '\'',
            '"' => '"',
            '\\' => '\\',
            '0' => '\0',
            'a' => '\u{7}',
            'b' => '\u{8}',
            'f' => '\u{C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{B}',
            'u' => return self.push_hex_escape(out, 4, 4),
            'U' => return self.push_hex_escape(out, 8, 8),
            'x' => return self.push_hex_escape(out, 1, 4),
            other => other,
        };
        out.push(decoded);
    }

    /// `\u` and `\x` produce UTF-16 code units: a high surrogate followed by a
    /// `\u` low surrogate decodes to one scalar. Lone surrogates become U+FFFD.
    fn push_hex_escape(&mut self, out: &mut String, min: usize, max: usize) {
        let Some(value) = self.scan_hex_digits(min, max) else {
            return;
        };
        let value = if (0xD800..=0xDBFF).contains(&value) {
            self.scan_low_surrogate()
                .map_or(value, |low| 0x10000 + ((value - 0xD800) << 10) + (low - 0xDC00))
        } else {
            value
        };
        out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    /// Consume `\uXXXX` when it encodes a low surrogate.
    fn scan_low_surrogate(&mut self) -> Option<u32> {
        let rest = &self.bytes()[self.pos..];
        if !rest.starts_with(b"\\u")
            || rest.len() < 6
            || !rest[2..6].iter().all(u8::is_ascii_hexdigit)
        {
            return None;
        }
        let low = u32::from_str_radix(&self.text[self.pos + 2..self.pos + 6], 16).ok()?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return None;
        }
        self.pos += 6;
        Some(low)
    }

    fn scan_hex_digits(&mut self, min: usize, max: usize) -> Option<u32> {
        let digits = self.bytes()[self.pos..]
            .iter()
            .take(max)
            .take_while(|b| b.is_ascii_hexdigit())
            .count();
        if digits < min {
            return None;
        }
        let hex = &self.text[self.pos..self.pos + digits];
        self.pos += digits;
        u32::from_str_radix(hex, 16).ok()
    }

    // =========================================================================
    // Interpolated Strings
    // =========================================================================

    /// `$"..."`, `$@"..."`, `$"""..."""` and `$$"""..."""`. Kept opaque.
    fn scan_interpolated(&mut self) -> SyntaxKind {
        let dollars = self.bytes()[self.pos..]
            .iter()
            .take_while(|&&b| b == b'$')
            .count();
        let after = self.pos + dollars;
        let rest = &self.bytes()[after..];
        if rest.starts_with(b"\"\"\"") {
            self.pos = after;
            return self.scan_raw_string(dollars);
        }
        if rest.starts_with(b"@\"") {
            self.pos = after + 2;
            self.skip_interpolated_body(true);
            return SyntaxKind::InterpolatedStringLiteral;
        }
        if rest.starts_with(b"\"") {
            self.pos = after + 1;
            self.skip_interpolated_body(false);
            return SyntaxKind::InterpolatedStringLiteral;
        }
        let start = self.pos;
        self.pos += 1;
        self.error(start, 1, diagnostic_codes::INVALID_CHARACTER);
        SyntaxKind::Unknown
    }

    /// Skip an interpolated string body, including nested holes.
    fn skip_interpolated_body(&mut self, verbatim: bool) {
        loop {
            let Some(b) = self.peek_byte(0) else {
                self.unterminated(diagnostic_codes::UNTERMINATED_STRING_LITERAL);
                return;
            };
            match b {
                b'"' if verbatim && self.peek_byte(1) == Some(b'"') => self.pos += 2,
                b'"' => {
                    self.pos += 1;
                    return;
                }
                b'\\' if !verbatim => self.pos += 2.min(self.text.len() - self.pos),
                b'\n' | b'\r' if !verbatim => {
                    self.unterminated(diagnostic_codes::UNTERMINATED_STRING_LITERAL);
                    return;
                }
                b'{' if self.peek_byte(1) == Some(b'{') => self.pos += 2,
                b'{' => {
                    self.pos += 1;
                    self.skip_interpolation_hole();
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Skip `{ expr }` inside an interpolated string; strings inside the hole nest.
    fn skip_interpolation_hole(&mut self) {
        let mut depth = 0usize;
        while let Some(b) = self.peek_byte(0) {
            match b {
                b'{' | b'(' | b'[' => {
                    depth += 1;
                    self.pos += 1;
                }
                b')' | b']' => {
                    depth = depth.saturating_sub(1);
                    self.pos += 1;
                }
                b'}' if depth == 0 => {
                    self.pos += 1;
                    return;
                }
                b'}' => {
                    depth -= 1;
                    self.pos += 1;
                }
                b'"' => {
                    self.pos += 1;
                    self.scan_regular_string();
                }
                b'@' if self.peek_byte(1) == Some(b'"') => {
                    self.pos += 2;
                    self.scan_verbatim_string();
                }
                b'$' => {
                    self.scan_interpolated();
                }
                b'\'' => {
                    self.scan_char();
                }
                _ => self.pos += 1,
            }
        }
    }
}

// =============================================================================
// Free Helpers
// =============================================================================

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

/// Apply raw string literal rules: single-line content is taken as is;
/// multi-line content drops the opening and closing lines and removes the
/// closing line's indentation from every line.
fn dedent_raw_content(content: &str) -> String {
    if memchr(b'\n', content.as_bytes()).is_none() {
        return content.to_string();
    }
    let lines: Vec<&str> = content.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    let Some((last, middle)) = lines[1..].split_last() else {
        return String::new();
    };
    let indent = last.len() - last.trim_start().len();
    middle
        .iter()
        .map(|line| line.get(indent..).unwrap_or(line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}
