//! Header pattern matching
//!
//! Patterns use POSIX regular-expression syntax, basic (BRE) by default or
//! extended (ERE) when [`MatchOptions::extended`] is set. They are translated
//! to the `regex` crate's dialect and compiled as byte-oriented expressions
//! (Unicode off), so `.` matches any byte and case folding is ASCII-only.
//!
//! # Translation
//!
//! BRE:
//! - `\(` `\)` group, `\{m,n\}` is an interval, `\|` `\+` `\?` are the GNU
//!   alternation and repetition extensions
//! - bare `+ ? | ( ) { }` are literals
//! - `*` at the start of an expression is a literal
//! - `^` anchors only at the start of an expression, `$` only at its end
//!
//! Both dialects:
//! - inside a bracket expression a backslash is a literal, a leading `]` is a
//!   member, and `[:class:]` names pass through
//!
//! Back-references are not supported and fail to compile.

use crate::error::{ExtractError, Result};
use regex::bytes::{CaptureLocations, Regex, RegexBuilder};
use std::ops::Range;

/// Pattern compilation options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchOptions {
    /// POSIX extended syntax instead of basic
    pub extended: bool,
    /// ASCII case-insensitive matching
    pub case_insensitive: bool,
    /// Record capture spans for each match
    pub report_captures: bool,
}

impl MatchOptions {
    /// Basic syntax, case-sensitive, captures reported
    pub fn basic() -> Self {
        Self {
            extended: false,
            case_insensitive: false,
            report_captures: true,
        }
    }

    /// Extended syntax, case-sensitive, captures reported
    pub fn extended() -> Self {
        Self {
            extended: true,
            ..Self::basic()
        }
    }

    /// Set extended syntax
    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    /// Set case-insensitive matching
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Set capture reporting
    pub fn with_report_captures(mut self, report_captures: bool) -> Self {
        self.report_captures = report_captures;
        self
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self::basic()
    }
}

/// A compiled header pattern
#[derive(Debug, Clone)]
pub struct HeaderMatcher {
    regex: Regex,
    locations: CaptureLocations,
    report_captures: bool,
}

impl HeaderMatcher {
    /// Compile `pattern` under `options`
    ///
    /// # Errors
    ///
    /// [`ExtractError::RegexCompile`] if the pattern is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use fasta_extract::extract::{CaptureSlots, HeaderMatcher, MatchOptions};
    ///
    /// let mut matcher = HeaderMatcher::compile(r"chr\([0-9]*\)", &MatchOptions::basic())?;
    /// let mut slots = CaptureSlots::new();
    /// slots.prepare(matcher.capture_count())?;
    ///
    /// assert!(matcher.match_into(b"chr21 GRCh38", &mut slots));
    /// assert_eq!(slots.as_slice()[1], Some(3..5));
    /// # Ok::<(), fasta_extract::ExtractError>(())
    /// ```
    pub fn compile(pattern: &str, options: &MatchOptions) -> Result<Self> {
        let translated = if options.extended {
            translate_extended(pattern)
        } else {
            translate_basic(pattern)
        };

        let regex = RegexBuilder::new(&translated)
            .unicode(false)
            .case_insensitive(options.case_insensitive)
            .build()
            .map_err(|source| ExtractError::RegexCompile {
                pattern: pattern.to_string(),
                source,
            })?;
        let locations = regex.capture_locations();

        Ok(Self {
            regex,
            locations,
            report_captures: options.report_captures,
        })
    }

    /// Number of capture spans a match produces, whole match included
    pub fn capture_count(&self) -> usize {
        self.regex.captures_len()
    }

    /// Whether matches record capture spans
    pub fn reports_captures(&self) -> bool {
        self.report_captures
    }

    /// Pattern in the `regex` crate's dialect
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Test `header` without recording captures
    pub fn is_match(&self, header: &[u8]) -> bool {
        self.regex.is_match(header)
    }

    /// Test `header`, recording capture spans into `slots` on a match
    ///
    /// `slots` should have been prepared for [`capture_count`] spans; when
    /// capture reporting is off it is left empty.
    ///
    /// [`capture_count`]: HeaderMatcher::capture_count
    pub fn match_into(&mut self, header: &[u8], slots: &mut CaptureSlots) -> bool {
        slots.clear();
        if !self.report_captures {
            return self.regex.is_match(header);
        }
        if self.regex.captures_read(&mut self.locations, header).is_none() {
            return false;
        }
        slots.record(&self.locations);
        true
    }
}

/// Reusable storage for capture spans
///
/// Sized by [`prepare`](CaptureSlots::prepare): storage that is already large
/// enough is reused in place, storage that is too small is replaced by an
/// allocation of exactly the needed size.
#[derive(Debug, Clone, Default)]
pub struct CaptureSlots {
    spans: Vec<Option<Range<usize>>>,
}

impl CaptureSlots {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Make room for `needed` spans
    pub fn prepare(&mut self, needed: usize) -> Result<()> {
        if self.spans.capacity() >= needed {
            self.spans.clear();
            return Ok(());
        }

        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(needed)
            .map_err(|_| ExtractError::Alloc { requested: needed })?;
        self.spans = fresh;
        Ok(())
    }

    /// Number of spans storage is allocated for
    pub fn allocated(&self) -> usize {
        self.spans.capacity()
    }

    /// Spans recorded by the last successful match
    pub fn as_slice(&self) -> &[Option<Range<usize>>] {
        &self.spans
    }

    /// Owned copy of the recorded spans
    pub fn to_vec(&self) -> Vec<Option<Range<usize>>> {
        self.spans.clone()
    }

    /// Forget recorded spans, keeping the allocation
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    fn record(&mut self, locations: &CaptureLocations) {
        self.spans
            .extend((0..locations.len()).map(|i| locations.get(i).map(|(s, e)| s..e)));
    }
}

/// Rewrite a POSIX basic expression in the `regex` dialect
fn translate_basic(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    // Where `*` is literal and `^` anchors
    let mut expression_start = true;
    let mut i = 0;

    while i < chars.len() {
        let at_start = expression_start;
        expression_start = false;

        match chars[i] {
            '\\' => {
                i += 1;
                match chars.get(i) {
                    Some('(') | Some('|') => {
                        out.push(chars[i]);
                        expression_start = true;
                    }
                    Some(&c @ (')' | '{' | '}' | '+' | '?')) => out.push(c),
                    Some(&c) => {
                        out.push('\\');
                        out.push(c);
                    }
                    // Dangling backslash: left for the compiler to reject
                    None => out.push('\\'),
                }
            }
            '*' if at_start => out.push_str(r"\*"),
            '^' if at_start => {
                out.push('^');
                expression_start = true;
            }
            '^' => out.push_str(r"\^"),
            '$' if is_expression_end(&chars, i + 1) => out.push('$'),
            '$' => out.push_str(r"\$"),
            c @ ('+' | '?' | '|' | '(' | ')' | '{' | '}') => {
                out.push('\\');
                out.push(c);
            }
            '[' => i = copy_bracket(&chars, i, &mut out),
            c => out.push(c),
        }
        i += 1;
    }

    out
}

/// Rewrite a POSIX extended expression in the `regex` dialect
fn translate_extended(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                out.push('\\');
                if let Some(&c) = chars.get(i + 1) {
                    out.push(c);
                    i += 1;
                }
            }
            '[' => i = copy_bracket(&chars, i, &mut out),
            c => out.push(c),
        }
        i += 1;
    }

    out
}

/// `true` if position `i` ends a BRE expression (end of pattern, `\)` or `\|`)
fn is_expression_end(chars: &[char], i: usize) -> bool {
    i == chars.len() || (chars[i] == '\\' && matches!(chars.get(i + 1), Some(')') | Some('|')))
}

/// Copy the bracket expression opening at `chars[open]` into `out`
///
/// Returns the index of the last character consumed.
fn copy_bracket(chars: &[char], open: usize, out: &mut String) -> usize {
    let mut class = String::from("[");
    let mut j = open + 1;

    if chars.get(j) == Some(&'^') {
        class.push('^');
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        class.push_str(r"\]");
        j += 1;
    }

    while j < chars.len() {
        let c = chars[j];
        match c {
            ']' => {
                class.push(']');
                out.push_str(&class);
                return j;
            }
            '[' if chars.get(j + 1) == Some(&':') => match find_class_close(chars, j + 2) {
                Some(close) => {
                    class.extend(&chars[j..=close]);
                    j = close + 1;
                    continue;
                }
                None => class.push_str(r"\["),
            },
            '\\' | '[' | '&' | '~' => {
                class.push('\\');
                class.push(c);
            }
            '-' if chars.get(j + 1) == Some(&'-') => class.push_str(r"\-"),
            _ => class.push(c),
        }
        j += 1;
    }

    // Unterminated: emitted as-is so compilation reports it
    out.push_str(&class);
    chars.len() - 1
}

/// Index of the `]` closing a `[:name:]` class whose name starts at `from`
fn find_class_close(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len().saturating_sub(1))
        .find(|&k| chars[k] == ':' && chars[k + 1] == ']')
        .map(|k| k + 1)
}
