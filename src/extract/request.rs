//! What to extract: a header pattern and a coordinate window

use crate::extract::matcher::MatchOptions;
use crate::types::{Window, WindowEnd};

/// Header pattern, window and pattern options for an extraction
///
/// # Example
///
/// ```
/// use fasta_extract::{ExtractRequest, Window};
///
/// let request = ExtractRequest::new("^chr1 ")
///     .with_window(Window::new(100, 200))
///     .extended(true);
/// assert_eq!(request.pattern(), "^chr1 ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRequest {
    pattern: String,
    window: Window,
    options: MatchOptions,
}

impl ExtractRequest {
    /// Whole sequence of records matching `pattern` (POSIX basic syntax)
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            window: Window::entire(),
            options: MatchOptions::basic(),
        }
    }

    /// Set the coordinate window
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Set the window from explicit coordinates
    pub fn with_range(self, start: u64, end: WindowEnd) -> Self {
        self.with_window(Window { start, end })
    }

    /// Replace all pattern options
    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Use POSIX extended syntax
    pub fn extended(mut self, extended: bool) -> Self {
        self.options.extended = extended;
        self
    }

    /// Match headers ignoring ASCII case
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.options.case_insensitive = enabled;
        self
    }

    /// Record capture spans for matched headers
    pub fn report_captures(mut self, enabled: bool) -> Self {
        self.options.report_captures = enabled;
        self
    }

    /// Header pattern as supplied
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Requested window
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Pattern options
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }
}
