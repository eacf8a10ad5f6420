//! Common types used throughout fasta-extract

use std::borrow::Cow;
use std::ops::Range;

/// End of a coordinate window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEnd {
    /// Interbase position after the last requested base
    At(u64),
    /// Through the end of the sequence
    Entire,
}

/// Interbase coordinate window `[start, end)` over an unwrapped record body
///
/// Position 0 is before the first base and position N after the N-th base,
/// so a window denotes exactly `end - start` bases. A window with
/// `end <= start` is valid and selects nothing.
///
/// # Examples
///
/// ```
/// use fasta_extract::{Window, WindowEnd};
///
/// let window = Window::new(2, 6);
/// assert_eq!(window.end, WindowEnd::At(6));
///
/// let whole = Window::entire();
/// assert_eq!(whole.start, 0);
/// assert_eq!(whole.end, WindowEnd::Entire);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    /// Bases to skip before copying
    pub start: u64,
    /// Where copying stops
    pub end: WindowEnd,
}

impl Window {
    /// Window `[start, end)`
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            start,
            end: WindowEnd::At(end),
        }
    }

    /// The whole sequence
    pub fn entire() -> Self {
        Self::from_start(0)
    }

    /// Everything from `start` through the end of the sequence
    pub fn from_start(start: u64) -> Self {
        Self {
            start,
            end: WindowEnd::Entire,
        }
    }

    /// `count` bases beginning at `start`
    pub fn with_count(start: u64, count: u64) -> Self {
        Self::new(start, start.saturating_add(count))
    }

    /// `true` when the window can never select a base
    pub fn is_empty(&self) -> bool {
        match self.end {
            WindowEnd::At(end) => end <= self.start,
            WindowEnd::Entire => false,
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::entire()
    }
}

/// A matched header and the spans its pattern captured
///
/// `header` excludes the leading `>` marker and the line terminator.
/// `captures[0]` is the whole match; `captures[i]` is group `i`, `None` when
/// the group did not participate. Spans are byte offsets into `header`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Header text
    pub header: Vec<u8>,
    /// Captured spans, whole match first
    pub captures: Vec<Option<Range<usize>>>,
}

impl MatchResult {
    /// Create a new match result
    pub fn new(header: Vec<u8>, captures: Vec<Option<Range<usize>>>) -> Self {
        Self { header, captures }
    }

    /// Header as text, replacing invalid UTF-8
    pub fn header_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.header)
    }

    /// Record identifier: the header up to the first whitespace
    pub fn id(&self) -> &[u8] {
        let end = self
            .header
            .iter()
            .position(|b| b.is_ascii_whitespace())
            .unwrap_or(self.header.len());
        &self.header[..end]
    }

    /// Bytes of capture `index`, if it participated in the match
    pub fn capture(&self, index: usize) -> Option<&[u8]> {
        let span = self.captures.get(index)?.clone()?;
        self.header.get(span)
    }

    /// Capture `index` as text, replacing invalid UTF-8
    pub fn capture_str(&self, index: usize) -> Option<Cow<'_, str>> {
        self.capture(index).map(String::from_utf8_lossy)
    }
}

/// One record extracted by an iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Header and captures of the matched record
    pub matched: MatchResult,
    /// Requested window of the body, line breaks removed
    pub sequence: Vec<u8>,
    /// Byte offset of the record's `>` marker in the file
    pub record_offset: usize,
}

impl Extraction {
    /// Check if the extracted window is empty
    ///
    /// An empty window is a valid result, not an error.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
