//! Regex-driven extraction from FASTA-style files
//!
//! # Pipeline
//!
//! 1. [`MappedSource`](crate::io::MappedSource) maps the whole file read-only
//! 2. [`scan`] finds the next `>` line whose header matches a
//!    [`HeaderMatcher`] and delimits its body
//! 3. [`window`] maps interbase coordinates onto the wrapped body and copies
//!    the requested bases with line breaks removed
//!
//! [`ExtractionSession`] keeps the scan position between calls;
//! [`Extractions`] drives a session over every matching record.
//!
//! # Example
//!
//! ```no_run
//! use fasta_extract::extract::{extract, extract_first};
//! use fasta_extract::{ExtractRequest, Window, WindowEnd};
//!
//! // Bases 100..200 of the first record whose header starts with "chr2 "
//! let request = ExtractRequest::new("^chr2 ").with_window(Window::new(100, 200));
//! let sequence = extract("genome.fa", &request)?;
//!
//! // The whole first record named "chrM"
//! let mito = extract_first("genome.fa", "^chrM", 0, WindowEnd::Entire)?;
//! # Ok::<(), fasta_extract::ExtractError>(())
//! ```

pub mod config;
pub mod iter;
pub mod matcher;
pub mod request;
pub mod scan;
pub mod session;
pub mod window;

pub use config::{ExtractConfig, ExtractConfigBuilder};
pub use iter::Extractions;
pub use matcher::{CaptureSlots, HeaderMatcher, MatchOptions};
pub use request::ExtractRequest;
pub use session::{ExtractionSession, Outcome};
pub use window::{copy_window, resolve, ResolvedWindow};

use crate::error::Result;
use crate::types::{Window, WindowEnd};
use std::path::Path;

/// Extract the window of the first record matching the request
///
/// Opens, scans and releases within the call. Header and captures are not
/// kept; use an [`ExtractionSession`] to inspect them.
///
/// # Errors
///
/// Any [`ExtractError`](crate::ExtractError);
/// [`NoMatch`](crate::ExtractError::NoMatch) if no header matches.
pub fn extract<P: AsRef<Path>>(path: P, request: &ExtractRequest) -> Result<Vec<u8>> {
    let request = request.clone().report_captures(false);
    ExtractionSession::new().extract(path, &request, &ExtractConfig::single())
}

/// Bases `start..end` of the first record whose header matches `pattern`
///
/// `pattern` uses POSIX basic syntax.
pub fn extract_first<P: AsRef<Path>>(
    path: P,
    pattern: &str,
    start: u64,
    end: WindowEnd,
) -> Result<Vec<u8>> {
    let request = ExtractRequest::new(pattern).with_window(Window { start, end });
    extract(path, &request)
}
