//! Extraction session: one scan cursor over one file across many calls
//!
//! # State
//!
//! A session starts at byte offset 0 (or a caller-chosen offset) with nothing
//! mapped. Each scanning call continues from the resume offset, finds the next
//! record whose header matches, copies the requested window and moves the
//! resume offset to the start of the following record.
//!
//! When no further header matches, the resume offset moves to the end of the
//! file, the last match is cleared and the call fails with
//! [`ExtractError::NoMatch`]. From then on the session is exhausted: every
//! scanning call returns `NoMatch` again without rescanning.
//!
//! Any other failure is recorded in [`last_error`](ExtractionSession::last_error)
//! and returned. The resume offset is not meaningful after a failure.
//!
//! # Mapping ownership
//!
//! Each call's [`ExtractConfig`] decides whether the file is opened by the
//! call or a retained mapping is reused, and whether the mapping is kept
//! afterwards. A retained mapping holds the file open until a releasing call,
//! [`release`](ExtractionSession::release), or drop.
//!
//! A session is a single cursor and is mutated by every call; share it across
//! threads only behind external synchronisation.

use crate::error::{ErrorCode, ExtractError, Result};
use crate::extract::config::ExtractConfig;
use crate::extract::matcher::{CaptureSlots, HeaderMatcher};
use crate::extract::request::ExtractRequest;
use crate::extract::scan;
use crate::extract::window::copy_window;
use crate::io::{HeaderBuffer, MappedSource};
use crate::types::{Extraction, MatchResult, Window};
use log::{debug, error};
use std::ops::Range;
use std::path::Path;

/// Result of a successful engine call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A scanning call matched a record; the requested window, possibly empty
    Sequence(Vec<u8>),
    /// A map-only call acquired and retained the mapping
    Mapped,
    /// A release-only call released the mapping
    Released,
}

/// Scan cursor and reusable state for repeated extractions from one file
///
/// # Example
///
/// ```no_run
/// use fasta_extract::{ExtractConfig, ExtractRequest, ExtractionSession};
///
/// let request = ExtractRequest::new("^chr");
/// let mut session = ExtractionSession::new();
///
/// let first = session.extract("genome.fa", &request, &ExtractConfig::first())?;
/// let header = session.header().unwrap_or_default();
/// println!("{}: {} bases", String::from_utf8_lossy(header), first.len());
///
/// while let Ok(seq) = session.extract("genome.fa", &request, &ExtractConfig::middle()) {
///     println!("{} bases", seq.len());
/// }
/// session.release();
/// # Ok::<(), fasta_extract::ExtractError>(())
/// ```
#[derive(Debug, Default)]
pub struct ExtractionSession {
    resume_offset: usize,
    last_error: Option<ErrorCode>,
    last_match: Option<MatchResult>,
    header: HeaderBuffer,
    captures: CaptureSlots,
    source: Option<MappedSource>,
    exhausted: bool,
}

impl ExtractionSession {
    /// Session that scans from the start of the file
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that scans from byte `offset`
    ///
    /// The offset need not fall on a record boundary: scanning resumes at the
    /// first record marker at or after it.
    pub fn starting_at(offset: usize) -> Self {
        Self {
            resume_offset: offset,
            ..Self::default()
        }
    }

    /// Run one engine call
    ///
    /// Scanning configurations return [`Outcome::Sequence`]; map-only and
    /// release-only configurations return [`Outcome::Mapped`] and
    /// [`Outcome::Released`] and ignore `request` (release-only also ignores
    /// `path`).
    ///
    /// # Errors
    ///
    /// Any [`ExtractError`]; [`ExtractError::NoMatch`] signals exhaustion.
    /// The error's code is stored in [`last_error`](Self::last_error).
    pub fn execute<P: AsRef<Path>>(
        &mut self,
        path: P,
        request: &ExtractRequest,
        config: &ExtractConfig,
    ) -> Result<Outcome> {
        let result = if config.is_release_only() {
            Ok(Outcome::Released)
        } else if config.is_map_only() {
            self.acquire(path.as_ref(), false).map(|()| Outcome::Mapped)
        } else {
            self.scan_once(path.as_ref(), request, config)
                .map(Outcome::Sequence)
        };
        self.settle(result, config)
    }

    /// Extract the requested window of the next matching record
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute), plus [`ExtractError::InvalidConfig`] for
    /// a map-only or release-only configuration.
    pub fn extract<P: AsRef<Path>>(
        &mut self,
        path: P,
        request: &ExtractRequest,
        config: &ExtractConfig,
    ) -> Result<Vec<u8>> {
        if !config.scans() {
            let err = ExtractError::InvalidConfig(
                "extract needs a scanning configuration".to_string(),
            );
            self.record_failure(&err, config);
            return Err(err);
        }

        match self.execute(path, request, config)? {
            Outcome::Sequence(sequence) => Ok(sequence),
            Outcome::Mapped | Outcome::Released => Err(ExtractError::InvalidConfig(
                "extract needs a scanning configuration".to_string(),
            )),
        }
    }

    /// Acquire and retain a mapping of `path` without scanning
    ///
    /// Replaces any mapping already retained.
    pub fn map<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let config = ExtractConfig::map_only();
        let result = self.acquire(path.as_ref(), false);
        self.settle(result, &config)
    }

    /// Release a retained mapping
    ///
    /// Returns `true` if a mapping was held.
    pub fn release(&mut self) -> bool {
        self.source.take().is_some()
    }

    /// Byte offset where the next scan begins
    pub fn resume_offset(&self) -> usize {
        self.resume_offset
    }

    /// Code of the last call's failure, `None` after a success
    pub fn last_error(&self) -> Option<ErrorCode> {
        self.last_error
    }

    /// Header and captures of the last matched record
    pub fn last_match(&self) -> Option<&MatchResult> {
        self.last_match.as_ref()
    }

    /// Header text of the last matched record
    pub fn header(&self) -> Option<&[u8]> {
        self.last_match.as_ref().map(|m| m.header.as_slice())
    }

    /// Capture spans of the last matched record, whole match first
    pub fn captures(&self) -> &[Option<Range<usize>>] {
        self.last_match
            .as_ref()
            .map(|m| m.captures.as_slice())
            .unwrap_or_default()
    }

    /// `true` while a retained mapping is held
    pub fn is_mapped(&self) -> bool {
        self.source.is_some()
    }

    /// `true` once a scan has run off the end of the file
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn scan_once(
        &mut self,
        path: &Path,
        request: &ExtractRequest,
        config: &ExtractConfig,
    ) -> Result<Vec<u8>> {
        if self.exhausted {
            return Err(ExtractError::NoMatch);
        }
        let mut matcher = HeaderMatcher::compile(request.pattern(), request.options())?;
        self.acquire(path, config.reuse_mapping())?;
        self.next_record(&mut matcher, request.window())
            .map(|extraction| extraction.sequence)
    }

    /// Make sure a mapping is held, opening `path` unless reusing
    pub(crate) fn acquire(&mut self, path: &Path, reuse: bool) -> Result<()> {
        if reuse {
            return match self.source {
                Some(_) => Ok(()),
                None => Err(ExtractError::NoRetainedMapping),
            };
        }
        self.source = None;
        self.source = Some(MappedSource::acquire(path)?);
        Ok(())
    }

    /// Advance to the next matching record of the held mapping
    pub(crate) fn next_record(
        &mut self,
        matcher: &mut HeaderMatcher,
        window: &Window,
    ) -> Result<Extraction> {
        if self.exhausted {
            return Err(ExtractError::NoMatch);
        }
        let source = self
            .source
            .as_ref()
            .ok_or(ExtractError::NoRetainedMapping)?;
        let data = source.as_bytes();

        self.captures.clear();
        let captures = if matcher.reports_captures() {
            self.captures.prepare(matcher.capture_count())?;
            Some(&mut self.captures)
        } else {
            None
        };

        let found = scan::next_match(
            data,
            self.resume_offset,
            matcher,
            &mut self.header,
            captures,
        )?;
        let hit = match found {
            Some(hit) => hit,
            None => {
                debug!(
                    "No further match for {:?} in {:?}",
                    matcher.as_str(),
                    source.path()
                );
                self.resume_offset = data.len();
                self.last_match = None;
                self.exhausted = true;
                return Err(ExtractError::NoMatch);
            }
        };

        let sequence = copy_window(&data[hit.body.clone()], window)?;
        debug!(
            "Matched record at byte {} ({} bytes extracted)",
            hit.marker,
            sequence.len()
        );

        let matched = MatchResult::new(self.header.as_bytes().to_vec(), self.captures.to_vec());
        self.resume_offset = hit.body.end;
        self.last_match = Some(matched.clone());

        Ok(Extraction {
            matched,
            sequence,
            record_offset: hit.marker,
        })
    }

    /// Apply `config`'s retention and record the outcome of a call
    pub(crate) fn settle<T>(&mut self, result: Result<T>, config: &ExtractConfig) -> Result<T> {
        if !config.retain_mapping() && self.release() {
            debug!("Mapping released at end of call");
        }
        match &result {
            Ok(_) => self.last_error = None,
            Err(err) => self.record_failure(err, config),
        }
        result
    }

    fn record_failure(&mut self, err: &ExtractError, config: &ExtractConfig) {
        self.last_error = Some(err.code());
        if !err.is_no_match() && !config.suppress_diagnostics() {
            error!("{}", err);
        }
    }
}
