//! Iterator over every matching record of a file
//!
//! [`Extractions`] wraps an [`ExtractionSession`] whose mapping is acquired
//! when the iterator opens and released when it finishes, fails, is closed,
//! or is dropped. The pattern is compiled once.

use crate::error::Result;
use crate::extract::config::ExtractConfig;
use crate::extract::matcher::HeaderMatcher;
use crate::extract::request::ExtractRequest;
use crate::extract::session::ExtractionSession;
use crate::types::{Extraction, Window};
use std::iter::FusedIterator;
use std::path::Path;

/// Matching records of one file, in file order
///
/// Yields one `Ok` item per matching record. Running off the end of the file
/// ends the iteration; any other failure is yielded once as `Err` and ends it.
///
/// # Example
///
/// ```no_run
/// use fasta_extract::{ExtractRequest, Extractions, Window};
///
/// let request = ExtractRequest::new("^chr").with_window(Window::new(0, 100));
/// for extraction in Extractions::open("genome.fa", &request)? {
///     let extraction = extraction?;
///     println!("{}\t{}", extraction.matched.header_str(), extraction.sequence.len());
/// }
/// # Ok::<(), fasta_extract::ExtractError>(())
/// ```
#[derive(Debug)]
pub struct Extractions {
    session: ExtractionSession,
    matcher: HeaderMatcher,
    window: Window,
    suppress_diagnostics: bool,
    finished: bool,
}

impl Extractions {
    /// Compile the request's pattern and map `path`
    ///
    /// # Errors
    ///
    /// Pattern compilation and file acquisition errors.
    pub fn open<P: AsRef<Path>>(path: P, request: &ExtractRequest) -> Result<Self> {
        Self::starting_at(path, request, 0)
    }

    /// As [`open`](Self::open), scanning from byte `offset`
    pub fn starting_at<P: AsRef<Path>>(
        path: P,
        request: &ExtractRequest,
        offset: usize,
    ) -> Result<Self> {
        Self::open_with(path, request, offset, false)
    }

    /// Open scanning from byte `offset`, logging failures unless suppressed
    ///
    /// Suppression covers failures met while opening as well as while
    /// iterating.
    ///
    /// # Errors
    ///
    /// Pattern compilation and file acquisition errors.
    pub fn open_with<P: AsRef<Path>>(
        path: P,
        request: &ExtractRequest,
        offset: usize,
        suppress_diagnostics: bool,
    ) -> Result<Self> {
        let mut session = ExtractionSession::starting_at(offset);
        let prepared = HeaderMatcher::compile(request.pattern(), request.options())
            .and_then(|matcher| session.acquire(path.as_ref(), false).map(|()| matcher));
        let config = ExtractConfig::first().with_suppressed_diagnostics(suppress_diagnostics);
        let matcher = session.settle(prepared, &config)?;

        Ok(Self {
            session,
            matcher,
            window: *request.window(),
            suppress_diagnostics,
            finished: false,
        })
    }

    /// Do not log failures met while iterating
    pub fn suppress_diagnostics(mut self, suppress: bool) -> Self {
        self.suppress_diagnostics = suppress;
        self
    }

    /// Stop iterating and release the mapping
    pub fn close(&mut self) {
        self.finished = true;
        self.session.release();
    }

    /// Byte offset where the next scan begins
    pub fn resume_offset(&self) -> usize {
        self.session.resume_offset()
    }

    /// `true` once the end of the file has been reached
    pub fn is_exhausted(&self) -> bool {
        self.session.is_exhausted()
    }

    /// Underlying session, for its last error and last match
    pub fn session(&self) -> &ExtractionSession {
        &self.session
    }
}

impl Iterator for Extractions {
    type Item = Result<Extraction>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.session.next_record(&mut self.matcher, &self.window);
        let config = if result.is_ok() {
            ExtractConfig::middle()
        } else {
            self.finished = true;
            ExtractConfig::last()
        };
        let config = config.with_suppressed_diagnostics(self.suppress_diagnostics);

        match self.session.settle(result, &config) {
            Ok(extraction) => Some(Ok(extraction)),
            Err(err) if err.is_no_match() => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl FusedIterator for Extractions {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, ExtractError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fasta(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_yields_matches_in_order() {
        let file = fasta(b">a1\nAC\n>b\nGG\n>a2\nGT\nTT\n");
        let mut records = Extractions::open(file.path(), &ExtractRequest::new("^a")).unwrap();

        let first = records.next().unwrap().unwrap();
        assert_eq!(first.matched.header, b"a1");
        assert_eq!(first.sequence, b"AC");
        assert_eq!(first.record_offset, 0);

        let second = records.next().unwrap().unwrap();
        assert_eq!(second.matched.header, b"a2");
        assert_eq!(second.sequence, b"GTTT");
        assert_eq!(second.record_offset, 13);

        assert!(records.next().is_none());
        assert!(records.next().is_none());
        assert!(records.is_exhausted());
        assert!(!records.session().is_mapped());
        assert_eq!(records.session().last_error(), Some(ErrorCode::NoMatch));
    }

    #[test]
    fn test_window_applies_to_every_record() {
        let file = fasta(b">a\nACGT\n>b\nTTGCA\n");
        let request = ExtractRequest::new(".").with_window(Window::new(1, 3));
        let sequences: Vec<Vec<u8>> = Extractions::open(file.path(), &request)
            .unwrap()
            .map(|e| e.unwrap().sequence)
            .collect();

        assert_eq!(sequences, vec![b"CG".to_vec(), b"TG".to_vec()]);
    }

    #[test]
    fn test_error_ends_iteration() {
        let file = fasta(b">a\nAC\n>b");
        let mut records = Extractions::open(file.path(), &ExtractRequest::new("."))
            .unwrap()
            .suppress_diagnostics(true);

        assert!(records.next().unwrap().is_ok());
        let err = records.next().unwrap().unwrap_err();
        assert!(matches!(err, ExtractError::NoEol { offset: 6 }));
        assert!(records.next().is_none());
        assert!(!records.session().is_mapped());
    }

    #[test]
    fn test_close_releases() {
        let file = fasta(b">a\nAC\n>b\nGT\n");
        let mut records = Extractions::open(file.path(), &ExtractRequest::new(".")).unwrap();
        assert!(records.session().is_mapped());

        records.next().unwrap().unwrap();
        records.close();
        assert!(!records.session().is_mapped());
        assert!(records.next().is_none());
    }

    #[test]
    fn test_starting_at_skips_earlier_records() {
        let file = fasta(b">a\nAC\n>b\nGT\n");
        let request = ExtractRequest::new(".");
        let headers: Vec<Vec<u8>> = Extractions::starting_at(file.path(), &request, 1)
            .unwrap()
            .map(|e| e.unwrap().matched.header)
            .collect();

        assert_eq!(headers, vec![b"b".to_vec()]);
    }

    #[test]
    fn test_open_errors() {
        let err =
            Extractions::open("/nonexistent/file.fa", &ExtractRequest::new(".")).unwrap_err();
        assert!(matches!(err, ExtractError::Open { .. }));

        let file = fasta(b">a\nAC\n");
        let err = Extractions::open(file.path(), &ExtractRequest::new("[")).unwrap_err();
        assert!(matches!(err, ExtractError::RegexCompile { .. }));
    }

    #[test]
    fn test_open_with_offset_and_suppression() {
        let file = fasta(b">a\nAC\n>b\nGT\n>b2\nTT\n");
        let mut records =
            Extractions::open_with(file.path(), &ExtractRequest::new("^b"), 1, true).unwrap();

        assert_eq!(records.next().unwrap().unwrap().sequence, b"GT");
        assert_eq!(records.next().unwrap().unwrap().sequence, b"TT");
        assert!(records.next().is_none());

        let err = Extractions::open_with("/nonexistent/file.fa", &ExtractRequest::new("."), 0, true)
            .unwrap_err();
        assert!(matches!(err, ExtractError::Open { .. }));
    }
}
