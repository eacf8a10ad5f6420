//! Fixed-width output of extracted sequences
//!
//! # Format
//!
//! Each record is written as a `>` header line followed by the sequence
//! wrapped at a fixed width (50 characters by default):
//!
//! ```text
//! >seq1 description
//! ACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTAC
//! GTACGT
//! ```
//!
//! Headers are always written with their `>` marker, so the output is itself
//! a valid FASTA file. An empty sequence produces the header line only. A
//! width of 0 disables wrapping. With reverse output enabled the sequence is
//! written reverse-complemented.

use crate::error::Result;
use crate::operations::reverse_complement;
use crate::types::MatchResult;
use std::io::Write;

/// Default line width for sequence wrapping
pub const DEFAULT_LINE_WIDTH: usize = 50;

/// Writer for extracted records
///
/// # Example
///
/// ```
/// use fasta_extract::io::SequenceWriter;
///
/// let mut out = Vec::new();
/// let mut writer = SequenceWriter::new(&mut out).with_line_width(4);
/// writer.write_record(b"seq1", b"ACGTAC")?;
/// writer.flush()?;
/// drop(writer);
///
/// assert_eq!(out, b">seq1\nACGT\nAC\n");
/// # Ok::<(), fasta_extract::ExtractError>(())
/// ```
pub struct SequenceWriter<W: Write> {
    inner: W,
    line_width: usize,
    reverse_complement: bool,
    records_written: usize,
}

impl<W: Write> SequenceWriter<W> {
    /// Create a writer with the default line width
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            line_width: DEFAULT_LINE_WIDTH,
            reverse_complement: false,
            records_written: 0,
        }
    }

    /// Set the line width (0 disables wrapping)
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = width;
        self
    }

    /// Write sequences reverse-complemented
    pub fn with_reverse_complement(mut self, enabled: bool) -> Self {
        self.reverse_complement = enabled;
        self
    }

    /// Write a header line and its wrapped sequence
    pub fn write_record(&mut self, header: &[u8], sequence: &[u8]) -> Result<()> {
        self.inner.write_all(b">")?;
        self.inner.write_all(header)?;
        self.inner.write_all(b"\n")?;
        self.write_sequence(sequence)?;
        self.records_written += 1;
        Ok(())
    }

    /// Write a matched record
    pub fn write_match(&mut self, matched: &MatchResult, sequence: &[u8]) -> Result<()> {
        self.write_record(&matched.header, sequence)
    }

    /// Write a sequence wrapped at the configured width
    pub fn write_sequence(&mut self, sequence: &[u8]) -> Result<()> {
        if sequence.is_empty() {
            return Ok(());
        }

        let oriented;
        let sequence = if self.reverse_complement {
            oriented = reverse_complement(sequence);
            &oriented[..]
        } else {
            sequence
        };

        let width = if self.line_width == 0 {
            sequence.len()
        } else {
            self.line_width
        };

        for line in sequence.chunks(width) {
            self.inner.write_all(line)?;
            self.inner.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}
