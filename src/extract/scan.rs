//! Record scanning over a mapped file
//!
//! # Format
//!
//! A record starts with a `>` marker as the first byte of a line. The rest of
//! that line is the header; every following line up to the next marker line
//! (or end of file) is the body:
//!
//! ```text
//! >seq1 description
//! GATTACAGATTACA
//! TGCATGCA
//! >seq2
//! ACGTACGT
//! ```
//!
//! A `>` anywhere other than the start of a line is ordinary content.

use crate::error::{ExtractError, Result};
use crate::extract::matcher::{CaptureSlots, HeaderMatcher};
use crate::io::HeaderBuffer;
use memchr::memchr;
use std::ops::Range;

/// Byte that introduces a record header
pub const RECORD_MARKER: u8 = b'>';

/// Location of a matched record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHit {
    /// Offset of the `>` marker
    pub marker: usize,
    /// Body bytes; `body.end` is where the next record starts
    pub body: Range<usize>,
}

/// Offset of the first record marker at or after `from`
pub fn find_marker(data: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;
    while pos < data.len() {
        let found = pos + memchr(RECORD_MARKER, &data[pos..])?;
        if found == 0 || data[found - 1] == b'\n' {
            return Some(found);
        }
        pos = found + 1;
    }
    None
}

/// Scan forward from `from` for the next record whose header matches
///
/// Each header is copied into `header` before matching, so after a hit the
/// buffer holds the matched header. When `captures` is given the matcher
/// records capture spans into it; otherwise headers are only tested.
///
/// # Errors
///
/// - [`ExtractError::NoEol`] if a reached header has no line terminator
/// - [`ExtractError::Alloc`] if the header buffer cannot grow
pub fn next_match(
    data: &[u8],
    from: usize,
    matcher: &mut HeaderMatcher,
    header: &mut HeaderBuffer,
    mut captures: Option<&mut CaptureSlots>,
) -> Result<Option<RecordHit>> {
    let mut pos = from.min(data.len());

    while let Some(marker) = find_marker(data, pos) {
        let header_end = memchr(b'\n', &data[marker..])
            .map(|i| marker + i)
            .ok_or(ExtractError::NoEol { offset: marker })?;

        let text = header.fill(&data[marker + 1..header_end])?;
        let matched = match captures.as_deref_mut() {
            Some(slots) => matcher.match_into(text, slots),
            None => matcher.is_match(text),
        };

        if matched {
            let body_start = header_end + 1;
            let body_end = find_marker(data, body_start).unwrap_or(data.len());
            return Ok(Some(RecordHit {
                marker,
                body: body_start..body_end,
            }));
        }
        pos = header_end + 1;
    }

    Ok(None)
}
