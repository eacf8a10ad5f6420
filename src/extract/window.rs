//! Coordinate resolution and copying over wrapped record bodies
//!
//! A record body is the byte run between the header's line terminator and the
//! next record marker. It holds the sequence wrapped over any number of lines
//! of any length. Coordinates address the unwrapped sequence, so a window
//! `[start, end)` must be mapped back onto wrapped bytes before it can be
//! copied.
//!
//! # Algorithm
//!
//! 1. Walk the body's lines once, counting unwrapped bases. The first line
//!    whose running count passes `start` fixes the byte offset of the first
//!    requested base.
//! 2. Stop walking as soon as the count covers both `start` and an explicit
//!    `end`; the rest of a long body is never scanned.
//! 3. The copy length is `min(end, total) - start`, or `total - start` for
//!    [`WindowEnd::Entire`]. A negative length means an empty result.
//! 4. Count the quality-line spacers the window will need, so the output is
//!    reserved once at its final size.
//! 5. Copy line by line from the first requested base, dropping line breaks
//!    and truncating the last line to the exact length.
//!
//! # Quality-line spacing
//!
//! Quality files hold space-separated numbers wrapped across lines. Removing
//! line breaks would fuse the last number of one line with the first of the
//! next, so whenever a copied line ends in an ASCII digit and more bases
//! follow, a single space is inserted. Spacers are not bases: they lengthen the
//! output without shortening the window. The rule applies to every body,
//! whatever its content.

use crate::error::{ExtractError, Result};
use crate::types::{Window, WindowEnd};
use memchr::{memchr, memchr_iter};

/// A window mapped onto body bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindow {
    /// Byte offset in the body of the first requested base
    pub offset: usize,
    /// Number of bases to copy
    pub bases: usize,
    /// Quality-line spacers the copy will insert
    pub spacers: usize,
}

/// Map `window` onto `body`
///
/// # Example
///
/// ```
/// use fasta_extract::extract::resolve;
/// use fasta_extract::Window;
///
/// let resolved = resolve(b"ACGT\nACGT\n", &Window::new(2, 6));
/// assert_eq!(resolved.offset, 2);
/// assert_eq!(resolved.bases, 4);
/// assert_eq!(resolved.spacers, 0);
/// ```
pub fn resolve(body: &[u8], window: &Window) -> ResolvedWindow {
    let start = to_usize(window.start);
    let end = match window.end {
        WindowEnd::At(end) => Some(to_usize(end)),
        WindowEnd::Entire => None,
    };
    // Once this many bases are counted the scan can stop
    let enough = end.map(|end| end.max(start));

    let mut counted = 0usize;
    let mut offset = None;
    let mut line_start = 0usize;

    // The final segment is empty when the body ends with a terminator
    for line_end in memchr_iter(b'\n', body).chain(std::iter::once(body.len())) {
        let line_len = line_end - line_start;

        if offset.is_none() && counted + line_len > start {
            offset = Some(line_start + (start - counted));
        }
        counted += line_len;
        line_start = line_end + 1;

        if enough.map_or(false, |enough| counted >= enough) {
            break;
        }
    }

    let upto = match end {
        Some(end) if end < counted => end,
        _ => counted,
    };
    let bases = upto.saturating_sub(start);

    match offset {
        Some(offset) if bases > 0 => ResolvedWindow {
            offset,
            bases,
            spacers: count_spacers(body, offset, bases),
        },
        _ => ResolvedWindow {
            offset: body.len(),
            bases: 0,
            spacers: 0,
        },
    }
}

/// Digit-ended lines inside the window that are followed by more bases
fn count_spacers(body: &[u8], offset: usize, bases: usize) -> usize {
    let mut remaining = bases;
    let mut pos = offset;
    let mut spacers = 0;

    while remaining > 0 && pos <= body.len() {
        let line_end = memchr(b'\n', &body[pos..]).map_or(body.len(), |i| pos + i);
        let take = (line_end - pos).min(remaining);
        remaining -= take;

        if remaining > 0 && take > 0 && body[pos + take - 1].is_ascii_digit() {
            spacers += 1;
        }
        pos = line_end + 1;
    }

    spacers
}

/// Copy `window` out of `body` with line breaks removed
///
/// # Errors
///
/// [`ExtractError::Alloc`] if the output buffer cannot be allocated.
///
/// # Example
///
/// ```
/// use fasta_extract::extract::copy_window;
/// use fasta_extract::Window;
///
/// assert_eq!(copy_window(b"ACGT\nACGT\n", &Window::entire())?, b"ACGTACGT");
/// assert_eq!(copy_window(b"ACGT\nACGT\n", &Window::new(2, 6))?, b"GTAC");
/// assert_eq!(copy_window(b"12345\n67\n", &Window::entire())?, b"12345 67");
/// # Ok::<(), fasta_extract::ExtractError>(())
/// ```
pub fn copy_window(body: &[u8], window: &Window) -> Result<Vec<u8>> {
    let resolved = resolve(body, window);

    let requested = resolved
        .bases
        .checked_add(resolved.spacers)
        .ok_or(ExtractError::Alloc {
            requested: usize::MAX,
        })?;

    let mut out = Vec::new();
    out.try_reserve_exact(requested)
        .map_err(|_| ExtractError::Alloc { requested })?;

    let mut remaining = resolved.bases;
    let mut pos = resolved.offset;

    while remaining > 0 {
        let line_end = memchr(b'\n', &body[pos..]).map_or(body.len(), |i| pos + i);
        let take = (line_end - pos).min(remaining);
        let chunk = &body[pos..pos + take];

        out.extend_from_slice(chunk);
        remaining -= take;

        if remaining > 0 && chunk.last().map_or(false, u8::is_ascii_digit) {
            out.push(b' ');
        }
        pos = line_end + 1;
    }

    Ok(out)
}

fn to_usize(coordinate: u64) -> usize {
    usize::try_from(coordinate).unwrap_or(usize::MAX)
}
