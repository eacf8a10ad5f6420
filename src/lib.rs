//! fasta-extract: regex-driven extraction from memory-mapped FASTA-style files
//!
//! # Overview
//!
//! fasta-extract pulls coordinate windows out of records whose header matches
//! a POSIX regular expression. Files are memory-mapped, so a window deep inside
//! a large record costs a line walk over the mapped bytes, not a read of the
//! whole file.
//!
//! ## Key Features
//!
//! - **Interbase coordinates**: `[start, end)` over the unwrapped sequence,
//!   with a sentinel end meaning "through the last base"
//! - **Any line wrapping**: lines may have any length, including ragged ones
//! - **Resumable scans**: a session walks every matching record in order,
//!   optionally keeping one mapping open across calls
//! - **Quality files**: numeric lines are joined with a space so values never
//!   fuse across line breaks
//!
//! ## Quick Start
//!
//! ```no_run
//! use fasta_extract::{ExtractRequest, Extractions, Window};
//!
//! # fn main() -> fasta_extract::Result<()> {
//! let request = ExtractRequest::new("^chr[0-9]").with_window(Window::new(1_000, 1_050));
//!
//! for extraction in Extractions::open("genome.fa", &request)? {
//!     let extraction = extraction?;
//!     println!(
//!         "{}\t{}",
//!         extraction.matched.header_str(),
//!         String::from_utf8_lossy(&extraction.sequence)
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`extract`](mod@extract): Header matching, coordinate resolution, sessions
//! - [`io`]: Memory-mapped input, header buffering, wrapped output
//! - [`operations`]: Sequence transforms (reverse complement)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod extract;
pub mod io;
pub mod operations;
pub mod types;

// Re-export commonly used types
pub use error::{ErrorCode, ExtractError, Result};
pub use extract::{
    extract, extract_first, ExtractConfig, ExtractRequest, ExtractionSession, Extractions,
    MatchOptions, Outcome,
};
pub use io::SequenceWriter;
pub use types::{Extraction, MatchResult, Window, WindowEnd};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
