//! Error types for fasta-extract
//!
//! Every failure the engine can report is an [`ExtractError`]. Each error maps
//! to a stable [`ErrorCode`], which is what an [`ExtractionSession`] records in
//! its `last_error` field so callers can inspect the outcome of the previous
//! call without holding on to the error value.
//!
//! [`ExtractionSession`]: crate::extract::ExtractionSession

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fasta-extract operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Error types that can occur while extracting sequences
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input file could not be opened
    #[error("File open failed on {}: {source}", .path.display())]
    Open {
        /// File that failed to open
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The input file size could not be determined
    #[error("Stat error on file {}: {source}", .path.display())]
    Stat {
        /// File that failed to stat
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The input file could not be memory-mapped
    #[error("Mmap failed on file {}: {source}", .path.display())]
    Mmap {
        /// File that failed to map
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Reuse of a retained mapping was requested but none is held
    #[error("No retained mapping to reuse; acquire one first")]
    NoRetainedMapping,

    /// The header pattern failed to compile
    #[error("Error compiling regular expression {pattern:?}: {source}")]
    RegexCompile {
        /// Pattern as supplied by the caller
        pattern: String,
        /// Compiler error
        source: regex::Error,
    },

    /// A buffer could not be grown
    #[error("Trouble in allocation: could not reserve {requested} bytes")]
    Alloc {
        /// Number of elements that could not be reserved
        requested: usize,
    },

    /// A header line has no terminator before end of file
    #[error("Cannot find terminator of header at byte {offset}. Corrupt file?")]
    NoEol {
        /// Byte offset of the header marker
        offset: usize,
    },

    /// Scanning reached end of file without a further matching header
    #[error("No further header matches the pattern")]
    NoMatch,

    /// The call configuration combines options that cannot work together
    #[error("Invalid extraction configuration: {0}")]
    InvalidConfig(String),

    /// I/O error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// The error code recorded for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            ExtractError::Open { .. } => ErrorCode::Open,
            ExtractError::Stat { .. } => ErrorCode::Stat,
            ExtractError::Mmap { .. } | ExtractError::NoRetainedMapping => ErrorCode::Mmap,
            ExtractError::RegexCompile { .. } => ErrorCode::RegexpComp,
            ExtractError::Alloc { .. } => ErrorCode::Malloc,
            ExtractError::NoEol { .. } => ErrorCode::NoEol,
            ExtractError::NoMatch => ErrorCode::NoMatch,
            ExtractError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            ExtractError::Io(_) => ErrorCode::Io,
        }
    }

    /// `true` for the normal exhaustion signal, as opposed to a failure
    pub fn is_no_match(&self) -> bool {
        matches!(self, ExtractError::NoMatch)
    }
}

/// Stable, copyable classification of an [`ExtractError`]
///
/// The raw values are fixed and may be relied upon by callers that persist or
/// forward codes across an FFI or process boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    /// No further matching header
    NoMatch = 1,
    /// Open failure
    Open = 2,
    /// Size query failure
    Stat = 3,
    /// Mapping failure (including a missing retained mapping)
    Mmap = 4,
    /// Pattern compilation failure
    RegexpComp = 5,
    /// Allocation failure
    Malloc = 6,
    /// Header without a line terminator
    NoEol = 7,
    /// Contradictory call configuration
    InvalidConfig = 8,
    /// Output I/O failure
    Io = 9,
}

impl ErrorCode {
    /// Raw numeric value of the code
    pub fn as_raw(self) -> u8 {
        self as u8
    }

    /// `true` for every code except [`ErrorCode::NoMatch`]
    pub fn is_failure(self) -> bool {
        self != ErrorCode::NoMatch
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::NoMatch => "NO_MATCH",
            ErrorCode::Open => "OPEN_ERR",
            ErrorCode::Stat => "STAT_ERR",
            ErrorCode::Mmap => "MMAP_ERR",
            ErrorCode::RegexpComp => "REGEXP_COMP_ERR",
            ErrorCode::Malloc => "MALLOC_ERR",
            ErrorCode::NoEol => "NO_EOL",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::Io => "IO_ERR",
        };
        f.write_str(name)
    }
}
