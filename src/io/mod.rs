//! I/O module: mapped input, header buffering, and formatted output
//!
//! - [`MappedSource`]: whole-file read-only memory mapping
//! - [`HeaderBuffer`]: reusable, doubling buffer for header text
//! - [`SequenceWriter`]: fixed-width output of extracted records

pub mod header_buffer;
pub mod mapped;
pub mod writer;

pub use header_buffer::{HeaderBuffer, INITIAL_HEADER_CAPACITY};
pub use mapped::MappedSource;
pub use writer::{SequenceWriter, DEFAULT_LINE_WIDTH};
