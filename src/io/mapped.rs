//! Memory-mapped input files
//!
//! The extraction engine needs random access to the whole file: it scans
//! forward for record markers, then jumps back into a record body to copy a
//! window. [`MappedSource`] maps the file read-only and exposes it as one
//! immutable byte slice.
//!
//! Release is `Drop`: the mapping and its file handle go away together. A
//! source held by an [`ExtractionSession`] stays mapped until the session
//! releases it or is dropped.
//!
//! [`ExtractionSession`]: crate::extract::ExtractionSession

use crate::error::{ExtractError, Result};
use log::debug;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A read-only view of a whole file
#[derive(Debug)]
pub struct MappedSource {
    path: PathBuf,
    region: Region,
    // Held so the descriptor lives exactly as long as the mapping
    _file: File,
}

#[derive(Debug)]
enum Region {
    Mapped(Mmap),
    // Zero-length files cannot be mapped
    Empty,
}

impl MappedSource {
    /// Open and map `path`
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Open`] if the file cannot be opened
    /// - [`ExtractError::Stat`] if its size cannot be read
    /// - [`ExtractError::Mmap`] if mapping fails
    ///
    /// The file handle is closed before any error is returned.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fasta_extract::io::MappedSource;
    ///
    /// let source = MappedSource::acquire("genome.fa")?;
    /// println!("{} bytes mapped", source.len());
    /// # Ok::<(), fasta_extract::ExtractError>(())
    /// ```
    pub fn acquire<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = File::open(&path).map_err(|source| ExtractError::Open {
            path: path.clone(),
            source,
        })?;

        let file_size = file
            .metadata()
            .map_err(|source| ExtractError::Stat {
                path: path.clone(),
                source,
            })?
            .len();

        let region = if file_size == 0 {
            Region::Empty
        } else {
            // SAFETY: the mapping is read-only and never outlives `_file`.
            // Concurrent truncation of the file by another process is outside
            // what this crate can guard against.
            let mmap = unsafe { Mmap::map(&file) }.map_err(|source| ExtractError::Mmap {
                path: path.clone(),
                source,
            })?;
            advise_sequential(&mmap);
            Region::Mapped(mmap)
        };

        debug!("Mapped {:?} ({} bytes)", path, file_size);

        Ok(Self {
            path,
            region,
            _file: file,
        })
    }

    /// Mapped bytes
    pub fn as_bytes(&self) -> &[u8] {
        match &self.region {
            Region::Mapped(mmap) => &mmap[..],
            Region::Empty => &[],
        }
    }

    /// Size of the file in bytes
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Check if the file is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Path the source was acquired from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for MappedSource {
    fn drop(&mut self) {
        debug!("Released mapping of {:?}", self.path);
    }
}

/// Hint that the mapping will be read front to back
#[cfg(unix)]
fn advise_sequential(mmap: &Mmap) {
    if let Err(e) = mmap.advise(memmap2::Advice::Sequential) {
        debug!("madvise(SEQUENTIAL) failed: {}", e);
    }
}

#[cfg(not(unix))]
fn advise_sequential(_mmap: &Mmap) {}
