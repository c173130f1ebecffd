//! Memory-mapped source files.
//!
//! A scan wants the whole file as one contiguous region with O(1) access to
//! any offset, without incremental reads into a growable buffer. Mapping the
//! file gives exactly that; the mapping and the descriptor behind it are tied
//! to the [`SourceBuffer`] value and released together when it drops.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use thiserror::Error;

/// Failure to turn a path into an addressable byte region.
///
/// Opening and mapping are separate steps with separate failure kinds, so the
/// caller can tell a bad path apart from a file that opened but could not be
/// brought into memory. Neither is retryable.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The path is missing, unreadable, or not a regular file.
    #[error("cannot open file '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },
    /// The file opened, but its size could not be determined or its content
    /// could not be mapped.
    #[error("cannot load '{path}' into memory: {source}")]
    Map { path: PathBuf, source: io::Error },
}

/// The entire byte content of one source file, mapped read-only.
///
/// The byte sequence's length equals the file's size at the moment the map
/// was taken, and the sequence never changes for the buffer's lifetime.
#[derive(Debug)]
pub struct SourceBuffer {
    /// Keeps the descriptor open for as long as the mapping is alive.
    _file: File,
    /// `None` for empty files; a zero-length mapping is never requested.
    map: Option<Mmap>,
}

impl SourceBuffer {
    /// Open `path` and map its whole content for reading.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let open_failure = |source| SourceError::Open {
            path: path.to_owned(),
            source,
        };
        let map_failure = |source| SourceError::Map {
            path: path.to_owned(),
            source,
        };

        let file = File::open(path).map_err(open_failure)?;
        let meta = file.metadata().map_err(map_failure)?;
        if !meta.is_file() {
            return Err(open_failure(io::Error::other("not a regular file")));
        }

        let map = if meta.len() == 0 {
            None
        } else {
            // SAFETY: the mapping is private and read-only, and nothing in
            // the toolchain writes to a source file while it is being
            // scanned.
            Some(unsafe { Mmap::map(&file) }.map_err(map_failure)?)
        };
        Ok(Self { _file: file, map })
    }

    /// The mapped content as one contiguous slice.
    pub fn as_bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or_default()
    }

    /// Size of the backing file at the moment it was mapped.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
