//! File-backed sink: one decimal value per line.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use primegen_core::Result;

use crate::PrimeSink;

/// Append-only text file of primes, one decimal value per line.
///
/// No header, no trailing metadata. The writer is buffered and flushed at
/// the end of every batch, so a batch that returned `Ok` is visible to
/// readers of the file even if the process dies afterwards.
pub struct FileSink {
    writer: BufWriter<File>,
    path: PathBuf,
    records: u64,
}

impl FileSink {
    /// Create (or truncate) the file at `path` and open it for writing.
    ///
    /// Used for a fresh run: the first batch starts an empty file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        tracing::debug!(path = %path.display(), "output file created");
        Ok(FileSink {
            writer: BufWriter::new(file),
            path,
            records: 0,
        })
    }

    /// Open an existing file at `path` in append mode.
    ///
    /// The record count starts at zero; it counts appends through this
    /// sink, not lines already present in the file.
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().append(true).create(true).open(&path)?;
        tracing::debug!(path = %path.display(), "output file opened for append");
        Ok(FileSink {
            writer: BufWriter::new(file),
            path,
            records: 0,
        })
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of values appended through this sink.
    pub fn records(&self) -> u64 {
        self.records
    }
}

impl PrimeSink for FileSink {
    fn append(&mut self, primes: &[u64]) -> Result<()> {
        for &p in primes {
            writeln!(self.writer, "{}", p)?;
            self.records += 1;
        }
        self.writer.flush()?;
        tracing::trace!(count = primes.len(), total = self.records, "batch appended");
        Ok(())
    }
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink")
            .field("path", &self.path)
            .field("records", &self.records)
            .finish()
    }
}
