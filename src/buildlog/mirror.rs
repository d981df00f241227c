//! Verbatim copy of the build log

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes every raw input line to a file, truncating it on open
///
/// Buffered output is flushed by [`LogMirror::close`], or on drop when the
/// scan bails out early.
pub struct LogMirror {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl LogMirror {
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Error opening {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line, without its original terminator
    pub fn write_line(&mut self, raw: &[u8]) -> Result<()> {
        self.writer
            .write_all(raw)
            .and_then(|_| self.writer.write_all(b"\n"))
            .with_context(|| format!("Failed to write to {}", self.path.display()))
    }

    /// Flush and close the file
    pub fn close(mut self) -> Result<()> {
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))
    }
}
