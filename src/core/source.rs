//! Source Files
//!
//! A source file is read once and held immutably for the duration of one
//! validation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// An extension source file: path plus contents
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    contents: String,
}

impl SourceFile {
    /// Read a source file from disk.
    ///
    /// Fails with the underlying IO error when the path is missing or
    /// unreadable; callers surface that before any toolchain work happens.
    pub fn read(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path)?;
        Ok(Self { path, contents })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// 1-based line number of a byte offset into the contents
    pub fn line_of_offset(&self, offset: usize) -> u32 {
        let clamped = offset.min(self.contents.len());
        self.contents[..clamped].bytes().filter(|&b| b == b'\n').count() as u32 + 1
    }
}
