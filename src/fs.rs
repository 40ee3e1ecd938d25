//! Filesystem abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that the catalog, the state store
//! and the apply engine can be unit-tested without touching the real
//! filesystem.  Production code uses [`SystemFileSystemOps`]; tests use
//! `MemoryFileSystem`.

use std::io;
use std::path::Path;

/// A single entry returned by [`FileSystemOps::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirEntry {
    /// File name of the entry (final path component).
    pub name: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

/// Abstraction over the filesystem operations used by the engine.
///
/// Every implementation supports both reading and writing, so callers never
/// need to check whether a handle is writable.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns the immediate children of `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be opened or read as a directory.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Read the whole file at `path` as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the file at `path` with `contents`, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!("skipping non-UTF-8 entry {}", entry.path().display());
                continue;
            };
            entries.push(DirEntry {
                name,
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    }
}

#[cfg(test)]
pub use memory::MemoryFileSystem;
