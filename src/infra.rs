//! Infrastructure traits for abstracting filesystem access.
//!
//! The reporter and config loader only ever stat, read, or write single files.
//! Routing those calls through [`FileSystem`] lets tests inject failures such
//! as a permission error on stat without depending on the host's privileges.

use std::io;
use std::path::Path;

/// Trait for abstracting filesystem operations.
pub trait FileSystem {
    /// Length in bytes of the file at `path` (follows symlinks).
    fn file_len(&self, path: &Path) -> io::Result<u64>;

    /// Whether `path` names an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a slice of bytes to a file.
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()>;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn file_len(&self, path: &Path) -> io::Result<u64> {
        std::fs::metadata(path).map(|m| m.len())
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}
