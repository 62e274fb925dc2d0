//! Filesystem abstraction module.
//!
//! This module provides the `FileSystem` trait for abstracting filesystem operations,
//! so the conversion pipeline can run against the real disk or an in-memory mock.

mod native;

pub use native::RealFileSystem;

use std::io::Result;
use std::path::{Path, PathBuf};

/// Abstraction over filesystem operations
/// Send + Sync so a filesystem can be shared across threads.
pub trait FileSystem: Send + Sync {
    /// Reads the file content (for parsing XML exports)
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Creates or overwrites a file
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;

    /// Creates a directory and all parent directories
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Checks if a path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// List all entries directly inside a directory (not recursive)
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

// Blanket implementation for references to FileSystem
impl<T: FileSystem> FileSystem for &T {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        (*self).read_to_string(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        (*self).write_file(path, content)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        (*self).create_dir_all(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (*self).is_dir(path)
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        (*self).list_files(dir)
    }
}
