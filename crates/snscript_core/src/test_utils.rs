//! Test utilities for snscript_core
//!
//! This module provides shared testing infrastructure, including a mock filesystem
//! that can be used across all test modules.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::fs::FileSystem;

/// A mock filesystem for testing.
///
/// Uses `Arc<Mutex<..>>` for thread-safety and allows cloning
/// while sharing the same underlying file storage. Directories are
/// tracked explicitly and also implied by the parents of stored files.
#[derive(Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    dirs: Arc<Mutex<HashSet<PathBuf>>>,
    failing_writes: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MockFileSystem {
    /// Create a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the mock filesystem (builder pattern).
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
        self
    }

    /// Add an empty directory to the mock filesystem (builder pattern).
    pub fn with_dir(self, path: &str) -> Self {
        self.create_dir_all(Path::new(path)).unwrap();
        self
    }

    /// Make every write to `path` fail with `PermissionDenied`.
    pub fn with_failing_write(self, path: &str) -> Self {
        self.failing_writes
            .lock()
            .unwrap()
            .insert(PathBuf::from(path));
        self
    }

    /// Get the content of a file (for test assertions).
    pub fn get_content(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(&PathBuf::from(path))
            .cloned()
    }

    /// Number of files currently stored.
    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "File not found"))
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        if self.failing_writes.lock().unwrap().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Write denied",
            ));
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !self.is_dir(parent)
        {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "Parent directory not found",
            ));
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn is_dir(&self, path: &Path) -> bool {
        if self.dirs.lock().unwrap().contains(path) {
            return true;
        }
        self.files
            .lock()
            .unwrap()
            .keys()
            .any(|file| file.parent().is_some_and(|p| p.starts_with(path)))
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.is_dir(dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "Directory not found",
            ));
        }

        let mut entries = HashSet::new();
        let files = self.files.lock().unwrap();
        let dirs = self.dirs.lock().unwrap();
        for path in files.keys().chain(dirs.iter()) {
            // Direct children, including directories implied by deeper files
            if let Ok(rel) = path.strip_prefix(dir)
                && let Some(first) = rel.components().next()
            {
                entries.insert(dir.join(first));
            }
        }
        Ok(entries.into_iter().collect())
    }
}
