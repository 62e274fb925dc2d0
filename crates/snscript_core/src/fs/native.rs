//! Native filesystem implementation.

use std::fs;
use std::io::Result;
use std::path::{Path, PathBuf};

use super::FileSystem;

#[derive(Debug, Clone, Copy, Default)]
/// This is a simple filesystem implementation that simply maps to std::fs methods
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            files.push(entry.path());
        }
        Ok(files)
    }
}
