//! Locates Script Include exports in a CI/CD source tree.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use glob::Pattern;

use crate::error::{Result, SnScriptError};
use crate::fs::FileSystem;

/// Subdirectory of the source root holding update XML files
pub const UPDATE_DIR: &str = "update";

/// File name pattern of Script Include exports
pub const SCRIPT_INCLUDE_FILE_PATTERN: &str = "sys_script_include_*.xml";

static SCRIPT_INCLUDE_FILES: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::new(SCRIPT_INCLUDE_FILE_PATTERN).expect("valid glob pattern")
});

/// Whether a file name looks like a Script Include export
pub fn is_script_include_file(file_name: &str) -> bool {
    SCRIPT_INCLUDE_FILES.matches(file_name)
}

/// List Script Include export files in `<source_dir>/update`, sorted by path.
///
/// Fails with [`SnScriptError::MissingDirectory`] when the update directory
/// does not exist. Subdirectories are ignored even if their names match.
pub fn scan_update_dir<FS: FileSystem>(fs: &FS, source_dir: &Path) -> Result<Vec<PathBuf>> {
    let update_dir = source_dir.join(UPDATE_DIR);
    if !fs.is_dir(&update_dir) {
        return Err(SnScriptError::MissingDirectory(update_dir));
    }

    let entries = fs
        .list_files(&update_dir)
        .map_err(|source| SnScriptError::ListDir {
            path: update_dir.clone(),
            source,
        })?;

    let mut files: Vec<PathBuf> = entries
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_script_include_file)
        })
        .filter(|path| !fs.is_dir(path))
        .collect();
    files.sort();

    log::debug!(
        "Found {} Script Include export(s) in {}",
        files.len(),
        update_dir.display()
    );
    Ok(files)
}
