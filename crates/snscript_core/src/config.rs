//! Run configuration.
//!
//! [`ConvertConfig`] is built once from the command line and passed by
//! reference through the pipeline. Every derived location (update directory,
//! output directory, application name) is computed from it.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::scanner::UPDATE_DIR;

/// Subdirectory of the target application that receives emitted files
pub const OUTPUT_SUBDIR: &str = "script_includes";

/// Inputs of one conversion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertConfig {
    /// CI/CD export root; its `update` subdirectory is scanned
    pub source_dir: PathBuf,

    /// Application directory; files land in its `script_includes` subdirectory
    pub target_app_dir: PathBuf,

    /// Report what would be written without touching the filesystem
    pub dry_run: bool,
}

impl ConvertConfig {
    /// Create a config for a real (non dry-run) conversion
    pub fn new(source_dir: impl Into<PathBuf>, target_app_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            target_app_dir: target_app_dir.into(),
            dry_run: false,
        }
    }

    /// Builder-style setter for dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// `<source_dir>/update`
    pub fn update_dir(&self) -> PathBuf {
        self.source_dir.join(UPDATE_DIR)
    }

    /// `<target_app_dir>/script_includes`
    pub fn output_dir(&self) -> PathBuf {
        self.target_app_dir.join(OUTPUT_SUBDIR)
    }

    /// Basename of the target application directory, written into headers
    pub fn app_name(&self) -> String {
        basename(&self.target_app_dir)
    }
}

/// Final path component as a string, empty when there is none
pub(crate) fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
