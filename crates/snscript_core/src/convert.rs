//! Convert module - normalize every Script Include export in a source tree

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{ConvertConfig, basename};
use crate::emitter;
use crate::error::{Result, SerializableError, SnScriptError};
use crate::fs::FileSystem;
use crate::record::{self, Extraction, RecordShape};
use crate::scanner;

/// What happened to one scanned file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// The record was written to `output`
    Written {
        /// Record name
        name: String,
        /// Envelope the record was found in
        shape: RecordShape,
        /// Path of the emitted file
        output: PathBuf,
    },
    /// Dry run: the record would have been written to `output`
    WouldWrite {
        /// Record name
        name: String,
        /// Envelope the record was found in
        shape: RecordShape,
        /// Path the file would be emitted to
        output: PathBuf,
    },
    /// No Script Include envelope in the document
    NoRecord,
    /// The record lacks `name` or `script`
    Incomplete {
        /// Envelope the record was found in
        shape: RecordShape,
    },
    /// Reading, parsing or writing failed
    Failed {
        /// What went wrong
        error: SerializableError,
    },
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Written { shape, output, .. } => {
                write!(f, "wrote {} ({})", output.display(), shape)
            }
            FileStatus::WouldWrite { shape, output, .. } => {
                write!(f, "would write {} ({})", output.display(), shape)
            }
            FileStatus::NoRecord => write!(f, "skipped (no Script Include record)"),
            FileStatus::Incomplete { shape } => {
                write!(f, "skipped ({} missing name or script)", shape)
            }
            FileStatus::Failed { error } => write!(f, "failed: {}", error.message),
        }
    }
}

/// Outcome for a single source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    /// Path of the scanned XML file
    pub source: PathBuf,
    /// Result of processing it
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Summary of a conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertReport {
    /// Directory records were (or would be) written to
    pub output_dir: PathBuf,
    /// Whether this was a dry run
    pub dry_run: bool,
    /// One entry per scanned file, in scan order
    pub files: Vec<FileOutcome>,
}

impl ConvertReport {
    /// Number of files found by the scanner
    pub fn scanned(&self) -> usize {
        self.files.len()
    }

    /// Number of records written (or that would be written in a dry run)
    pub fn written(&self) -> usize {
        self.count(|s| {
            matches!(
                s,
                FileStatus::Written { .. } | FileStatus::WouldWrite { .. }
            )
        })
    }

    /// Number of files without a usable record
    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::NoRecord | FileStatus::Incomplete { .. }))
    }

    /// Number of files that failed to convert
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileStatus) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.status)).count()
    }
}

impl fmt::Display for ConvertReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s) scanned, {} written, {} skipped, {} failed",
            self.scanned(),
            self.written(),
            self.skipped(),
            self.failed()
        )
    }
}

/// Conversion pipeline: scan, extract, emit
pub struct Converter<FS: FileSystem> {
    fs: FS,
}

impl<FS: FileSystem> Converter<FS> {
    /// Create a converter over the given filesystem
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }

    /// Run the whole conversion.
    ///
    /// Setup failures (missing update directory, output directory creation)
    /// abort before any file is written. Failures for a single file are
    /// recorded in the report and do not stop the remaining files.
    pub fn run(&self, config: &ConvertConfig) -> Result<ConvertReport> {
        let files = scanner::scan_update_dir(&self.fs, &config.source_dir)?;

        let output_dir = config.output_dir();
        if !config.dry_run {
            self.fs
                .create_dir_all(&output_dir)
                .map_err(|source| SnScriptError::CreateDir {
                    path: output_dir.clone(),
                    source,
                })?;
        }

        let app_name = config.app_name();
        let mut report = ConvertReport {
            output_dir: output_dir.clone(),
            dry_run: config.dry_run,
            files: Vec::with_capacity(files.len()),
        };

        for source in files {
            let status = match self.convert_file(&source, &output_dir, &app_name, config.dry_run)
            {
                Ok(status) => status,
                Err(e) => {
                    log::warn!("Failed to convert {}: {}", source.display(), e);
                    FileStatus::Failed {
                        error: e.to_serializable(),
                    }
                }
            };
            log::debug!("{}: {}", source.display(), status);
            report.files.push(FileOutcome { source, status });
        }

        log::info!("{}", report);
        Ok(report)
    }

    /// Read, extract and emit a single export file
    pub fn convert_file(
        &self,
        source: &Path,
        output_dir: &Path,
        app_name: &str,
        dry_run: bool,
    ) -> Result<FileStatus> {
        let xml = self
            .fs
            .read_to_string(source)
            .map_err(|e| SnScriptError::FileRead {
                path: source.to_path_buf(),
                source: e,
            })?;

        let (shape, record) = match record::extract(&xml)? {
            Extraction::NotFound => return Ok(FileStatus::NoRecord),
            Extraction::Incomplete(shape) => return Ok(FileStatus::Incomplete { shape }),
            Extraction::Found(shape, record) => (shape, record),
        };

        let source_name = basename(source);
        if dry_run {
            let output = emitter::output_path(output_dir, &record.name)?;
            return Ok(FileStatus::WouldWrite {
                name: record.name,
                shape,
                output,
            });
        }

        let output = emitter::emit(&self.fs, output_dir, &record, app_name, &source_name)?;
        Ok(FileStatus::Written {
            name: record.name,
            shape,
            output,
        })
    }
}
