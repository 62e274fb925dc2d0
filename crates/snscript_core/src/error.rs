use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Unified error type for snscript operations
#[derive(Debug, Error)]
pub enum SnScriptError {
    // IO errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    #[error("Failed to list directory '{path}': {source}")]
    ListDir {
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    // Scanner errors
    #[error("Update directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    // XML errors
    #[error("XML parse error at byte {position}: {message}")]
    Parse {
        /// Byte offset in the document
        position: u64,
        /// Parser message
        message: String,
    },

    // Emitter errors
    #[error("Refusing to write record with unsafe name '{0}'")]
    UnsafeRecordName(String),
}

impl SnScriptError {
    pub(crate) fn parse(position: u64, message: impl Into<String>) -> Self {
        SnScriptError::Parse {
            position,
            message: message.into(),
        }
    }
}

/// Result type alias for snscript operations
pub type Result<T> = std::result::Result<T, SnScriptError>;

/// A serializable representation of SnScriptError for reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerializableError {
    /// Error kind/variant name
    pub kind: String,
    /// Human-readable error message
    pub message: String,
    /// Associated path (if applicable)
    pub path: Option<PathBuf>,
}

impl From<&SnScriptError> for SerializableError {
    fn from(err: &SnScriptError) -> Self {
        let kind = match err {
            SnScriptError::FileRead { .. } => "FileRead",
            SnScriptError::FileWrite { .. } => "FileWrite",
            SnScriptError::CreateDir { .. } => "CreateDir",
            SnScriptError::ListDir { .. } => "ListDir",
            SnScriptError::MissingDirectory(_) => "MissingDirectory",
            SnScriptError::Parse { .. } => "Parse",
            SnScriptError::UnsafeRecordName(_) => "UnsafeRecordName",
        }
        .to_string();

        let path = match err {
            SnScriptError::FileRead { path, .. } => Some(path.clone()),
            SnScriptError::FileWrite { path, .. } => Some(path.clone()),
            SnScriptError::CreateDir { path, .. } => Some(path.clone()),
            SnScriptError::ListDir { path, .. } => Some(path.clone()),
            SnScriptError::MissingDirectory(path) => Some(path.clone()),
            _ => None,
        };

        Self {
            kind,
            message: err.to_string(),
            path,
        }
    }
}

impl From<SnScriptError> for SerializableError {
    fn from(err: SnScriptError) -> Self {
        SerializableError::from(&err)
    }
}

impl SnScriptError {
    /// Convert to a serializable representation for reports
    pub fn to_serializable(&self) -> SerializableError {
        SerializableError::from(self)
    }
}
