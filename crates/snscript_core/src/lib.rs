#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Run configuration
pub mod config;

/// Conversion pipeline (scan, extract, emit)
pub mod convert;

/// Output file rendering and writing
pub mod emitter;

/// Error (common error types)
pub mod error;

/// Filesystem abstraction
pub mod fs;

/// Script Include record extraction
pub mod record;

/// Update directory scanning
pub mod scanner;

/// Generic XML tree parsing
pub mod xml;

#[cfg(test)]
pub mod test_utils;
