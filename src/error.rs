//! Domain-specific error types for policy generation.
//!
//! Library layers return these typed errors; command handlers at the CLI
//! boundary convert them to [`anyhow::Error`] via `?`.
//!
//! # Error hierarchy
//!
//! ```text
//! SourceError: reading or parsing the policy source (fatal)
//! TranscodeError: turning a policy map into one output format
//! OutputError: one (browser, format) output: mkdir, transcode, write
//! ```
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the policy source document.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The file could not be read.
    #[error("IO error reading policy source {}: {source}", path.display())]
    Io {
        /// Path of the policy source.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not a valid policy document.
    #[error("Invalid policy source {}: {source}", path.display())]
    Parse {
        /// Path of the policy source.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
}

/// Errors raised while transcoding a policy map into an output format.
#[derive(Error, Debug)]
pub enum TranscodeError {
    /// A policy name collides with a fixed field of the profile payload.
    #[error("policy '{0}' collides with a reserved profile payload key")]
    ReservedKey(String),

    /// A property-list key or string holds a control character XML 1.0
    /// cannot carry.
    #[error("strings can't contain control characters: {0:?}")]
    ControlCharacter(String),

    /// The JSON serializer produced bytes that are not UTF-8.
    #[error("serialized JSON is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The property-list XML writer failed.
    #[error("failed to write property list: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The JSON serializer failed.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while producing one output file.
#[derive(Error, Debug)]
pub enum OutputError {
    /// The parent directory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The content could not be produced.
    #[error("failed to generate {}: {source}", path.display())]
    Transcode {
        /// Output file the content was destined for.
        path: PathBuf,
        /// Underlying transcoding error.
        source: TranscodeError,
    },

    /// The file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Output file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
