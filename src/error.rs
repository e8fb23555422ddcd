//! Error types for dossier.
//!
//! Most section-level failures (unresolvable key, missing or corrupt
//! source file, contents generation failure) are absorbed by the merger
//! and reported through [`crate::merge::MergeOutcome`]; the variants here
//! cover the failures that must reach the caller, plus the reader/writer
//! primitives' own errors.

use std::io;
use std::path::PathBuf;

/// Result type alias for dossier operations.
pub type Result<T> = std::result::Result<T, DossierError>;

/// Main error type for dossier operations.
#[derive(Debug, thiserror::Error)]
pub enum DossierError {
    /// A source file was not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// A source file exists but cannot be accessed.
    #[error("Cannot access file: {path}\n  Reason: {source}")]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A source file could not be parsed as a PDF.
    #[error("Failed to load PDF: {path}\n  Reason: {reason}")]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// A source file has invalid or truncated PDF structure.
    #[error("Corrupted or invalid PDF: {path}\n  Details: {details}")]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// No section in the ordered list produced any pages.
    #[error(
        "No sections could be merged\n  \
         Every key in the ordered list was unresolvable or unreadable"
    )]
    NoSectionsMerged,

    /// The section catalog file could not be read or parsed.
    #[error("Invalid section catalog: {path}\n  Reason: {reason}")]
    InvalidCatalog {
        /// Path to the catalog file.
        path: PathBuf,
        /// Parse or I/O failure detail.
        reason: String,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {path}\n  \
         Use --force to overwrite or choose a different output path"
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create the output file.
    #[error("Failed to create output file: {path}\n  Reason: {source}")]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write the output file.
    #[error("Failed to write to output file: {path}\n  Reason: {source}")]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The table-of-contents page could not be generated.
    ///
    /// Absorbed by the merger (the dossier is produced without a
    /// contents page); surfaced only by the generator itself.
    #[error("Failed to generate contents page: {reason}")]
    ContentsFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for DossierError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for DossierError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl DossierError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a ContentsFailed error.
    pub fn contents_failed(reason: impl Into<String>) -> Self {
        Self::ContentsFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable at the section level.
    ///
    /// Recoverable errors cost the affected section its pages but do not
    /// abort the merge.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::FileNotAccessible { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::CorruptedPdf { .. }
                | Self::ContentsFailed { .. }
        )
    }

    /// Check if this error should stop all processing immediately.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NoSectionsMerged
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
                | Self::Cancelled
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::NoSectionsMerged => 1,
            Self::InvalidCatalog { .. } => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::ContentsFailed { .. } => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
