//! Error types for tasl.
//!
//! Every engine crate returns [`Result`] with this shared [`Error`] so that
//! the CLI can report a single error shape regardless of which layer failed.

use std::path::{Path, PathBuf};

/// Result type alias for tasl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while managing topic files.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A topic title sanitized to an empty basename.
    #[error("Invalid topic name: {input:?} does not produce a usable file name")]
    InvalidTopicName {
        /// The title as supplied by the caller
        input: String,
    },

    /// Front-matter delimiters are missing, unterminated, or the block is not a mapping.
    #[error("Malformed header in {}: {reason}", path.display())]
    MalformedHeader {
        /// File whose header could not be used
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Target file exists and overwriting was not requested.
    #[error("File already exists: {} (use --overwrite to replace it)", path.display())]
    WriteConflict {
        /// The file that would have been clobbered
        path: PathBuf,
    },

    /// A guide document could not be opened or decoded.
    #[error("Cannot read source {}: {source}", path.display())]
    UnreadableSource {
        /// The guide document
        path: PathBuf,
        /// Underlying I/O or decoding failure
        #[source]
        source: std::io::Error,
    },

    /// One or both halves of a topic pair are absent.
    #[error("Missing topic file(s): {}", join_paths(missing))]
    MissingPairHalf {
        /// Every expected file that was not found
        missing: Vec<PathBuf>,
    },

    /// Some items of a batch failed; each failure has already been reported.
    #[error("{failed} of {total} item(s) failed")]
    Incomplete {
        /// Items that failed
        failed: usize,
        /// Items attempted
        total: usize,
    },

    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a specific path.
    #[error("I/O error on {}: {source}", path.display())]
    IoWithPath {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Structured data could not be parsed or serialized.
    #[error("Parse error: {message}")]
    Parse {
        /// What failed to parse
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Creates an I/O error carrying the path that was being accessed.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a malformed-header error for `path`.
    pub fn malformed_header<S: Into<String>>(path: impl AsRef<Path>, reason: S) -> Self {
        Error::MalformedHeader {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid-topic-name error.
    pub fn invalid_topic_name<S: Into<String>>(input: S) -> Self {
        Error::InvalidTopicName {
            input: input.into(),
        }
    }

    /// Creates a write-conflict error.
    pub fn write_conflict(path: impl AsRef<Path>) -> Self {
        Error::WriteConflict {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates an unreadable-source error.
    pub fn unreadable_source(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::UnreadableSource {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns whether the error concerns a single file within a batch.
    ///
    /// Commands that take several files report these and move on to the
    /// next file; anything else aborts the command.
    pub fn is_item_level(&self) -> bool {
        matches!(
            self,
            Error::MalformedHeader { .. }
                | Error::WriteConflict { .. }
                | Error::MissingPairHalf { .. }
                | Error::UnreadableSource { .. }
                | Error::IoWithPath { .. }
        )
    }
}
