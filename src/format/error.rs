//! Error types for annotation format operations.

use thiserror::Error;

/// Errors that can occur during annotation format operations.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error while reading or writing archive bytes
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream is not a readable zip archive, or an entry could not be written
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Frame image could not be encoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A file the format requires is not in the archive
    #[error("Missing required file: {name}")]
    MissingFile {
        /// Name of the missing file
        name: String,
    },

    /// A line could not be parsed
    #[error("Parse error in {file} at line {line}: {message}")]
    Parse {
        /// File containing the bad line
        file: String,
        /// 1-based line number
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// A per-frame file does not have one line per ground-truth frame
    #[error("{file} has {found} lines, expected {expected}")]
    LineCountMismatch {
        /// Offending file
        file: String,
        /// Number of ground-truth lines
        expected: usize,
        /// Number of lines in the file
        found: usize,
    },

    /// Invalid format structure or content
    #[error("Invalid format: {message}")]
    InvalidFormat {
        /// Description of the format error
        message: String,
    },

    /// Operation not supported by this format
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl FormatError {
    /// Create a missing file error.
    pub fn missing_file(name: impl Into<String>) -> Self {
        Self::MissingFile { name: name.into() }
    }

    /// Create a parse error for a 1-based line of a file.
    pub fn parse(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid format error with a message.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }
}
