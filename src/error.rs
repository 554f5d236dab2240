//! Error types for mesa-rs
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! [`MesaError`]. All variants are fatal to the operation that raised them: there is
//! no retry and no partial result.

use std::io;
use std::path::{Path, PathBuf};

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Result type alias for mesa-rs operations
pub type Result<T> = std::result::Result<T, MesaError>;

/// Errors raised while reading MESA output, building views or computing orbits
#[derive(Error, Debug)]
pub enum MesaError {
    /// A history, profile or index file does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Any other I/O failure while reading or writing a file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Column count or numeric mismatch in a data file
    #[error("Parse error in {} at line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A column required by an operation is absent from the table
    #[error("Column '{column}' not found in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// The profile number is not listed in `profiles.index`
    #[error("Snapshot not found: profile number {profile_number} is not in the profile index")]
    SnapshotNotFound { profile_number: i64 },

    /// A 1-based profile ordinal outside `1..=available`
    #[error("Profile ordinal {ordinal} out of range (1..={available})")]
    ProfileOrdinalOutOfRange { ordinal: usize, available: usize },

    /// Non-physical input (non-positive or non-finite mass, ratio or period)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Failure inside the plotting backend
    #[error("Plot error: {message}")]
    Plot { message: String },

    /// Failure while exporting data series
    #[error("Export error: {message}")]
    Export { message: String },
}

impl MesaError {
    /// Map an `io::Error` raised on `path`, turning `NotFound` into [`MesaError::FileNotFound`]
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            MesaError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MesaError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Create a parse error
    pub fn parse(path: &Path, line: usize, message: impl Into<String>) -> Self {
        MesaError::Parse {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        MesaError::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an export error
    pub fn export(message: impl Into<String>) -> Self {
        MesaError::Export {
            message: message.into(),
        }
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for MesaError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        MesaError::Plot {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_file_not_found() {
        let err = MesaError::from_io(
            Path::new("LOGS/history.data"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, MesaError::FileNotFound { .. }));
        assert!(err.to_string().contains("history.data"));
    }

    #[test]
    fn test_other_io_errors_keep_source() {
        let err = MesaError::from_io(
            Path::new("LOGS/profile1.data"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, MesaError::Io { .. }));
    }

    #[test]
    fn test_snapshot_not_found_message() {
        let err = MesaError::SnapshotNotFound { profile_number: 42 };
        assert!(err.to_string().contains("42"));
    }
}
