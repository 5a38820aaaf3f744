//! Transfer outcomes and the errors that abort a transfer outright.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result of a single transfer attempt.
///
/// Only local filesystem failures are reported as [`TransferError`]; every
/// remote condition is one of these variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The body was streamed to disk.
    Completed { bytes_written: u64 },

    /// The origin answered 416 for the requested offset: the local file
    /// already holds the whole resource.
    AlreadyComplete,

    /// The origin answered 404.
    NotFound,

    /// Connection failure, timeout, server error, or a body read that broke
    /// off mid-stream.
    NetworkError { reason: String },

    /// Any other 4xx rejection.
    ClientError { status: u16 },
}

impl TransferOutcome {
    /// Whether the destination now holds the complete resource.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            TransferOutcome::Completed { .. } | TransferOutcome::AlreadyComplete
        )
    }
}

impl fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferOutcome::Completed { bytes_written } => {
                write!(f, "completed ({} bytes written)", bytes_written)
            }
            TransferOutcome::AlreadyComplete => write!(f, "already complete"),
            TransferOutcome::NotFound => write!(f, "file not found"),
            TransferOutcome::NetworkError { reason } => write!(f, "network failure: {}", reason),
            TransferOutcome::ClientError { status } => {
                write!(f, "request rejected with status {}", status)
            }
        }
    }
}

/// Local failures while preparing or writing the destination file.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("failed to create HTTP client: {0}")]
    ClientInit(String),

    #[error("failed to inspect {}: {source}", .path.display())]
    Inspect { path: PathBuf, source: io::Error },

    #[error("failed to open {} for writing: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}
