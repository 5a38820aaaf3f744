//! HTTP transfer engine with resume support.
//!
//! This module provides the single-file download path:
//! - Resumption via `Range: bytes=<n>-` when a partial file exists
//! - A 416 answer to a range request treated as "already complete"
//! - Streaming copy in fixed-size chunks
//!
//! The origin only serves clients presenting the QuickTime player signature,
//! so every request carries [`USER_AGENT`].

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::RANGE;

use super::outcome::{TransferError, TransferOutcome};
use super::traits::{FileTransfer, ProgressCallback};

/// Client signature the origin requires.
pub const USER_AGENT: &str = "QuickTime/7.6.2";

/// Copy buffer size (1 MiB).
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default overall request timeout in seconds, body included.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600; // 1 hour

/// An opened response from the origin.
pub struct RemoteBody {
    /// HTTP status code.
    pub status: u16,
    /// Length of this response's body, if the origin declared it.
    pub content_length: Option<u64>,
    /// Body stream.
    pub reader: Box<dyn Read + Send>,
}

/// Opens a remote resource, optionally from a byte offset.
///
/// This abstraction keeps the engine's status handling testable without a
/// network. Implementations return `Err` only for transport failures; any
/// HTTP status, including errors, comes back as a [`RemoteBody`].
pub trait TransferClient: Send + Sync {
    /// Issue a GET for `url`. When `offset > 0` a `Range: bytes=<offset>-`
    /// header is sent.
    fn open(&self, url: &str, offset: u64) -> Result<RemoteBody, String>;
}

/// Real transfer client using reqwest's blocking API.
#[derive(Debug)]
pub struct ReqwestTransferClient {
    client: Client,
    pub(crate) timeout: Duration,
}

impl ReqwestTransferClient {
    /// Create a client with the default timeouts.
    pub fn new() -> Result<Self, TransferError> {
        Self::with_timeouts(
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a client with custom connect and overall timeouts.
    pub fn with_timeouts(
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self, TransferError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| TransferError::ClientInit(e.to_string()))?;

        Ok(Self { client, timeout })
    }
}

impl TransferClient for ReqwestTransferClient {
    fn open(&self, url: &str, offset: u64) -> Result<RemoteBody, String> {
        let mut request = self.client.get(url);
        if offset > 0 {
            request = request.header(RANGE, format!("bytes={}-", offset));
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                format!("request timed out after {}s", self.timeout.as_secs())
            } else {
                e.to_string()
            }
        })?;

        Ok(RemoteBody {
            status: response.status().as_u16(),
            content_length: response.content_length(),
            reader: Box::new(response),
        })
    }
}

/// Resumable single-file transfer engine.
pub struct TransferEngine<C: TransferClient> {
    client: C,
    progress: Option<ProgressCallback>,
}

impl<C: TransferClient> TransferEngine<C> {
    /// Create an engine around the given client.
    pub fn new(client: C) -> Self {
        Self {
            client,
            progress: None,
        }
    }

    /// Report progress after every chunk written.
    pub fn with_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.progress = Some(on_progress);
        self
    }

    /// Download `url` to `dest`, resuming a partial file when present.
    pub fn transfer(&self, url: &str, dest: &Path) -> Result<TransferOutcome, TransferError> {
        let existing_size = existing_size(dest)?;

        let body = match self.client.open(url, existing_size) {
            Ok(body) => body,
            Err(reason) => return Ok(TransferOutcome::NetworkError { reason }),
        };

        match body.status {
            // Only a range request can run past the end of the file.
            416 if existing_size > 0 => return Ok(TransferOutcome::AlreadyComplete),
            404 => return Ok(TransferOutcome::NotFound),
            status @ 400..=499 => return Ok(TransferOutcome::ClientError { status }),
            200..=299 => {}
            status => {
                return Ok(TransferOutcome::NetworkError {
                    reason: format!("unexpected status {}", status),
                })
            }
        }

        let resume = existing_size > 0 && body.status == 206;
        if existing_size > 0 && !resume {
            tracing::debug!(
                "  Origin ignored range request (status {}), restarting {}",
                body.status,
                dest.display()
            );
        }

        let start_byte = if resume { existing_size } else { 0 };
        let total_size = expected_total(body.content_length, start_byte);

        if resume {
            tracing::debug!("  Resuming file {}", dest.display());
        } else {
            tracing::debug!("  Saving file to {}", dest.display());
        }

        let file = open_destination(dest, resume)?;
        self.stream_body(body.reader, file, dest, start_byte, total_size)
    }

    /// Copy the body to the file chunk by chunk.
    ///
    /// A read failure ends the transfer as a network error; whatever was
    /// already written stays on disk for the next resume.
    fn stream_body(
        &self,
        mut reader: Box<dyn Read + Send>,
        mut file: File,
        dest: &Path,
        start_byte: u64,
        total_size: u64,
    ) -> Result<TransferOutcome, TransferError> {
        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut on_disk = start_byte;

        loop {
            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    flush(&mut file, dest)?;
                    return Ok(TransferOutcome::NetworkError {
                        reason: format!("read error after {} bytes: {}", on_disk, e),
                    });
                }
            };

            file.write_all(&buffer[..bytes_read])
                .map_err(|e| TransferError::Write {
                    path: dest.to_path_buf(),
                    source: e,
                })?;

            on_disk += bytes_read as u64;

            if let Some(ref cb) = self.progress {
                cb(on_disk, total_size);
            }
        }

        flush(&mut file, dest)?;

        Ok(TransferOutcome::Completed {
            bytes_written: on_disk - start_byte,
        })
    }
}

impl<C: TransferClient> FileTransfer for TransferEngine<C> {
    fn transfer(&self, url: &str, dest: &Path) -> Result<TransferOutcome, TransferError> {
        TransferEngine::transfer(self, url, dest)
    }
}

/// Size of the file at `path`, or 0 if it does not exist.
fn existing_size(path: &Path) -> Result<u64, TransferError> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
        Err(e) => Err(TransferError::Inspect {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Full file size once this response is written, or 0 if unknown.
fn expected_total(content_length: Option<u64>, start_byte: u64) -> u64 {
    content_length
        .map(|len| len.saturating_add(start_byte))
        .unwrap_or(0)
}

/// Open the destination for appending (resume) or truncating (fresh).
fn open_destination(dest: &Path, resume: bool) -> Result<File, TransferError> {
    let mut options = OpenOptions::new();
    if resume {
        options.append(true);
    } else {
        options.write(true).create(true).truncate(true);
    }

    options.open(dest).map_err(|e| TransferError::Open {
        path: dest.to_path_buf(),
        source: e,
    })
}

fn flush(file: &mut File, dest: &Path) -> Result<(), TransferError> {
    file.flush().map_err(|e| TransferError::Write {
        path: dest.to_path_buf(),
        source: e,
    })
}
