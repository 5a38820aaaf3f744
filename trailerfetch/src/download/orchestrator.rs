//! Batch download orchestrator.
//!
//! Drives one discovery batch through selection, the download list and the
//! transfer engine, strictly in discovery order and one item at a time.
//!
//! Per item:
//!
//! ```text
//! Pending ──(kind not selected)──────────────► NotSelected
//!    │
//!    ├──(filename in download list)──────────► Skipped
//!    │
//!    └──► Downloading ──(Completed |
//!                        AlreadyComplete)────► Recorded
//!                     └─(NotFound | Network |
//!                        ClientError)────────► Failed
//! ```
//!
//! A failed item never stops the batch. A download list that cannot be
//! written, or a destination file that cannot be written, does.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::ledger::{Ledger, LedgerError};
use super::outcome::TransferError;
use super::report::{BatchEvent, Reporter};
use super::selection::SelectionMode;
use super::summary::BatchSummary;
use super::target::TransferTarget;
use super::traits::FileTransfer;
use crate::catalog::Candidate;
use crate::naming::build_filename;

/// Settings the orchestrator needs for a batch.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory videos are saved to. Must already exist.
    pub download_dir: PathBuf,
    /// Download list file.
    pub ledger_path: PathBuf,
    /// Which video kinds to download.
    pub selection: SelectionMode,
}

impl BatchConfig {
    /// Create a config using `download_list.txt` inside the download directory.
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        let download_dir = download_dir.into();
        Self {
            ledger_path: download_dir.join("download_list.txt"),
            download_dir,
            selection: SelectionMode::default(),
        }
    }

    /// Set the download list path.
    pub fn with_ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }

    /// Set the selection mode.
    pub fn with_selection(mut self, selection: SelectionMode) -> Self {
        self.selection = selection;
        self
    }
}

/// Faults that stop a batch.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("download directory {} {reason}", .path.display())]
    DownloadDir { path: PathBuf, reason: String },

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

/// Terminal state of one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    NotSelected,
    Skipped,
    Recorded,
    Failed,
}

/// Summary and reporter fed by every event.
struct Emitter<R> {
    summary: BatchSummary,
    reporter: R,
}

impl<R: Reporter> Emitter<R> {
    fn emit(&mut self, event: BatchEvent) {
        self.summary.record(&event);
        self.reporter.report(&event);
    }
}

/// Sequential batch downloader.
pub struct BatchDownloader<T: FileTransfer> {
    transfer: T,
    config: BatchConfig,
}

impl<T: FileTransfer> BatchDownloader<T> {
    /// Create a downloader using the given transfer implementation.
    pub fn new(transfer: T, config: BatchConfig) -> Self {
        Self { transfer, config }
    }

    /// Get the batch configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Process every candidate.
    ///
    /// The download list is loaded once; each recorded item is appended to
    /// it in memory and on disk before the next item starts.
    pub fn run<R: Reporter>(
        &self,
        candidates: &[Candidate],
        reporter: R,
    ) -> Result<BatchSummary, BatchError> {
        check_download_dir(&self.config.download_dir)?;
        let mut ledger = Ledger::open(&self.config.ledger_path)?;

        tracing::debug!(
            "Processing {} candidates ({} already in {})",
            candidates.len(),
            ledger.len(),
            ledger.path().display()
        );

        let mut out = Emitter {
            summary: BatchSummary::new(candidates.len()),
            reporter,
        };

        for candidate in candidates {
            self.process(candidate, &mut ledger, &mut out)?;
        }

        Ok(out.summary)
    }

    /// Process a single candidate against an already-loaded download list.
    pub fn process_item<R: Reporter>(
        &self,
        candidate: &Candidate,
        ledger: &mut Ledger,
        reporter: R,
    ) -> Result<ItemState, BatchError> {
        let mut out = Emitter {
            summary: BatchSummary::new(1),
            reporter,
        };
        self.process(candidate, ledger, &mut out)
    }

    fn process<R: Reporter>(
        &self,
        candidate: &Candidate,
        ledger: &mut Ledger,
        out: &mut Emitter<R>,
    ) -> Result<ItemState, BatchError> {
        if !self.config.selection.selects(&candidate.kind) {
            out.emit(BatchEvent::NotSelected {
                title: candidate.title.clone(),
                kind: candidate.kind.clone(),
            });
            return Ok(ItemState::NotSelected);
        }

        let filename = build_filename(&candidate.title, &candidate.kind, candidate.resolution);
        if ledger.contains(&filename) {
            out.emit(BatchEvent::Skipped { filename });
            return Ok(ItemState::Skipped);
        }

        out.emit(BatchEvent::Downloading {
            kind: candidate.kind.clone(),
            filename: filename.clone(),
        });

        let target = TransferTarget::new(&candidate.url, &self.config.download_dir, &filename);
        let outcome = self.transfer.transfer(&target.url, &target.path())?;

        if outcome.is_success() {
            ledger.append(&filename)?;
            out.emit(BatchEvent::Recorded { filename, outcome });
            Ok(ItemState::Recorded)
        } else {
            out.emit(BatchEvent::Failed { filename, outcome });
            Ok(ItemState::Failed)
        }
    }
}

fn check_download_dir(path: &Path) -> Result<(), BatchError> {
    let fault = |reason: &str| BatchError::DownloadDir {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let meta = fs::metadata(path).map_err(|_| fault("does not exist"))?;
    if !meta.is_dir() {
        return Err(fault("is not a directory"));
    }
    if meta.permissions().readonly() {
        return Err(fault("is not writable"));
    }
    Ok(())
}
