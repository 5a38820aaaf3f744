//! Resumable downloads and the batch that drives them.
//!
//! This module provides:
//! - Single file transfers with resume support (`http`)
//! - The persistent download list (`ledger`)
//! - Video kind selection (`selection`)
//! - Per-item events and reporting (`report`)
//! - Batch counters (`summary`)
//! - Sequential batch orchestration (`orchestrator`)
//!
//! # Architecture
//!
//! ```text
//! BatchDownloader (orchestrator)
//!         │
//!         ├── SelectionMode (which kinds to fetch)
//!         │
//!         ├── Ledger (download list, loaded once per batch)
//!         │
//!         ├── FileTransfer (trait)
//!         │       └── TransferEngine<TransferClient>
//!         │
//!         └── Reporter (trait)
//!                 └── TracingReporter
//! ```
//!
//! # Example
//!
//! ```ignore
//! use trailerfetch::download::{
//!     BatchConfig, BatchDownloader, ReqwestTransferClient, TracingReporter, TransferEngine,
//! };
//!
//! let engine = TransferEngine::new(ReqwestTransferClient::new()?);
//! let downloader = BatchDownloader::new(engine, BatchConfig::new("/videos"));
//!
//! let summary = downloader.run(&candidates, TracingReporter)?;
//! println!("{} downloaded, {} failed", summary.recorded, summary.failure_count());
//! ```

mod http;
pub mod ledger;
mod orchestrator;
mod outcome;
mod report;
mod selection;
mod summary;
mod target;
mod traits;

pub use http::{
    RemoteBody, ReqwestTransferClient, TransferClient, TransferEngine, CHUNK_SIZE,
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, USER_AGENT,
};
pub use ledger::{Ledger, LedgerError, LedgerResult};
pub use orchestrator::{BatchConfig, BatchDownloader, BatchError, ItemState};
pub use outcome::{TransferError, TransferOutcome};
pub use report::{BatchEvent, Reporter, TracingReporter};
pub use selection::{ParseSelectionError, SelectionMode};
pub use summary::BatchSummary;
pub use target::TransferTarget;
pub use traits::{FileTransfer, ProgressCallback};
