//! Seams between the orchestrator and the transfer machinery.

use std::path::Path;

use super::outcome::{TransferError, TransferOutcome};

/// Progress callback for a single transfer.
///
/// Arguments: (bytes on disk so far, expected total bytes or 0 if unknown).
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Moves one remote resource to one local path.
pub trait FileTransfer {
    /// Transfer `url` to `dest`, resuming from whatever is already on disk.
    fn transfer(&self, url: &str, dest: &Path) -> Result<TransferOutcome, TransferError>;
}
