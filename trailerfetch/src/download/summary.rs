//! Per-batch counters.

use super::report::BatchEvent;

/// Tally of what a batch did with its candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Candidates handed to the batch.
    pub total: usize,
    /// Excluded by the selection mode.
    pub not_selected: usize,
    /// Already in the download list.
    pub skipped: usize,
    /// Downloaded (or found complete) and recorded.
    pub recorded: usize,
    /// Transfers that failed.
    pub failed: Vec<String>,
}

impl BatchSummary {
    /// Create a summary for a batch of `total` candidates.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Count one event.
    pub fn record(&mut self, event: &BatchEvent) {
        match event {
            BatchEvent::NotSelected { .. } => self.not_selected += 1,
            BatchEvent::Skipped { .. } => self.skipped += 1,
            BatchEvent::Downloading { .. } => {}
            BatchEvent::Recorded { .. } => self.recorded += 1,
            BatchEvent::Failed { filename, .. } => self.failed.push(filename.clone()),
        }
    }

    /// Candidates that passed the selection mode.
    pub fn selected(&self) -> usize {
        self.total - self.not_selected
    }

    /// Check if any transfer failed.
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Get the number of failed transfers.
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }
}
