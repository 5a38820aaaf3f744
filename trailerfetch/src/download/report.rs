//! Structured per-item events emitted by the batch downloader.
//!
//! The downloader decides; a [`Reporter`] presents. The default
//! [`TracingReporter`] turns events into log lines at the level the
//! configured output level expects: skips at debug, downloads at info,
//! failures at error.

use super::outcome::TransferOutcome;

/// What happened to one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// The selection mode excluded this video kind.
    NotSelected { title: String, kind: String },

    /// Already in the download list.
    Skipped { filename: String },

    /// Transfer starting.
    Downloading { kind: String, filename: String },

    /// Transfer finished (or was already complete) and the file was recorded.
    Recorded {
        filename: String,
        outcome: TransferOutcome,
    },

    /// Transfer failed; nothing recorded.
    Failed {
        filename: String,
        outcome: TransferOutcome,
    },
}

/// Consumer of batch events.
pub trait Reporter {
    fn report(&mut self, event: &BatchEvent);
}

/// Reporter writing every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, event: &BatchEvent) {
        match event {
            BatchEvent::NotSelected { title, kind } => {
                tracing::debug!("  Not selected: {} ({})", title, kind);
            }
            BatchEvent::Skipped { filename } => {
                tracing::debug!("*** File already downloaded, skipping: {}", filename);
            }
            BatchEvent::Downloading { kind, filename } => {
                tracing::info!("Downloading {}: {}", kind, filename);
            }
            BatchEvent::Recorded { filename, outcome } => match outcome {
                TransferOutcome::AlreadyComplete => {
                    tracing::debug!("*** File already downloaded, recording: {}", filename);
                }
                _ => tracing::debug!("  Recorded {} ({})", filename, outcome),
            },
            BatchEvent::Failed { filename, outcome } => match outcome {
                TransferOutcome::NotFound => {
                    tracing::error!("*** Error downloading file: file not found ({})", filename);
                }
                other => {
                    tracing::error!("*** Error downloading file {}: {}", filename, other);
                }
            },
        }
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, event: &BatchEvent) {
        (**self).report(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Collect(Vec<BatchEvent>);

    impl Reporter for Collect {
        fn report(&mut self, event: &BatchEvent) {
            self.0.push(event.clone());
        }
    }

    #[test]
    fn test_reporter_through_mut_reference() {
        fn emit<R: Reporter>(mut reporter: R) {
            reporter.report(&BatchEvent::Skipped {
                filename: "a.mov".to_string(),
            });
        }

        let mut collect = Collect::default();
        emit(&mut collect);
        emit(&mut collect);
        assert_eq!(collect.0.len(), 2);
    }

    #[test]
    fn test_tracing_reporter_handles_every_event() {
        let mut reporter = TracingReporter;
        let events = [
            BatchEvent::NotSelected {
                title: "Up".to_string(),
                kind: "Clip".to_string(),
            },
            BatchEvent::Skipped {
                filename: "Up.Trailer.720p.mov".to_string(),
            },
            BatchEvent::Downloading {
                kind: "Trailer".to_string(),
                filename: "Up.Trailer.720p.mov".to_string(),
            },
            BatchEvent::Recorded {
                filename: "Up.Trailer.720p.mov".to_string(),
                outcome: TransferOutcome::AlreadyComplete,
            },
            BatchEvent::Failed {
                filename: "Up.Trailer.720p.mov".to_string(),
                outcome: TransferOutcome::NotFound,
            },
        ];
        for event in &events {
            reporter.report(event);
        }
    }
}
