//! Console progress for transfers.
//!
//! One `indicatif` bar per transfer. The bar lives in a shared slot so the
//! transfer engine's progress callback and the batch reporter see the same
//! bar: the reporter creates it when a download starts and clears it when
//! the item is recorded or fails.

use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressStyle};
use trailerfetch::download::{BatchEvent, ProgressCallback, Reporter};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

/// Shared holder for the active bar.
#[derive(Clone, Default)]
pub struct ProgressSlot {
    bar: Arc<Mutex<Option<ProgressBar>>>,
    enabled: bool,
}

impl ProgressSlot {
    pub fn new(enabled: bool) -> Self {
        Self {
            bar: Arc::default(),
            enabled,
        }
    }

    /// Callback for the transfer engine.
    pub fn callback(&self) -> ProgressCallback {
        let slot = self.clone();
        Box::new(move |downloaded, total| {
            slot.with_bar(|bar| {
                if total > 0 {
                    bar.set_length(total);
                }
                bar.set_position(downloaded);
            });
        })
    }

    fn start(&self) {
        if !self.enabled {
            return;
        }
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn finish(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(slot) = self.bar.lock() {
            if let Some(bar) = slot.as_ref() {
                f(bar);
            }
        }
    }

    /// Run `f` with the bar hidden so log lines do not tear it.
    fn suspend(&self, f: impl FnOnce()) {
        let bar = self.bar.lock().ok().and_then(|slot| slot.clone());
        match bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }
}

/// Reporter that logs through `inner` and drives the progress bar.
pub struct ConsoleReporter<R> {
    inner: R,
    slot: ProgressSlot,
}

impl<R: Reporter> ConsoleReporter<R> {
    pub fn new(inner: R, slot: ProgressSlot) -> Self {
        Self { inner, slot }
    }
}

impl<R: Reporter> Reporter for ConsoleReporter<R> {
    fn report(&mut self, event: &BatchEvent) {
        match event {
            BatchEvent::Downloading { .. } => {
                self.inner.report(event);
                self.slot.start();
            }
            BatchEvent::Recorded { .. } | BatchEvent::Failed { .. } => {
                self.slot.finish();
                self.inner.report(event);
            }
            _ => {
                let inner = &mut self.inner;
                self.slot.suspend(|| inner.report(event));
            }
        }
    }
}
