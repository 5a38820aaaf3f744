//! Download command - discover trailers and download the new ones.

use std::path::PathBuf;

use trailerfetch::catalog::{AppleCatalog, CandidateSource, ReqwestClient};
use trailerfetch::config::{ConfigFile, OutputLevel, Overrides, Settings};
use trailerfetch::download::{
    BatchDownloader, BatchSummary, ReqwestTransferClient, TracingReporter, TransferEngine,
};
use trailerfetch::logging;

use crate::error::CliError;
use crate::progress::{ConsoleReporter, ProgressSlot};

/// Arguments for the download command.
#[derive(Debug, Default)]
pub struct DownloadArgs {
    pub config: Option<PathBuf>,
    pub overrides: Overrides,
}

/// Run the download command.
pub fn run(args: DownloadArgs) -> Result<(), CliError> {
    let settings = load_settings(&args)?;
    logging::init(settings.output_level);
    log_settings(&settings);

    let catalog_client = ReqwestClient::with_timeouts(settings.connect_timeout, settings.timeout)?;
    let catalog = AppleCatalog::new(catalog_client).with_selection(settings.video_types);
    let candidates = catalog.list_candidates(&settings.scope(), settings.resolution)?;

    let slot = ProgressSlot::new(settings.output_level != OutputLevel::Error);
    let client = ReqwestTransferClient::with_timeouts(settings.connect_timeout, settings.timeout)?;
    let engine = TransferEngine::new(client).with_progress(slot.callback());

    let downloader = BatchDownloader::new(engine, settings.batch_config());
    let summary = downloader.run(&candidates, ConsoleReporter::new(TracingReporter, slot))?;

    log_summary(&summary);
    Ok(())
}

/// Read the config file and combine it with the command-line overrides.
fn load_settings(args: &DownloadArgs) -> Result<Settings, CliError> {
    let file = ConfigFile::discover(args.config.as_deref())?;
    if file.source.is_none() {
        eprintln!("Config file not found. Using default values.");
    }
    Ok(Settings::resolve(&args.overrides, &file)?)
}

fn log_settings(settings: &Settings) {
    if let Some(path) = &settings.config_path {
        tracing::debug!("Loaded configuration from {}", path.display());
    }
    tracing::debug!("Using configuration values:");
    for (name, value) in settings.entries() {
        tracing::debug!("    {}: {}", name, value);
    }
}

fn log_summary(summary: &BatchSummary) {
    tracing::info!(
        "Done: {} downloaded, {} already downloaded, {} failed ({} of {} videos selected)",
        summary.recorded,
        summary.skipped,
        summary.failure_count(),
        summary.selected(),
        summary.total
    );
    for filename in &summary.failed {
        tracing::debug!("    failed: {}", filename);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_settings_stop_before_any_request() {
        let temp = tempfile::tempdir().unwrap();
        let config = temp.path().join("trailers.cfg");
        std::fs::write(&config, "[DEFAULT]\nresolution = 4k\n").unwrap();

        let args = DownloadArgs {
            config: Some(config),
            overrides: Overrides {
                download_dir: Some(temp.path().display().to_string()),
                ..Default::default()
            },
        };

        let err = run(args).unwrap_err();
        match err {
            CliError::Settings(e) => assert_eq!(e.problems.len(), 1),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_load_settings_reads_explicit_config() {
        let temp = tempfile::tempdir().unwrap();
        let config = temp.path().join("trailers.cfg");
        std::fs::write(
            &config,
            format!(
                "[DEFAULT]\ndownload_dir = {}\nvideo_types = all\n",
                temp.path().display()
            ),
        )
        .unwrap();

        let settings = load_settings(&DownloadArgs {
            config: Some(config.clone()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(settings.config_path, Some(config));
        assert_eq!(settings.download_dir, temp.path());
    }
}
