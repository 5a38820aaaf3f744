//! Resolved, validated settings.
//!
//! Precedence: command-line overrides, then the config file, then defaults.
//! Every invalid value is collected so the user sees all problems at once.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use super::file::{expand_tilde, ConfigFile};
use crate::catalog::{Resolution, Scope};
use crate::download::{
    BatchConfig, SelectionMode, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};

/// Default download list filename inside the download directory.
pub const DEFAULT_LIST_FILE: &str = "download_list.txt";

/// How much the tool prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputLevel {
    /// Everything, including skipped files.
    #[default]
    Debug,
    /// Downloads and errors.
    Downloads,
    /// Errors only.
    Error,
}

impl OutputLevel {
    pub const ALL: [OutputLevel; 3] = [
        OutputLevel::Debug,
        OutputLevel::Downloads,
        OutputLevel::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputLevel::Debug => "debug",
            OutputLevel::Downloads => "downloads",
            OutputLevel::Error => "error",
        }
    }

    /// Tracing filter directive for this level.
    pub fn directive(&self) -> &'static str {
        match self {
            OutputLevel::Debug => "debug",
            OutputLevel::Downloads => "info",
            OutputLevel::Error => "error",
        }
    }
}

impl fmt::Display for OutputLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown output level name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid output level '{0}'. Valid values: debug, downloads, error")]
pub struct ParseOutputLevelError(pub String);

impl FromStr for OutputLevel {
    type Err = ParseOutputLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| ParseOutputLevelError(s.to_string()))
    }
}

/// Values given on the command line. `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub download_dir: Option<String>,
    pub list_file: Option<String>,
    pub resolution: Option<String>,
    pub video_types: Option<String>,
    pub output_level: Option<String>,
    pub page: Option<String>,
}

/// Invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration: {}", .problems.join("; "))]
pub struct SettingsError {
    pub problems: Vec<String>,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub download_dir: PathBuf,
    pub list_file: PathBuf,
    pub resolution: Resolution,
    pub video_types: SelectionMode,
    pub output_level: OutputLevel,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    /// Single trailer page to download from instead of the Just Added feed.
    pub page: Option<String>,
    /// Config file the settings were read from.
    pub config_path: Option<PathBuf>,
}

impl Settings {
    /// Combine overrides, file values and defaults, and validate the result.
    pub fn resolve(overrides: &Overrides, file: &ConfigFile) -> Result<Self, SettingsError> {
        let mut problems = Vec::new();

        let pick =
            |cli: &Option<String>, cfg: &Option<String>| cli.clone().or_else(|| cfg.clone());

        let download_dir = expand_tilde(
            &pick(&overrides.download_dir, &file.download_dir)
                .unwrap_or_else(|| ".".to_string()),
        );
        let list_file = pick(&overrides.list_file, &file.list_file)
            .map(|p| expand_tilde(&p))
            .unwrap_or_else(|| download_dir.join(DEFAULT_LIST_FILE));

        let resolution = parse_or_default(
            pick(&overrides.resolution, &file.resolution),
            &mut problems,
        );
        let video_types = parse_or_default(
            pick(&overrides.video_types, &file.video_types),
            &mut problems,
        );
        let output_level = parse_or_default(
            pick(&overrides.output_level, &file.output_level),
            &mut problems,
        );
        let connect_timeout = parse_seconds(
            "connect_timeout",
            file.connect_timeout.as_deref(),
            DEFAULT_CONNECT_TIMEOUT_SECS,
            &mut problems,
        );
        let timeout = parse_seconds(
            "timeout",
            file.timeout.as_deref(),
            DEFAULT_TIMEOUT_SECS,
            &mut problems,
        );

        match fs::metadata(&download_dir) {
            Ok(meta) if meta.is_dir() && !meta.permissions().readonly() => {}
            Ok(meta) if meta.is_dir() => problems.push(format!(
                "The download directory must be writable: {}",
                download_dir.display()
            )),
            _ => problems.push(format!(
                "The download directory must be a valid path: {}",
                download_dir.display()
            )),
        }
        if !list_file_dir(&list_file).is_dir() {
            problems.push(format!(
                "The list file directory must be a valid path: {}",
                list_file_dir(&list_file).display()
            ));
        }

        if !problems.is_empty() {
            return Err(SettingsError { problems });
        }

        Ok(Self {
            download_dir,
            list_file,
            resolution,
            video_types,
            output_level,
            connect_timeout,
            timeout,
            page: overrides.page.clone(),
            config_path: file.source.clone(),
        })
    }

    /// What to discover.
    pub fn scope(&self) -> Scope {
        match &self.page {
            Some(url) => Scope::Page(url.clone()),
            None => Scope::JustAdded,
        }
    }

    /// Configuration for the batch downloader.
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig::new(&self.download_dir)
            .with_ledger_path(&self.list_file)
            .with_selection(self.video_types)
    }

    /// Name/value pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("download_dir", self.download_dir.display().to_string()),
            ("list_file", self.list_file.display().to_string()),
            ("resolution", self.resolution.to_string()),
            ("video_types", self.video_types.to_string()),
            ("output_level", self.output_level.to_string()),
            ("connect_timeout", self.connect_timeout.as_secs().to_string()),
            ("timeout", self.timeout.as_secs().to_string()),
            ("page", self.page.clone().unwrap_or_default()),
        ]
    }
}

fn parse_or_default<T>(value: Option<String>, problems: &mut Vec<String>) -> T
where
    T: FromStr + Default,
    T::Err: fmt::Display,
{
    match value {
        None => T::default(),
        Some(raw) => raw.parse().unwrap_or_else(|e: T::Err| {
            problems.push(e.to_string());
            T::default()
        }),
    }
}

fn parse_seconds(
    key: &str,
    value: Option<&str>,
    default: u64,
    problems: &mut Vec<String>,
) -> Duration {
    let Some(raw) = value else {
        return Duration::from_secs(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Duration::from_secs(secs),
        _ => {
            problems.push(format!(
                "Invalid {} '{}'. Must be a positive number of seconds",
                key, raw
            ));
            Duration::from_secs(default)
        }
    }
}

fn list_file_dir(list_file: &Path) -> &Path {
    match list_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
