//! Ini configuration file.
//!
//! Settings live in the `[DEFAULT]` section; keys written before any section
//! header are accepted as well. Values are kept as raw strings here so that
//! validation can report every bad value at once.
//!
//! ```ini
//! [DEFAULT]
//! download_dir = ~/Movies/Trailers
//! resolution = 720
//! video_types = single_trailer
//! output_level = downloads
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

/// Section holding the settings.
pub const SETTINGS_SECTION: &str = "DEFAULT";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "settings.cfg";

/// Config file looked up in the home directory.
pub const HOME_CONFIG_FILE: &str = ".trailers.cfg";

/// Errors reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read config file {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    #[error("failed to write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not determine the home directory")]
    NoHomeDir,
}

/// Raw values from a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    /// File the values came from; `None` when no file was found.
    pub source: Option<PathBuf>,
    pub download_dir: Option<String>,
    pub list_file: Option<String>,
    pub resolution: Option<String>,
    pub video_types: Option<String>,
    pub output_level: Option<String>,
    pub connect_timeout: Option<String>,
    pub timeout: Option<String>,
}

impl ConfigFile {
    /// Values written by `init`.
    pub fn defaults() -> Self {
        Self {
            source: None,
            download_dir: Some(".".to_string()),
            list_file: None,
            resolution: Some("720".to_string()),
            video_types: Some("single_trailer".to_string()),
            output_level: Some("debug".to_string()),
            connect_timeout: Some("30".to_string()),
            timeout: Some("3600".to_string()),
        }
    }

    /// Load the first config file that exists on the search path.
    ///
    /// Returns an empty config (no `source`) when none exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigFileError> {
        for path in search_paths(explicit) {
            if path.is_file() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load a specific config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigFileError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config = Self::from_ini(&ini);
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse config values from ini text.
    pub fn parse(content: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(content).map_err(|e| ConfigFileError::Read {
            path: PathBuf::from("<string>"),
            reason: e.to_string(),
        })?;
        Ok(Self::from_ini(&ini))
    }

    fn from_ini(ini: &Ini) -> Self {
        let get = |key: &str| -> Option<String> {
            ini.section(Some(SETTINGS_SECTION))
                .and_then(|s| s.get(key))
                .or_else(|| ini.general_section().get(key))
                .map(|v| v.trim().to_string())
        };

        Self {
            source: None,
            download_dir: get("download_dir"),
            list_file: get("list_file"),
            resolution: get("resolution"),
            video_types: get("video_types"),
            output_level: get("output_level"),
            connect_timeout: get("connect_timeout"),
            timeout: get("timeout"),
        }
    }

    /// Render as an ini document.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        let entries = [
            ("download_dir", &self.download_dir),
            ("list_file", &self.list_file),
            ("resolution", &self.resolution),
            ("video_types", &self.video_types),
            ("output_level", &self.output_level),
            ("connect_timeout", &self.connect_timeout),
            ("timeout", &self.timeout),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                ini.with_section(Some(SETTINGS_SECTION)).set(key, value.as_str());
            }
        }
        ini
    }

    /// Write to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let write_err = |source: io::Error| ConfigFileError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        self.to_ini().write_to_file(path).map_err(write_err)
    }
}

/// Write the default config to `path` unless a file is already there.
///
/// Returns `true` when a file was written.
pub fn write_default(path: &Path) -> Result<bool, ConfigFileError> {
    if path.exists() {
        return Ok(false);
    }
    ConfigFile::defaults().save(path)?;
    Ok(true)
}

/// Config file paths in lookup order.
///
/// The explicit path (if any) replaces `./settings.cfg`; the home file is
/// always the last resort.
pub fn search_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))];
    if let Some(home) = home_config_path() {
        paths.push(home);
    }
    paths
}

/// `~/.trailers.cfg`, if the home directory is known.
pub fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(HOME_CONFIG_FILE))
}

/// Where `init` writes: the explicit path, else `~/.trailers.cfg`.
pub fn init_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigFileError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => home_config_path().ok_or(ConfigFileError::NoHomeDir),
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
