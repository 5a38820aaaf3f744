//! Configuration: the ini file and the settings resolved from it.
//!
//! ```text
//! CLI overrides ─┐
//! ConfigFile ────┼──► Settings::resolve ──► Settings (validated)
//! defaults ──────┘
//! ```

mod file;
mod settings;

pub use file::{
    expand_tilde, home_config_path, init_path, search_paths, write_default, ConfigFile,
    ConfigFileError, HOME_CONFIG_FILE, LOCAL_CONFIG_FILE, SETTINGS_SECTION,
};
pub use settings::{
    OutputLevel, Overrides, ParseOutputLevelError, Settings, SettingsError, DEFAULT_LIST_FILE,
};
