//! CLI error type.

use std::fmt;

use trailerfetch::catalog::CatalogError;
use trailerfetch::config::{ConfigFileError, SettingsError};
use trailerfetch::download::{BatchError, TransferError};

/// Errors surfaced to the user by the CLI.
#[derive(Debug)]
pub enum CliError {
    /// Config file could not be read or written.
    Config(ConfigFileError),
    /// One or more settings are invalid.
    Settings(SettingsError),
    /// Discovery failed.
    Catalog(CatalogError),
    /// The HTTP client could not be built.
    Client(TransferError),
    /// The batch stopped.
    Batch(BatchError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Settings(e) => {
                for problem in &e.problems {
                    writeln!(f, "Configuration error: {}", problem)?;
                }
                write!(f, "Exiting...")
            }
            CliError::Catalog(e) => write!(f, "Error loading trailer list: {}", e),
            CliError::Client(e) => write!(f, "Error: {}", e),
            CliError::Batch(e) => write!(f, "Download aborted: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<SettingsError> for CliError {
    fn from(e: SettingsError) -> Self {
        CliError::Settings(e)
    }
}

impl From<CatalogError> for CliError {
    fn from(e: CatalogError) -> Self {
        CliError::Catalog(e)
    }
}

impl From<TransferError> for CliError {
    fn from(e: TransferError) -> Self {
        CliError::Client(e)
    }
}

impl From<BatchError> for CliError {
    fn from(e: BatchError) -> Self {
        CliError::Batch(e)
    }
}
