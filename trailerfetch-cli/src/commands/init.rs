//! Init command - create a default configuration file.

use std::path::Path;

use trailerfetch::config::{init_path, write_default};

use crate::error::CliError;

/// Run the init command.
pub fn run(config: Option<&Path>) -> Result<(), CliError> {
    let path = init_path(config)?;

    if write_default(&path)? {
        println!("Created configuration file: {}", path.display());
    } else {
        println!("Configuration file already exists: {}", path.display());
    }
    println!();
    println!("Edit this file to customize download settings.");
    println!("Command-line options override config file values when specified.");
    Ok(())
}
