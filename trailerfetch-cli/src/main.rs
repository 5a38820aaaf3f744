//! trailerfetch CLI - Command-line interface
//!
//! With no command, downloads every trailer in the "Just Added" list (or the
//! single page given with `--url`) that is not already in the download list.

mod commands;
mod error;
mod progress;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use trailerfetch::config::Overrides;

use commands::download::DownloadArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "trailerfetch")]
#[command(version = trailerfetch::VERSION)]
#[command(about = "Download movie trailers from the Apple Trailers site", long_about = None)]
#[command(after_help = "Example URL: https://trailers.apple.com/trailers/lions_gate/thehungergames/")]
struct Cli {
    /// Config file location (defaults to ./settings.cfg, then ~/.trailers.cfg)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Directory trailers are downloaded to
    #[arg(short = 'd', long)]
    dir: Option<String>,

    /// Download list file (defaults to download_list.txt in the download directory)
    #[arg(short = 'l', long = "listfile")]
    list_file: Option<String>,

    /// Preferred resolution: 480, 720 or 1080
    #[arg(short = 'r', long)]
    resolution: Option<String>,

    /// Trailer page URL; only that movie's videos are downloaded
    #[arg(short = 'u', long)]
    url: Option<String>,

    /// Video types to download: single_trailer, trailers or all
    #[arg(short = 'v', long = "videotypes")]
    video_types: Option<String>,

    /// Console output level: debug, downloads or error
    #[arg(short = 'o', long = "output_level")]
    output_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default configuration file
    Init,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Some(Commands::Init) => commands::init::run(cli.config.as_deref()),
        None => commands::download::run(DownloadArgs {
            config: cli.config,
            overrides: Overrides {
                download_dir: cli.dir,
                list_file: cli.list_file,
                resolution: cli.resolution,
                video_types: cli.video_types,
                output_level: cli.output_level,
                page: cli.url,
            },
        }),
    }
}
