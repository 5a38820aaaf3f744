//! trailerfetch - resumable movie trailer downloader
//!
//! This library discovers newly published trailers on the Apple Trailers
//! site and downloads them to local storage, skipping files already
//! retrieved and resuming partial ones.
//!
//! # Modules
//!
//! - [`catalog`]: discovery of downloadable videos
//! - [`download`]: transfer engine, download list and batch orchestration
//! - [`naming`]: deterministic local filenames
//! - [`config`]: config file and validated settings
//! - [`logging`]: tracing subscriber setup

pub mod catalog;
pub mod config;
pub mod download;
pub mod logging;
pub mod naming;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
