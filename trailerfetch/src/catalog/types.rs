//! Discovery types shared by the catalog, naming and download modules.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Video resolution to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resolution {
    /// 480p ("sd" in the page data).
    Sd480,
    /// 720p ("hd720").
    #[default]
    Hd720,
    /// 1080p ("hd1080").
    Hd1080,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::Sd480, Resolution::Hd720, Resolution::Hd1080];

    /// Vertical line count as written in config files and filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Sd480 => "480",
            Resolution::Hd720 => "720",
            Resolution::Hd1080 => "1080",
        }
    }

    /// Key of this resolution in the page data's `sizes` map.
    pub fn size_key(&self) -> &'static str {
        match self {
            Resolution::Sd480 => "sd",
            Resolution::Hd720 => "hd720",
            Resolution::Hd1080 => "hd1080",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized resolution string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid resolution '{0}'. Valid values: 480, 720, 1080")]
pub struct ParseResolutionError(pub String);

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('p');
        Resolution::ALL
            .into_iter()
            .find(|r| r.as_str() == trimmed)
            .ok_or_else(|| ParseResolutionError(s.to_string()))
    }
}

/// One downloadable video found by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Movie title.
    pub title: String,
    /// Video kind label, e.g. "Trailer", "Teaser 2", "Clip".
    pub kind: String,
    /// Resolution of the file at `url`.
    pub resolution: Resolution,
    /// Direct URL of the video file.
    pub url: String,
}

impl Candidate {
    pub fn new(
        title: impl Into<String>,
        kind: impl Into<String>,
        resolution: Resolution,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            kind: kind.into(),
            resolution,
            url: url.into(),
        }
    }
}

/// What discovery should look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every movie in the "Just Added" feed.
    JustAdded,
    /// A single movie page.
    Page(String),
}

/// Discovery failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("failed to parse {url}: {reason}")]
    Parse { url: String, reason: String },
}

/// Produces download candidates.
pub trait CandidateSource {
    /// List every video available at `resolution` within `scope`.
    ///
    /// Videos without a file at that resolution are left out.
    fn list_candidates(
        &self,
        scope: &Scope,
        resolution: Resolution,
    ) -> Result<Vec<Candidate>, CatalogError>;
}
