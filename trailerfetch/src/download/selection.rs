//! Which video kinds a batch downloads.

use std::fmt;
use std::str::FromStr;

/// Selection policy applied to each candidate's video kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Every video.
    All,
    /// Only the video labelled exactly "Trailer".
    #[default]
    SingleTrailer,
    /// Trailers, teasers and "First Look" clips.
    Trailers,
}

impl SelectionMode {
    /// All modes, in the order they are documented.
    pub const ALL: [SelectionMode; 3] = [
        SelectionMode::SingleTrailer,
        SelectionMode::Trailers,
        SelectionMode::All,
    ];

    /// Config/CLI spelling of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::All => "all",
            SelectionMode::SingleTrailer => "single_trailer",
            SelectionMode::Trailers => "trailers",
        }
    }

    /// Whether a video of the given kind should be downloaded.
    pub fn selects(&self, kind: &str) -> bool {
        let kind = kind.to_lowercase();
        match self {
            SelectionMode::All => true,
            SelectionMode::SingleTrailer => kind.trim() == "trailer",
            SelectionMode::Trailers => {
                kind.starts_with("trailer") || kind.starts_with("teaser") || kind == "first look"
            }
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized selection mode string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSelectionError(pub String);

impl fmt::Display for ParseSelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid: Vec<&str> = SelectionMode::ALL.iter().map(|m| m.as_str()).collect();
        write!(
            f,
            "Invalid video type '{}'. Valid values: {}",
            self.0,
            valid.join(", ")
        )
    }
}

impl std::error::Error for ParseSelectionError {}

impl FromStr for SelectionMode {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SelectionMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseSelectionError(s.to_string()))
    }
}
