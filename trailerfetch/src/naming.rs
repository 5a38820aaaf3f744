//! Local filenames for downloaded videos.
//!
//! The filename doubles as the key in the download list, so it must be
//! deterministic: the same title, kind and resolution always produce the
//! same name.

use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::Resolution;

/// Characters that are unsafe in filenames on at least one common platform.
const UNSAFE_CHARS: &str = r#"\/:*?<>|#%&{}$!'"@+`="#;

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Strip unsafe characters and normalize whitespace.
///
/// Every whitespace run (including tabs and newlines) becomes a single
/// space, and the result is trimmed.
pub fn sanitize(component: &str) -> String {
    let kept: String = component
        .chars()
        .filter(|c| !UNSAFE_CHARS.contains(*c))
        .collect();
    whitespace_runs().replace_all(&kept, " ").trim().to_string()
}

/// Build the filename for a video.
///
/// # Format
///
/// `{title}.{kind}.{resolution}p.mov`
///
/// # Examples
///
/// ```
/// use trailerfetch::catalog::Resolution;
/// use trailerfetch::naming::build_filename;
///
/// assert_eq!(
///     build_filename("Star Wars: Episode IV", "Trailer", Resolution::Hd720),
///     "Star Wars Episode IV.Trailer.720p.mov"
/// );
/// ```
pub fn build_filename(title: &str, kind: &str, resolution: Resolution) -> String {
    format!(
        "{}.{}.{}p.mov",
        sanitize(title),
        sanitize(kind),
        resolution.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_unsafe_characters() {
        assert_eq!(
            build_filename(r#"What/If? <"Really"> #1 & $5!"#, "Trailer", Resolution::Hd1080),
            "WhatIf Really 1 5.Trailer.1080p.mov"
        );
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            build_filename("  The   Big\tShort \n", "Teaser  2", Resolution::Sd480),
            "The Big Short.Teaser 2.480p.mov"
        );
    }

    #[test]
    fn test_keeps_unicode() {
        assert_eq!(
            build_filename("Amélie", "Trailer", Resolution::Hd720),
            "Amélie.Trailer.720p.mov"
        );
        assert_eq!(
            build_filename("千と千尋の神隠し", "First Look", Resolution::Hd720),
            "千と千尋の神隠し.First Look.720p.mov"
        );
    }

    #[test]
    fn test_deterministic() {
        let a = build_filename("Up", "Trailer", Resolution::Hd720);
        let b = build_filename("Up", "Trailer", Resolution::Hd720);
        assert_eq!(a, b);
    }

    #[test]
    fn test_never_contains_newline() {
        let name = build_filename("Line\nBreak\r\n", "Clip\n", Resolution::Hd720);
        assert!(!name.contains('\n'));
        assert!(!name.contains('\r'));
    }
}
