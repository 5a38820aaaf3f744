//! Download ledger: the persisted list of completed downloads.
//!
//! The ledger is a UTF-8 text file with one filename per line. A missing
//! file is an empty ledger. Every mutation rewrites the whole file, going
//! through a sibling temporary file so an interrupted write never leaves a
//! truncated ledger behind.
//!
//! Only one process may own a ledger at a time; nothing here locks the file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors reading or writing the ledger file.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to read download list {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write download list {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Load the recorded filenames, in insertion order.
///
/// Each line is trimmed; blank lines are ignored.
pub fn load(path: &Path) -> LedgerResult<Vec<String>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(LedgerError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Replace the ledger with `records`, one per line.
pub fn save(records: &[String], path: &Path) -> LedgerResult<()> {
    let mut contents = String::with_capacity(records.iter().map(|r| r.len() + 1).sum());
    for record in records {
        contents.push_str(record);
        contents.push('\n');
    }

    let staging = staging_path(path);
    let write_err = |e: io::Error| LedgerError::Write {
        path: path.to_path_buf(),
        source: e,
    };

    fs::write(&staging, contents).map_err(write_err)?;
    fs::rename(&staging, path).map_err(|e| {
        fs::remove_file(&staging).ok();
        write_err(e)
    })
}

/// Append `filename` to the ledger at `path`.
pub fn record(filename: &str, path: &Path) -> LedgerResult<()> {
    let mut records = load(path)?;
    records.push(filename.to_string());
    save(&records, path)
}

/// Exact membership test.
pub fn contains(records: &[String], filename: &str) -> bool {
    records.iter().any(|r| r == filename)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// In-memory ledger that persists every append.
///
/// Loaded once per batch; the in-memory copy is authoritative for the rest
/// of the run.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
    records: Vec<String>,
}

impl Ledger {
    /// Load the ledger at `path`, empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let path = path.into();
        let records = load(&path)?;
        Ok(Self { path, records })
    }

    /// Whether `filename` has been recorded.
    pub fn contains(&self, filename: &str) -> bool {
        contains(&self.records, filename)
    }

    /// Record `filename` in memory and on disk.
    ///
    /// If the write fails the in-memory copy is rolled back so the two never
    /// disagree.
    pub fn append(&mut self, filename: &str) -> LedgerResult<()> {
        self.records.push(filename.to_string());
        if let Err(e) = save(&self.records, &self.path) {
            self.records.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Recorded filenames in insertion order.
    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("download_list.txt");

        assert!(load(&path).unwrap().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_record_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("download_list.txt");

        record("Up.Trailer.720p.mov", &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Up.Trailer.720p.mov\n");
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_record_twice_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("download_list.txt");

        record("Up.Trailer.720p.mov", &path).unwrap();
        assert!(contains(&load(&path).unwrap(), "Up.Trailer.720p.mov"));

        record("Up.Trailer.720p.mov", &path).unwrap();
        let records = load(&path).unwrap();
        assert!(contains(&records, "Up.Trailer.720p.mov"));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_load_trims_lines_and_skips_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("download_list.txt");
        fs::write(&path, "  a.mov  \r\n\n\tb.mov\n").unwrap();

        assert_eq!(load(&path).unwrap(), vec!["a.mov", "b.mov"]);
    }

    #[test]
    fn test_contains_is_exact() {
        let records = vec!["Amélie.Trailer.720p.mov".to_string()];

        assert!(contains(&records, "Amélie.Trailer.720p.mov"));
        assert!(!contains(&records, "amélie.trailer.720p.mov"));
        assert!(!contains(&records, "Amélie.Trailer.720p"));
    }

    #[test]
    fn test_unreadable_ledger_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a text file.
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, LedgerError::Read { .. }));
    }

    #[test]
    fn test_non_utf8_ledger_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("download_list.txt");
        fs::write(&path, [0xff, 0xfe, b'\n']).unwrap();

        assert!(load(&path).is_err());
    }

    #[test]
    fn test_ledger_append_persists_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("download_list.txt");

        let mut ledger = Ledger::open(&path).unwrap();
        assert!(ledger.is_empty());
        ledger.append("first.mov").unwrap();
        ledger.append("second.mov").unwrap();

        assert!(ledger.contains("first.mov"));
        assert_eq!(ledger.len(), 2);
        assert_eq!(load(&path).unwrap(), vec!["first.mov", "second.mov"]);
    }

    #[test]
    fn test_ledger_append_failure_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("download_list.txt");

        let mut ledger = Ledger::open(&path).unwrap();
        assert!(ledger.append("a.mov").is_err());
        assert!(!ledger.contains("a.mov"));
    }

    fn filename() -> impl Strategy<Value = String> {
        "\\PC{1,40}".prop_filter("no surrounding whitespace", |s| {
            !s.is_empty() && s.trim() == s && !s.contains(['\n', '\r'])
        })
    }

    proptest! {
        #[test]
        fn prop_save_then_load_round_trips(records in prop::collection::vec(filename(), 0..20)) {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("download_list.txt");

            save(&records, &path).unwrap();
            prop_assert_eq!(load(&path).unwrap(), records);
        }
    }

    #[test]
    fn test_round_trip_unicode_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("download_list.txt");
        let records = vec![
            "Amélie.Trailer.720p.mov".to_string(),
            "Cafe\u{301}.Teaser.1080p.mov".to_string(),
            "千と千尋の神隠し.Trailer.480p.mov".to_string(),
            "Star ★ Wars.First Look.720p.mov".to_string(),
        ];

        save(&records, &path).unwrap();
        assert_eq!(load(&path).unwrap(), records);
    }
}
