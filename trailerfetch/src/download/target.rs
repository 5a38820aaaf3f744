//! Where one transfer reads from and writes to.

use std::path::{Path, PathBuf};

/// A remote file and the local path it is saved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTarget {
    pub url: String,
    pub directory: PathBuf,
    pub filename: String,
}

impl TransferTarget {
    pub fn new(
        url: impl Into<String>,
        directory: impl AsRef<Path>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            directory: directory.as_ref().to_path_buf(),
            filename: filename.into(),
        }
    }

    /// Full destination path.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_joins_directory_and_filename() {
        let target = TransferTarget::new("http://x/a.mov", "/videos", "Up.Trailer.720p.mov");
        assert_eq!(target.path(), PathBuf::from("/videos/Up.Trailer.720p.mov"));
    }
}
