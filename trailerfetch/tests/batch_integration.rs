//! End-to-end batch tests: discovery through a fake catalog, transfers
//! through a fake origin, real files and download list on disk.

use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::sync::Mutex;

use tempfile::TempDir;
use trailerfetch::catalog::{
    page_data_url, AppleCatalog, CandidateSource, CatalogError, HttpClient, Resolution, Scope,
    JUST_ADDED_URL,
};
use trailerfetch::download::{
    ledger, BatchConfig, BatchDownloader, BatchEvent, RemoteBody, Reporter, SelectionMode,
    TracingReporter, TransferClient, TransferEngine,
};

const UP_PAGE: &str = "https://trailers.apple.com/trailers/disney/up";
const CARS_PAGE: &str = "https://trailers.apple.com/trailers/disney/cars";

/// Catalog endpoints served from memory.
struct FakeSite {
    pages: HashMap<String, String>,
}

impl HttpClient for FakeSite {
    fn get(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.pages
            .get(url)
            .map(|body| body.clone().into_bytes())
            .ok_or_else(|| CatalogError::Http(format!("HTTP 404 for {}", url)))
    }
}

/// File server honoring byte ranges.
#[derive(Default)]
struct FakeOrigin {
    files: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<(String, u64)>>,
}

impl TransferClient for FakeOrigin {
    fn open(&self, url: &str, offset: u64) -> Result<RemoteBody, String> {
        self.requests.lock().unwrap().push((url.to_string(), offset));

        let Some(data) = self.files.get(url) else {
            return Ok(RemoteBody {
                status: 404,
                content_length: None,
                reader: Box::new(Cursor::new(Vec::new())),
            });
        };

        let offset = offset as usize;
        if offset >= data.len() && offset > 0 {
            return Ok(RemoteBody {
                status: 416,
                content_length: None,
                reader: Box::new(Cursor::new(Vec::new())),
            });
        }

        let body = data[offset..].to_vec();
        Ok(RemoteBody {
            status: if offset > 0 { 206 } else { 200 },
            content_length: Some(body.len() as u64),
            reader: Box::new(Cursor::new(body)),
        })
    }
}

impl TransferClient for &FakeOrigin {
    fn open(&self, url: &str, offset: u64) -> Result<RemoteBody, String> {
        (**self).open(url, offset)
    }
}

impl FakeOrigin {
    fn requests(&self) -> Vec<(String, u64)> {
        self.requests.lock().unwrap().clone()
    }
}

#[derive(Default)]
struct Collect(Vec<BatchEvent>);

impl Reporter for Collect {
    fn report(&mut self, event: &BatchEvent) {
        TracingReporter.report(event);
        self.0.push(event.clone());
    }
}

fn clip(title: &str, slug: &str) -> String {
    format!(
        r#"{{"title": "{}", "versions": {{"enus": {{"sizes": {{
            "hd720": {{"src": "https://movietrailers.apple.com/movies/{}_720p.mov"}}
        }}}}}}}}"#,
        title, slug
    )
}

fn site() -> FakeSite {
    let mut pages = HashMap::new();
    pages.insert(
        JUST_ADDED_URL.to_string(),
        r#"[{"location": "/trailers/disney/up/"}, {"location": "/trailers/disney/cars/"}]"#
            .to_string(),
    );
    pages.insert(
        page_data_url(UP_PAGE),
        format!(
            r#"{{"page": {{"movie_title": "Up"}}, "clips": [{}, {}]}}"#,
            clip("Trailer", "up-tlr1"),
            clip("Clip", "up-clip1")
        ),
    );
    pages.insert(
        page_data_url(CARS_PAGE),
        format!(
            r#"{{"page": {{"movie_title": "Cars: Reloaded"}}, "clips": [{}]}}"#,
            clip("Trailer", "cars-tlr1")
        ),
    );
    FakeSite { pages }
}

fn origin() -> FakeOrigin {
    let mut files = HashMap::new();
    files.insert(
        "https://movietrailers.apple.com/movies/up-tlr1_h720p.mov".to_string(),
        vec![1u8; 4096],
    );
    files.insert(
        "https://movietrailers.apple.com/movies/cars-tlr1_h720p.mov".to_string(),
        (0..=255u8).cycle().take(10_000).collect(),
    );
    FakeOrigin {
        files,
        ..Default::default()
    }
}

#[test]
fn test_just_added_batch_downloads_and_records() {
    let temp = TempDir::new().unwrap();
    let catalog = AppleCatalog::new(site());
    let candidates = catalog
        .list_candidates(&Scope::JustAdded, Resolution::Hd720)
        .unwrap();
    assert_eq!(candidates.len(), 3);

    let downloader = BatchDownloader::new(
        TransferEngine::new(origin()),
        BatchConfig::new(temp.path()),
    );
    let summary = downloader.run(&candidates, Collect::default()).unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.not_selected, 1);
    assert_eq!(summary.recorded, 2);
    assert!(!summary.has_failures());

    assert_eq!(
        fs::read(temp.path().join("Up.Trailer.720p.mov")).unwrap().len(),
        4096
    );
    assert_eq!(
        fs::read(temp.path().join("Cars Reloaded.Trailer.720p.mov"))
            .unwrap()
            .len(),
        10_000
    );
    assert_eq!(
        ledger::load(&temp.path().join("download_list.txt")).unwrap(),
        vec!["Up.Trailer.720p.mov", "Cars Reloaded.Trailer.720p.mov"]
    );
}

#[test]
fn test_second_run_skips_recorded_files() {
    let temp = TempDir::new().unwrap();
    let candidates = AppleCatalog::new(site())
        .list_candidates(&Scope::JustAdded, Resolution::Hd720)
        .unwrap();
    let downloader = BatchDownloader::new(
        TransferEngine::new(origin()),
        BatchConfig::new(temp.path()).with_selection(SelectionMode::All),
    );

    downloader.run(&candidates, Collect::default()).unwrap();
    let list_before = fs::read(temp.path().join("download_list.txt")).unwrap();

    let mut events = Collect::default();
    let summary = downloader.run(&candidates, &mut events).unwrap();

    // The clip has no file on the origin, so it fails each time.
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.recorded, 0);
    assert_eq!(summary.failure_count(), 1);
    assert_eq!(
        fs::read(temp.path().join("download_list.txt")).unwrap(),
        list_before
    );
}

#[test]
fn test_partial_file_is_resumed() {
    let temp = TempDir::new().unwrap();
    let full: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
    fs::write(
        temp.path().join("Cars Reloaded.Trailer.720p.mov"),
        &full[..3000],
    )
    .unwrap();

    let candidates = AppleCatalog::new(site())
        .list_candidates(&Scope::Page(CARS_PAGE.to_string()), Resolution::Hd720)
        .unwrap();
    let downloader = BatchDownloader::new(
        TransferEngine::new(origin()),
        BatchConfig::new(temp.path()),
    );

    let summary = downloader.run(&candidates, Collect::default()).unwrap();

    assert_eq!(summary.recorded, 1);
    assert_eq!(
        fs::read(temp.path().join("Cars Reloaded.Trailer.720p.mov")).unwrap(),
        full
    );
}

#[test]
fn test_complete_file_missing_from_list_is_recorded() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Up.Trailer.720p.mov"), vec![1u8; 4096]).unwrap();

    let candidates = AppleCatalog::new(site())
        .list_candidates(&Scope::Page(UP_PAGE.to_string()), Resolution::Hd720)
        .unwrap();
    let origin = origin();
    let downloader =
        BatchDownloader::new(TransferEngine::new(&origin), BatchConfig::new(temp.path()));

    let mut events = Collect::default();
    let summary = downloader.run(&candidates, &mut events).unwrap();

    assert_eq!(summary.recorded, 1);
    assert!(events.0.iter().any(|e| matches!(
        e,
        BatchEvent::Recorded {
            outcome: trailerfetch::download::TransferOutcome::AlreadyComplete,
            ..
        }
    )));
    assert_eq!(
        origin.requests(),
        vec![(
            "https://movietrailers.apple.com/movies/up-tlr1_h720p.mov".to_string(),
            4096
        )]
    );
    assert_eq!(
        fs::read(temp.path().join("Up.Trailer.720p.mov")).unwrap().len(),
        4096
    );
}

#[test]
fn test_skipped_items_make_no_requests() {
    let temp = TempDir::new().unwrap();
    ledger::save(
        &["Up.Trailer.720p.mov".to_string()],
        &temp.path().join("download_list.txt"),
    )
    .unwrap();

    let candidates = AppleCatalog::new(site())
        .list_candidates(&Scope::Page(UP_PAGE.to_string()), Resolution::Hd720)
        .unwrap();
    let origin = origin();
    let downloader =
        BatchDownloader::new(TransferEngine::new(&origin), BatchConfig::new(temp.path()));

    let summary = downloader.run(&candidates, Collect::default()).unwrap();

    assert_eq!(summary.skipped, 1);
    assert!(origin.requests().is_empty());
    assert!(!temp.path().join("Up.Trailer.720p.mov").exists());
}
