//! Apple Trailers catalog.
//!
//! # Endpoints
//!
//! - Just Added feed: `https://trailers.apple.com/trailers/home/feeds/just_added.json`,
//!   an array of movies each carrying a site-relative `location`.
//! - Page data: `<page url>/data/page.json`, holding the movie title and one
//!   clip per video with its files keyed by size (`sd`, `hd720`, `hd1080`).
//!
//! The `src` URLs in the page data are not the ones the file server answers
//! to: `_720p.mov` has to become `_h720p.mov`.

use std::collections::HashMap;

use serde::Deserialize;

use super::http::HttpClient;
use super::types::{Candidate, CandidateSource, CatalogError, Resolution, Scope};
use crate::download::SelectionMode;

/// Site root; feed locations are relative to it.
pub const TRAILERS_BASE_URL: &str = "https://trailers.apple.com";

/// The "Just Added" feed.
pub const JUST_ADDED_URL: &str = "https://trailers.apple.com/trailers/home/feeds/just_added.json";

#[derive(Debug, Deserialize)]
struct FeedEntry {
    location: String,
}

#[derive(Debug, Deserialize)]
struct PageData {
    page: PageInfo,
    #[serde(default)]
    clips: Vec<Clip>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    movie_title: String,
}

#[derive(Debug, Deserialize)]
struct Clip {
    title: String,
    #[serde(default)]
    versions: HashMap<String, ClipVersion>,
}

#[derive(Debug, Deserialize)]
struct ClipVersion {
    #[serde(default)]
    sizes: HashMap<String, ClipFile>,
}

#[derive(Debug, Deserialize)]
struct ClipFile {
    src: String,
}

/// Catalog backed by the Apple Trailers JSON endpoints.
pub struct AppleCatalog<C: HttpClient> {
    http_client: C,
    selection: Option<SelectionMode>,
}

impl<C: HttpClient> AppleCatalog<C> {
    pub fn new(http_client: C) -> Self {
        Self {
            http_client,
            selection: None,
        }
    }

    /// Report clips the batch will want but that lack the requested size
    /// as errors rather than debug noise.
    pub fn with_selection(mut self, selection: SelectionMode) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Page URLs listed in the Just Added feed.
    pub fn just_added_pages(&self) -> Result<Vec<String>, CatalogError> {
        let body = self.http_client.get(JUST_ADDED_URL)?;
        parse_feed(&body, JUST_ADDED_URL)
    }

    /// Candidates found on one movie page.
    pub fn page_candidates(
        &self,
        page_url: &str,
        resolution: Resolution,
    ) -> Result<Vec<Candidate>, CatalogError> {
        tracing::debug!("Checking for files at {}", page_url);
        let data_url = page_data_url(page_url);
        let body = self.http_client.get(&data_url)?;
        parse_page(&body, &data_url, resolution, self.selection)
    }
}

impl<C: HttpClient> CandidateSource for AppleCatalog<C> {
    fn list_candidates(
        &self,
        scope: &Scope,
        resolution: Resolution,
    ) -> Result<Vec<Candidate>, CatalogError> {
        match scope {
            Scope::Page(url) => self.page_candidates(url, resolution),
            Scope::JustAdded => {
                let mut candidates = Vec::new();
                for page_url in self.just_added_pages()? {
                    match self.page_candidates(&page_url, resolution) {
                        Ok(found) => candidates.extend(found),
                        Err(e) => tracing::error!("*** Skipping {}: {}", page_url, e),
                    }
                }
                Ok(candidates)
            }
        }
    }
}

/// URL of the JSON data behind a movie page.
pub fn page_data_url(page_url: &str) -> String {
    format!("{}/data/page.json", page_url.trim_end_matches('/'))
}

/// Rewrite a page-data `src` URL to the URL the file server answers to.
pub fn file_url_from_src(src: &str, resolution: Resolution) -> String {
    let res = resolution.as_str();
    src.replace(&format!("_{}p.mov", res), &format!("_h{}p.mov", res))
}

fn parse_feed(body: &[u8], url: &str) -> Result<Vec<String>, CatalogError> {
    let entries: Vec<FeedEntry> =
        serde_json::from_slice(body).map_err(|e| CatalogError::Parse {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    Ok(entries
        .into_iter()
        .map(|entry| format!("{}{}", TRAILERS_BASE_URL, entry.location))
        .collect())
}

fn parse_page(
    body: &[u8],
    url: &str,
    resolution: Resolution,
    selection: Option<SelectionMode>,
) -> Result<Vec<Candidate>, CatalogError> {
    let data: PageData = serde_json::from_slice(body).map_err(|e| CatalogError::Parse {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let title = data.page.movie_title;
    let mut candidates = Vec::new();

    for clip in data.clips {
        let file = clip
            .versions
            .get("enus")
            .and_then(|v| v.sizes.get(resolution.size_key()));

        match file {
            Some(file) => candidates.push(Candidate::new(
                title.clone(),
                clip.title,
                resolution,
                file_url_from_src(&file.src, resolution),
            )),
            None if missing_is_error(selection, &clip.title) => {
                tracing::error!("*** No {}p file found for {}", resolution, clip.title);
            }
            None => {
                tracing::debug!("*** No {}p file found for {}", resolution, clip.title);
            }
        }
    }

    Ok(candidates)
}

/// A missing size is an error only for a clip the batch would download.
fn missing_is_error(selection: Option<SelectionMode>, kind: &str) -> bool {
    selection.is_some_and(|mode| mode.selects(kind))
}
