//! Trailer discovery.
//!
//! Turns a [`Scope`] (the "Just Added" feed or one movie page) into the list
//! of [`Candidate`] videos the batch downloader works through.
//!
//! ```ignore
//! use trailerfetch::catalog::{AppleCatalog, CandidateSource, ReqwestClient, Resolution, Scope};
//!
//! let catalog = AppleCatalog::new(ReqwestClient::new()?);
//! let candidates = catalog.list_candidates(&Scope::JustAdded, Resolution::Hd720)?;
//! ```

mod apple;
mod http;
mod types;

pub use apple::{file_url_from_src, page_data_url, AppleCatalog, JUST_ADDED_URL, TRAILERS_BASE_URL};
pub use http::{HttpClient, ReqwestClient};
pub use types::{Candidate, CandidateSource, CatalogError, ParseResolutionError, Resolution, Scope};
