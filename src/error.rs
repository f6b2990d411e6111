use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the detail and chapter scrapers.
///
/// Listing and search swallow their upstream failures and return an empty
/// result set instead, so this type never reaches those paths. Image
/// fetches degrade to the original URL and never construct one either.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream returned {status} for {url}")]
    Status { url: String, status: StatusCode },
}
