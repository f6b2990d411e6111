//! Inlines remote images as base64 data URIs.
//!
//! Upstream pages reference cover and page images by URL; the scrapers
//! re-encode each one inline so the response is self-contained. A failed
//! fetch falls back to the original URL string so a single broken image
//! never aborts the record it belongs to.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::warn;
use reqwest::Client;

/// Resolve a possibly site-relative image reference against the site origin.
pub fn absolute_image_url(origin: &str, url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{}{}", origin, url)
    }
}

/// Encode raw bytes as a JPEG data URI.
///
/// The MIME label is always `image/jpeg` regardless of what the upstream
/// actually served; the original contract does the same.
pub fn data_uri(bytes: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", BASE64.encode(bytes))
}

/// Fetch an image and return it as a data URI.
///
/// On any failure (network error, non-2xx) the input is returned
/// unchanged and the failure is logged. Single attempt, no retry.
pub async fn to_inline_image(client: &Client, origin: &str, url: &str) -> String {
    if url.is_empty() {
        // nothing to fetch for a missing src
        return String::new();
    }
    let full_url = absolute_image_url(origin, url);
    match fetch_bytes(client, &full_url).await {
        Ok(bytes) => data_uri(&bytes),
        Err(e) => {
            warn!("Error fetching image {}: {}", full_url, e);
            url.to_string()
        }
    }
}

async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://komiku.id";

    #[test]
    fn test_relative_url_is_prefixed() {
        assert_eq!(
            absolute_image_url(ORIGIN, "/img/cover.jpg"),
            "https://komiku.id/img/cover.jpg"
        );
    }

    #[test]
    fn test_absolute_url_is_untouched() {
        assert_eq!(
            absolute_image_url(ORIGIN, "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_data_uri_format() {
        // "hi" => aGk=
        assert_eq!(data_uri(b"hi"), "data:image/jpeg;base64,aGk=");
    }

    #[tokio::test]
    async fn test_empty_src_stays_empty() {
        let client = Client::new();
        assert_eq!(to_inline_image(&client, ORIGIN, "").await, "");
    }
}
