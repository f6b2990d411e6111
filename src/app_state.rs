//! Application state for the Actix-web server
//!
//! This module defines the shared state used across all HTTP handlers.
//! The `AppState` struct is wrapped in `web::Data` and provides access to
//! the HTTP client, the listing/search result cache, and configuration.

use crate::cache::TtlCache;
use crate::config::Config;
use crate::models::MangaSummary;
use reqwest::Client;

/// Shared application state for Actix-web handlers
///
/// One instance lives for the process lifetime. The cache is injected
/// here rather than being a module-level global so scrapers receive it
/// by reference.
pub struct AppState {
    /// Shared reqwest HTTP client
    pub client: Client,
    /// TTL cache for listing and search results
    pub cache: TtlCache<Vec<MangaSummary>>,
    /// Application configuration
    pub config: Config,
}
