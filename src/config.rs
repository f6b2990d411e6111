use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Port the HTTP server binds to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin serving manga pages, chapter pages and images
    #[serde(default = "default_site_origin")]
    pub site_origin: String,

    /// Origin serving the listing and search endpoints
    #[serde(default = "default_api_origin")]
    pub api_origin: String,

    /// TTL for cached listing/search results in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Number of entries per listing page
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,

    /// Timeout for upstream HTTP requests in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 { 3000 }
fn default_site_origin() -> String { "https://komiku.id".to_string() }
fn default_api_origin() -> String { "https://api.komiku.id".to_string() }
fn default_cache_ttl() -> u64 { 3600 }
fn default_page_limit() -> usize { 12 }
fn default_timeout() -> u64 { 10 }

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            site_origin: default_site_origin(),
            api_origin: default_api_origin(),
            cache_ttl_secs: default_cache_ttl(),
            page_limit: default_page_limit(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(cfg) = toml::from_str::<Config>(&content) {
                    return cfg;
                }
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.site_origin, "https://komiku.id");
        assert_eq!(cfg.api_origin, "https://api.komiku.id");
        assert_eq!(cfg.cache_ttl_secs, 3600);
        assert_eq!(cfg.page_limit, 12);
        assert_eq!(cfg.timeout_secs, 10);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let cfg: Config = toml::from_str("port = 8080\npage_limit = 24\n").unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.page_limit, 24);
        assert_eq!(cfg.site_origin, "https://komiku.id");
        assert_eq!(cfg.cache_ttl_secs, 3600);
    }
}
