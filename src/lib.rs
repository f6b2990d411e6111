// Library interface for komiku_scraper
// This allows tests and the server binary to use the scraper components

pub mod app_state;
pub mod cache;
pub mod config;
pub mod error;
pub mod image;
pub mod komiku;
pub mod models;
