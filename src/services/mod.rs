//! Service layer for the scraper.
//!
//! This module contains:
//! - Page fetching (`PageFetcher`, `HttpFetcher`)
//! - Positional table extraction per page type (`index`, `municipalities`, `results`)
//! - Fetch-then-parse entry points (`TableScraper`)

pub mod fetcher;
pub mod index;
pub mod municipalities;
pub mod results;
mod tables;

pub use fetcher::{FetchFailure, FetchResponse, Fetched, HttpFetcher, PageFetcher};
pub use tables::TableScraper;
