// src/models/mod.rs

//! Domain models for the scraper.

mod config;
mod record;
mod territory;

// Re-export all public types
pub use config::{Config, CrawlerConfig, HeaderPolicy, OutputConfig, SourceConfig};
pub use record::{
    CODE_FIELD, ENVELOPES_ISSUED, FieldMap, MunicipalityResult, NAME_FIELD, OutputRecord,
    VALID_VOTES, VOTERS_REGISTERED,
};
pub use territory::{Municipality, TerritorialUnit};

/// Summary of a crawl run.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    pub records: Vec<OutputRecord>,
    pub municipality_total: usize,
    pub detail_failures: usize,
}
