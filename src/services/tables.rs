// src/services/tables.rs

//! Fetch-then-parse entry points for the three page types.

use scraper::Html;
use url::Url;

use crate::error::Result;
use crate::models::{Municipality, MunicipalityResult, TerritorialUnit};
use crate::services::fetcher::{FetchFailure, Fetched, PageFetcher};
use crate::services::{index, municipalities, results};
use crate::utils::table::TableSelectors;

/// Scrapes index, unit and results pages through a `PageFetcher`.
pub struct TableScraper<'a> {
    fetcher: &'a dyn PageFetcher,
    selectors: TableSelectors,
}

impl<'a> TableScraper<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher) -> Result<Self> {
        Ok(Self {
            fetcher,
            selectors: TableSelectors::new()?,
        })
    }

    /// Territorial units listed on the national index page.
    pub async fn territorial_units(&self, url: &str) -> Result<Fetched<Vec<TerritorialUnit>>> {
        let body = match self.load(url).await {
            Fetched::Loaded(body) => body,
            Fetched::Unavailable(failure) => return Ok(Fetched::Unavailable(failure)),
        };
        let base = Url::parse(url)?;
        let document = Html::parse_document(&body);
        Ok(Fetched::Loaded(index::parse_units(
            &document,
            &base,
            &self.selectors,
        )))
    }

    /// Municipalities listed on a unit page.
    pub async fn municipalities(&self, url: &str) -> Result<Fetched<Vec<Municipality>>> {
        let body = match self.load(url).await {
            Fetched::Loaded(body) => body,
            Fetched::Unavailable(failure) => return Ok(Fetched::Unavailable(failure)),
        };
        let base = Url::parse(url)?;
        let document = Html::parse_document(&body);
        Ok(Fetched::Loaded(municipalities::parse_municipalities(
            &document,
            &base,
            &self.selectors,
        )))
    }

    /// Turnout and party votes from a municipality results page.
    pub async fn municipality_result(&self, url: &str) -> Result<Fetched<MunicipalityResult>> {
        let body = match self.load(url).await {
            Fetched::Loaded(body) => body,
            Fetched::Unavailable(failure) => return Ok(Fetched::Unavailable(failure)),
        };
        let document = Html::parse_document(&body);
        results::parse_results(&document, url, &self.selectors).map(Fetched::Loaded)
    }

    /// Fetch a page body, turning bad statuses and transport errors into
    /// `Fetched::Unavailable`.
    async fn load(&self, url: &str) -> Fetched<String> {
        match self.fetcher.fetch(url).await {
            Ok(response) if response.is_success() => Fetched::Loaded(response.body),
            Ok(response) => {
                log::warn!("{url} answered with status {}", response.status);
                Fetched::Unavailable(FetchFailure::Status(response.status))
            }
            Err(e) => {
                log::warn!("Failed to fetch {url}: {e}");
                Fetched::Unavailable(FetchFailure::Transport(e.to_string()))
            }
        }
    }
}
