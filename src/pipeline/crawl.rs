// src/pipeline/crawl.rs

//! Unit → municipalities → results crawl.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::{CrawlOutcome, CrawlerConfig, Municipality, OutputRecord};
use crate::services::{Fetched, TableScraper};

/// Crawl every municipality of a unit, one page at a time.
///
/// An empty or unavailable municipality list is fatal. An unavailable
/// results page leaves its municipality with identity fields only.
pub async fn run_crawler(
    config: &CrawlerConfig,
    scraper: &TableScraper<'_>,
    unit_url: &str,
) -> Result<CrawlOutcome> {
    let municipalities = match scraper.municipalities(unit_url).await? {
        Fetched::Loaded(list) if !list.is_empty() => list,
        Fetched::Loaded(_) => {
            return Err(AppError::crawl(unit_url, "no municipalities found on unit page"));
        }
        Fetched::Unavailable(failure) => {
            return Err(AppError::crawl(
                unit_url,
                format!("failed to load municipality list: {failure}"),
            ));
        }
    };

    let municipalities = dedupe_by_code(municipalities);
    log::info!("Found {} municipalities", municipalities.len());

    let delay = Duration::from_millis(config.request_delay_ms);
    let mut outcome = CrawlOutcome {
        municipality_total: municipalities.len(),
        ..CrawlOutcome::default()
    };

    for (i, municipality) in municipalities.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        log::debug!(
            "[{}/{}] {} {}",
            i + 1,
            municipalities.len(),
            municipality.code,
            municipality.name
        );

        let result = scraper.municipality_result(&municipality.url).await?;
        if let Some(failure) = result.failure() {
            outcome.detail_failures += 1;
            log::warn!(
                "No results for {} ({}): {}",
                municipality.name,
                municipality.code,
                failure
            );
        }

        outcome
            .records
            .push(OutputRecord::new(municipality, result.into_data()));
    }

    Ok(outcome)
}

/// Keep the first occurrence of every municipality code.
fn dedupe_by_code(municipalities: Vec<Municipality>) -> Vec<Municipality> {
    let mut seen = HashSet::new();
    municipalities
        .into_iter()
        .filter(|m| {
            let fresh = seen.insert(m.code.clone());
            if !fresh {
                log::debug!("Skipping repeated municipality code {}", m.code);
            }
            fresh
        })
        .collect()
}
