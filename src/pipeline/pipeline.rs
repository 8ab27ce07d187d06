// src/pipeline/pipeline.rs

use std::path::Path;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, TerritorialUnit};
use crate::services::{PageFetcher, TableScraper};
use crate::storage::{CsvStorage, RecordStorage, WriteSummary};

use super::crawl::run_crawler;
use super::validate::validate_arguments;

/// What a full run produced.
#[derive(Debug)]
pub struct PipelineSummary {
    pub unit: TerritorialUnit,
    pub municipality_count: usize,
    pub detail_failures: usize,
    /// `None` when there was nothing to write
    pub written: Option<WriteSummary>,
}

/// Validate the arguments, crawl the unit and write its records.
pub async fn run_pipeline(
    config: &Config,
    fetcher: &dyn PageFetcher,
    unit_url: &str,
    output: &Path,
) -> Result<PipelineSummary> {
    let start_time = Utc::now();
    let scraper = TableScraper::new(fetcher)?;
    let storage = CsvStorage::new(output, &config.output)?;

    log::info!("Step 1/3: Checking arguments against {}", config.source.index_url);
    let args = validate_arguments(&scraper, &config.source.index_url, unit_url, output).await?;
    log::info!("Territorial unit: {}", args.unit.name);

    log::info!("Step 2/3: Crawling municipalities");
    let outcome = run_crawler(&config.crawler, &scraper, &args.unit.url).await?;

    log::info!("Step 3/3: Writing {}", args.output.display());
    let written = storage.write_records(&outcome.records).await?;

    let elapsed = Utc::now() - start_time;
    log::info!(
        "Crawled {} municipalities ({} without results) in {}s",
        outcome.municipality_total,
        outcome.detail_failures,
        elapsed.num_seconds()
    );

    Ok(PipelineSummary {
        unit: args.unit,
        municipality_count: outcome.municipality_total,
        detail_failures: outcome.detail_failures,
        written,
    })
}
