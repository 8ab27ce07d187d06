// src/pipeline/validate.rs

//! Command-line input checks.
//!
//! The unit URL is checked against the live national index, so validation
//! costs one request.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::TerritorialUnit;
use crate::services::{Fetched, TableScraper};

/// Required suffix of the output file, compared case-insensitively.
pub const OUTPUT_SUFFIX: &str = ".csv";

/// Arguments that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedArgs {
    /// Unit matching the requested URL on the index page
    pub unit: TerritorialUnit,
    pub output: PathBuf,
}

/// Reject output files not ending in `.csv`.
pub fn validate_output_path(path: &Path) -> Result<()> {
    let name = path.to_string_lossy();
    if name.to_lowercase().ends_with(OUTPUT_SUFFIX) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "'{name}' is not a CSV file name (it must end with {OUTPUT_SUFFIX})"
        )))
    }
}

/// Find `unit_url` among the territorial units of the index page.
pub async fn validate_unit_url(
    scraper: &TableScraper<'_>,
    index_url: &str,
    unit_url: &str,
) -> Result<TerritorialUnit> {
    let units = match scraper.territorial_units(index_url).await? {
        Fetched::Loaded(units) => units,
        Fetched::Unavailable(failure) => {
            return Err(AppError::validation(format!(
                "cannot check '{unit_url}': index page {index_url} is unavailable ({failure})"
            )));
        }
    };
    log::debug!("Index page lists {} territorial units", units.len());

    units
        .into_iter()
        .find(|unit| unit.url == unit_url)
        .ok_or_else(|| {
            AppError::validation(format!(
                "'{unit_url}' is not a territorial unit URL listed on {index_url}"
            ))
        })
}

/// Run the output name check, then the index membership check.
pub async fn validate_arguments(
    scraper: &TableScraper<'_>,
    index_url: &str,
    unit_url: &str,
    output: &Path,
) -> Result<ValidatedArgs> {
    validate_output_path(output)?;
    let unit = validate_unit_url(scraper, index_url, unit_url).await?;

    Ok(ValidatedArgs {
        unit,
        output: output.to_path_buf(),
    })
}
