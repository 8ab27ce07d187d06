// src/services/results.rs

//! Municipality results page.
//!
//! The first table carries the turnout aggregates. The second and third hold
//! the parties, split in two halves, each closed by a row of dashes.

use std::ops::Range;

use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::{ENVELOPES_ISSUED, MunicipalityResult, VALID_VOTES, VOTERS_REGISTERED};
use crate::utils::strip_nbsp;
use crate::utils::table::{TableSelectors, cell_text};

/// Table holding the turnout aggregates.
pub const TURNOUT_TABLE: usize = 0;
/// Row of the turnout table with the figures.
pub const AGGREGATE_ROW_INDEX: usize = 2;
/// Registered voters column.
pub const VOTERS_COL: usize = 3;
/// Issued envelopes column.
pub const ENVELOPES_COL: usize = 4;
/// Valid votes column.
pub const VALID_VOTES_COL: usize = 7;

/// Tables listing party votes.
pub const PARTY_TABLES: Range<usize> = 1..3;
/// Header rows at the top of each party table.
pub const PARTY_HEADER_ROWS: usize = 2;
/// Party number column, used to recognise sentinel rows.
pub const PARTY_NUMBER_COL: usize = 0;
/// Party name column.
pub const PARTY_NAME_COL: usize = 1;
/// Party vote count column.
pub const PARTY_VOTES_COL: usize = 2;

/// Extract turnout aggregates and party votes from a results page.
///
/// A page without the turnout row is a layout error. Party rows that are
/// too short or whose number cell only holds dashes are skipped. A party
/// listed twice keeps its position and takes the later vote count.
pub fn parse_results(
    document: &Html,
    url: &str,
    selectors: &TableSelectors,
) -> Result<MunicipalityResult> {
    let tables = selectors.tables(document);
    let mut result = MunicipalityResult::new();

    let turnout = tables
        .get(TURNOUT_TABLE)
        .copied()
        .ok_or_else(|| AppError::layout(url, "no turnout table"))?;
    let row = selectors
        .row(turnout, AGGREGATE_ROW_INDEX)
        .ok_or_else(|| AppError::layout(url, "turnout table has no aggregate row"))?;
    let cells = selectors.cells(row);
    if cells.len() <= VALID_VOTES_COL {
        return Err(AppError::layout(
            url,
            format!("aggregate row has {} cells", cells.len()),
        ));
    }

    result.insert(VOTERS_REGISTERED, strip_nbsp(&cell_text(cells[VOTERS_COL])));
    result.insert(ENVELOPES_ISSUED, strip_nbsp(&cell_text(cells[ENVELOPES_COL])));
    result.insert(VALID_VOTES, strip_nbsp(&cell_text(cells[VALID_VOTES_COL])));

    for table in tables.iter().skip(PARTY_TABLES.start).take(PARTY_TABLES.len()) {
        for row in selectors.rows_after(*table, PARTY_HEADER_ROWS) {
            let cells = selectors.cells(row);
            if is_sentinel(&cells.first().map(|c| cell_text(*c)).unwrap_or_default()) {
                continue;
            }
            if cells.len() <= PARTY_VOTES_COL {
                log::debug!("Skipping party row with {} cells at {url}", cells.len());
                continue;
            }

            let party = cell_text(cells[PARTY_NAME_COL]);
            let votes = strip_nbsp(&cell_text(cells[PARTY_VOTES_COL]));
            result.insert(party, votes);
        }
    }

    Ok(result)
}

/// A number cell reading as nothing once dashes are removed.
fn is_sentinel(number: &str) -> bool {
    number.chars().all(|c| c == '-')
}
