// src/services/index.rs

//! National index page: one table per region, one row per territorial unit.

use scraper::Html;
use url::Url;

use crate::models::TerritorialUnit;
use crate::utils::table::{TableSelectors, cell_text};

/// Header rows at the top of every table.
pub const HEADER_ROWS: usize = 2;
/// Column holding the unit name.
pub const NAME_COL: usize = 1;
/// Column holding the link to the unit's municipality listing.
pub const LINK_COL: usize = 3;

/// Extract every navigable territorial unit from the index page.
///
/// Rows without a link in the link column are aggregate rows and yield nothing.
pub fn parse_units(document: &Html, base: &Url, selectors: &TableSelectors) -> Vec<TerritorialUnit> {
    let mut units = Vec::new();

    for table in selectors.tables(document) {
        for row in selectors.rows_after(table, HEADER_ROWS) {
            let cells = selectors.cells(row);
            if cells.len() <= LINK_COL {
                log::debug!("Skipping index row with {} cells", cells.len());
                continue;
            }

            if let Some(url) = selectors.link(cells[LINK_COL], base) {
                units.push(TerritorialUnit {
                    name: cell_text(cells[NAME_COL]),
                    url,
                });
            }
        }
    }

    units
}
