// src/utils/table.rs

//! Positional access to HTML tables.
//!
//! Rows are every `tr` below a table and cells are every `td` below a row,
//! so header rows built from `th` still count towards the rows skipped by
//! callers.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::utils::resolve_url;

/// Compiled selectors for walking tables.
pub struct TableSelectors {
    table: Selector,
    row: Selector,
    cell: Selector,
    link: Selector,
}

impl TableSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            table: parse_selector("table")?,
            row: parse_selector("tr")?,
            cell: parse_selector("td")?,
            link: parse_selector("a[href]")?,
        })
    }

    /// All tables of the document, in document order.
    pub fn tables<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document.select(&self.table).collect()
    }

    /// Rows of a table after the first `skip`.
    pub fn rows_after<'a>(&self, table: ElementRef<'a>, skip: usize) -> Vec<ElementRef<'a>> {
        table.select(&self.row).skip(skip).collect()
    }

    /// Row at a zero-based index.
    pub fn row<'a>(&self, table: ElementRef<'a>, index: usize) -> Option<ElementRef<'a>> {
        table.select(&self.row).nth(index)
    }

    /// Data cells of a row.
    pub fn cells<'a>(&self, row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        row.select(&self.cell).collect()
    }

    /// First link inside a cell, resolved against the page URL.
    pub fn link(&self, cell: ElementRef<'_>, base: &Url) -> Option<String> {
        cell.select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| resolve_url(base, href))
    }
}

/// Text of an element with each text node trimmed and blanks dropped.
pub fn cell_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
