// src/models/territory.rs

//! Territorial units and municipalities discovered while navigating.

/// A region or district listed on the national index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerritorialUnit {
    /// Display name (e.g., "Benešov")
    pub name: String,

    /// Absolute URL of the unit's municipality listing
    pub url: String,
}

/// A municipality listed on a unit page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Municipality {
    /// Municipal identifier from the first column, never empty
    pub code: String,

    /// Display name
    pub name: String,

    /// Absolute URL of the municipality's results page
    pub url: String,
}
