// src/models/record.rs

//! Per-municipality results and the flat records written to CSV.

use crate::models::Municipality;

/// Registered voters, from the turnout table.
pub const VOTERS_REGISTERED: &str = "voters_registered";
/// Envelopes handed out to voters.
pub const ENVELOPES_ISSUED: &str = "envelopes_issued";
/// Valid votes cast.
pub const VALID_VOTES: &str = "valid_votes";

/// Identity column holding the municipality code.
pub const CODE_FIELD: &str = "kod_obce";
/// Identity column holding the municipality name.
pub const NAME_FIELD: &str = "nazev";

/// String map that remembers insertion order.
///
/// Re-inserting a key replaces its value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the previous value if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Insert every field of `other`, in order.
    pub fn extend(&mut self, other: FieldMap) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Turnout aggregates and party votes of one municipality.
///
/// Empty when the results page could not be loaded.
pub type MunicipalityResult = FieldMap;

/// One CSV row: municipality identity followed by its results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    fields: FieldMap,
}

impl OutputRecord {
    /// Merge a municipality's identity with its scraped results.
    pub fn new(municipality: &Municipality, result: MunicipalityResult) -> Self {
        let mut fields = FieldMap::new();
        fields.insert(CODE_FIELD, municipality.code.as_str());
        fields.insert(NAME_FIELD, municipality.name.as_str());
        fields.extend(result);
        Self { fields }
    }

    pub fn code(&self) -> &str {
        self.fields.get(CODE_FIELD).unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.fields.get(NAME_FIELD).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys()
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// True when only the identity fields are present.
    pub fn is_identity_only(&self) -> bool {
        self.fields.len() == 2
    }
}
