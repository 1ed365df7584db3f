//! Core types for the registration protocol
//!
//! These mirror the shape of the generated data files: one record per
//! rendered impl, grouped per contributing crate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One implementor of a trait, as emitted by the documentation generator
///
/// The payload is opaque to this library: `text` is pre-rendered markup and
/// `types` carries the path(s) of the implementing type purely as ownership
/// tags. Records are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementorRecord {
    /// Rendered markup for the impl header
    pub text: String,
    /// Whether the impl was compiler-generated rather than written by hand
    #[serde(default)]
    pub synthetic: bool,
    /// Fully-qualified paths of the implementing types (non-unique tags)
    #[serde(default)]
    pub types: Vec<String>,
}

impl ImplementorRecord {
    /// Create a record with minimal fields
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            synthetic: false,
            types: Vec::new(),
        }
    }

    /// Mark the record as a synthetic impl
    pub fn with_synthetic(mut self, synthetic: bool) -> Self {
        self.synthetic = synthetic;
        self
    }

    /// Set the ownership tags
    pub fn with_types(mut self, types: Vec<String>) -> Self {
        self.types = types;
        self
    }
}

/// Mapping from crate name to the implementor records it contributes
///
/// Built fresh by each loaded fragment and moved into the coordinator on
/// submit; the fragment keeps no reference afterwards. Keys are unique and
/// unordered; the record sequence per key preserves generator order. An
/// empty record list is valid data - a crate can announce that it has no
/// implementors for the trait.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentMapping {
    entries: HashMap<String, Vec<ImplementorRecord>>,
}

impl FragmentMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the records contributed by one crate
    ///
    /// Replaces any previous entry for the same crate name.
    pub fn insert(&mut self, crate_name: impl Into<String>, records: Vec<ImplementorRecord>) {
        self.entries.insert(crate_name.into(), records);
    }

    /// Builder-style insert
    pub fn with_entry(
        mut self,
        crate_name: impl Into<String>,
        records: Vec<ImplementorRecord>,
    ) -> Self {
        self.insert(crate_name, records);
        self
    }

    /// Get the records contributed by a crate
    pub fn get(&self, crate_name: &str) -> Option<&[ImplementorRecord]> {
        self.entries.get(crate_name).map(Vec::as_slice)
    }

    /// Check whether a crate contributed an entry (possibly empty)
    pub fn contains(&self, crate_name: &str) -> bool {
        self.entries.contains_key(crate_name)
    }

    /// Number of contributing crates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries (key order is unspecified)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ImplementorRecord])> {
        self.entries
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// Consume the mapping into its entries
    pub fn into_entries(self) -> HashMap<String, Vec<ImplementorRecord>> {
        self.entries
    }
}

impl FromIterator<(String, Vec<ImplementorRecord>)> for FragmentMapping {
    fn from_iter<I: IntoIterator<Item = (String, Vec<ImplementorRecord>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
