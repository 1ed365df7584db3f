//! Consumer side of the registration protocol
//!
//! A renderer announces readiness by installing a [`MergeSink`]; the sink's
//! merge logic is opaque to the coordinator. [`Registry`] is a ready-made
//! sink that accumulates deliveries for querying.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::coord::types::{FragmentMapping, ImplementorRecord};

/// Consumer callback invoked once per delivered mapping
///
/// Sinks never pull; the coordinator pushes mappings to them in submit
/// order. Implementations must not assume anything about key order within
/// a mapping, only about the order of mappings.
pub trait MergeSink: Send + Sync {
    /// Merge one fragment mapping into the consumer's live structure
    fn merge(&self, mapping: FragmentMapping);

    /// Merge a batch of mappings, preserving their order
    ///
    /// Used when the coordinator drains its pending buffer. The default
    /// forwards per mapping, which is observably identical to a bespoke
    /// batch merge as long as order is kept.
    fn merge_batch(&self, mappings: Vec<FragmentMapping>) {
        for mapping in mappings {
            self.merge(mapping);
        }
    }
}

impl<F> MergeSink for F
where
    F: Fn(FragmentMapping) + Send + Sync,
{
    fn merge(&self, mapping: FragmentMapping) {
        self(mapping)
    }
}

/// Accumulating registry of delivered implementor records
///
/// The simplest useful consumer: every delivered mapping extends the
/// per-crate record lists in delivery order. Clones share the same
/// underlying state.
#[derive(Clone, Default)]
pub struct Registry {
    records: Arc<RwLock<HashMap<String, Vec<ImplementorRecord>>>>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the accumulated records for a crate
    pub fn get(&self, crate_name: &str) -> Option<Vec<ImplementorRecord>> {
        let records = self.records.read();
        records.get(crate_name).cloned()
    }

    /// Check whether a crate has registered (possibly with zero records)
    pub fn contains(&self, crate_name: &str) -> bool {
        let records = self.records.read();
        records.contains_key(crate_name)
    }

    /// List all registered crate names
    pub fn crate_names(&self) -> Vec<String> {
        let records = self.records.read();
        records.keys().cloned().collect()
    }

    /// Number of registered crates
    pub fn len(&self) -> usize {
        let records = self.records.read();
        records.len()
    }

    /// Whether nothing has been delivered yet
    pub fn is_empty(&self) -> bool {
        let records = self.records.read();
        records.is_empty()
    }

    /// Snapshot the full accumulated state
    pub fn snapshot(&self) -> HashMap<String, Vec<ImplementorRecord>> {
        let records = self.records.read();
        records.clone()
    }
}

impl MergeSink for Registry {
    fn merge(&self, mapping: FragmentMapping) {
        let mut records = self.records.write();
        for (crate_name, contributed) in mapping.into_entries() {
            tracing::debug!(
                crate_name = %crate_name,
                count = contributed.len(),
                "merging implementor records"
            );
            records.entry(crate_name).or_default().extend(contributed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_registry_extends_per_crate() {
        let registry = Registry::new();
        registry.merge(
            FragmentMapping::new().with_entry("bytes", vec![ImplementorRecord::new("impl A")]),
        );
        registry.merge(
            FragmentMapping::new().with_entry("bytes", vec![ImplementorRecord::new("impl B")]),
        );

        let accumulated = registry.get("bytes").unwrap();
        assert_eq!(accumulated.len(), 2);
        assert_eq!(accumulated[0].text, "impl A");
        assert_eq!(accumulated[1].text, "impl B");
    }

    #[test]
    fn test_registry_keeps_empty_contributions() {
        let registry = Registry::new();
        registry.merge(FragmentMapping::new().with_entry("futures", Vec::new()));
        assert!(registry.contains("futures"));
        assert_eq!(registry.get("futures").unwrap().len(), 0);
    }

    #[test]
    fn test_closure_sink() {
        let delivered = Arc::new(RwLock::new(Vec::new()));
        let seen = delivered.clone();
        let sink = move |mapping: FragmentMapping| {
            seen.write().push(mapping);
        };
        sink.merge(FragmentMapping::new().with_entry("syn", Vec::new()));
        assert_eq!(delivered.read().len(), 1);
    }
}
