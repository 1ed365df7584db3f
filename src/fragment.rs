//! Fragment loader side of the registration protocol
//!
//! Each generated data file covers one trait and lists, per contributing
//! crate, the implementors of that trait. A [`Fragment`] carries that
//! embedded data; registering it builds a fresh [`FragmentMapping`] and
//! hands it to the coordinator. Fragments have no external inputs and no
//! failure modes - the data is compiled in by the generator.

use std::collections::HashMap;

use crate::coord::coordinator::RegistryCoordinator;
use crate::coord::types::{FragmentMapping, ImplementorRecord};
use crate::core::errors::{RegistryError, Result};

/// One independently loaded unit of generated implementor data
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    /// Path of the trait this fragment covers, e.g. `futures/sink/trait.Sink`
    trait_path: String,
    /// Per-crate implementor listings, in generator emission order
    entries: Vec<(String, Vec<ImplementorRecord>)>,
}

impl Fragment {
    /// Create an empty fragment for a trait
    pub fn new(trait_path: impl Into<String>) -> Self {
        Self {
            trait_path: trait_path.into(),
            entries: Vec::new(),
        }
    }

    /// Add the implementors contributed by one crate
    ///
    /// An empty record list is meaningful: the crate declares that it has
    /// no implementors for this trait. A repeated crate name replaces the
    /// earlier listing, since mapping keys are unique.
    pub fn with_implementors(
        mut self,
        crate_name: impl Into<String>,
        records: Vec<ImplementorRecord>,
    ) -> Self {
        self.entries.push((crate_name.into(), records));
        self
    }

    /// Decode a fragment from a generated JSON payload
    ///
    /// The payload is the object literal embedded in the generated data
    /// file: crate name to record list, records shaped
    /// `{"text": ..., "synthetic": ..., "types": [...]}`.
    pub fn from_json(trait_path: impl Into<String>, payload: &str) -> Result<Self> {
        let trait_path = trait_path.into();
        let entries: HashMap<String, Vec<ImplementorRecord>> = serde_json::from_str(payload)
            .map_err(|e| RegistryError::payload(trait_path.clone(), e))?;
        Ok(Self {
            trait_path,
            entries: entries.into_iter().collect(),
        })
    }

    /// Path of the trait this fragment covers
    pub fn trait_path(&self) -> &str {
        &self.trait_path
    }

    /// Build the mapping this fragment contributes
    pub fn mapping(&self) -> FragmentMapping {
        self.entries
            .iter()
            .map(|(name, records)| (name.clone(), records.clone()))
            .collect()
    }

    /// Register this fragment's data with a coordinator
    ///
    /// Builds the mapping and submits it; ownership of the mapping moves
    /// to the coordinator. Runs once per fragment by construction of the
    /// hosting environment - re-registration is not guarded against.
    pub fn register(&self, coordinator: &RegistryCoordinator) {
        tracing::debug!(
            trait_path = %self.trait_path,
            crates = self.entries.len(),
            "registering fragment"
        );
        coordinator.submit(self.mapping());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fragment_builds_mapping() {
        let fragment = Fragment::new("core/iter/traits/trait.Extend")
            .with_implementors("bytes", vec![ImplementorRecord::new("impl Extend<u8> for Bytes")])
            .with_implementors("smallvec", Vec::new());

        let mapping = fragment.mapping();
        assert_eq!(mapping.len(), 2);
        assert_eq!(
            mapping.get("bytes").unwrap()[0].text,
            "impl Extend<u8> for Bytes"
        );
        assert!(mapping.get("smallvec").unwrap().is_empty());
    }

    #[test]
    fn test_from_json_accepts_generator_payload() {
        let payload = r#"{
            "futures": [],
            "tokio_udp": [
                {"text": "impl<C: Encoder> Sink for UdpFramed<C>",
                 "synthetic": false,
                 "types": ["tokio_udp::frame::UdpFramed"]}
            ]
        }"#;

        let fragment = Fragment::from_json("futures/sink/trait.Sink", payload).unwrap();
        let mapping = fragment.mapping();
        assert!(mapping.get("futures").unwrap().is_empty());
        assert_eq!(
            mapping.get("tokio_udp").unwrap()[0].types,
            vec!["tokio_udp::frame::UdpFramed".to_string()]
        );
    }

    #[test]
    fn test_from_json_rejects_malformed_payload() {
        let err = Fragment::from_json("futures/sink/trait.Sink", "not an object").unwrap_err();
        assert!(matches!(err, RegistryError::Payload { .. }));
    }
}
