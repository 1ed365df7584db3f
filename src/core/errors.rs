use thiserror::Error;

/// Unified error type for the implementor-registry library
///
/// The registration protocol itself is total: `submit` cannot fail and a
/// missing consumer is an ordinary state, not an error. Errors only arise
/// at the edges - installing a second consumer, or decoding a malformed
/// generated payload.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A consumer sink was already installed on this coordinator
    #[error("consumer already installed; the protocol supports a single consumer per process")]
    ConsumerInstalled,

    /// A generated fragment payload could not be decoded
    #[error("failed to decode fragment payload for `{trait_path}`")]
    Payload {
        trait_path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryError {
    /// Create a payload error for a fragment
    pub fn payload<S: Into<String>>(trait_path: S, source: serde_json::Error) -> Self {
        Self::Payload {
            trait_path: trait_path.into(),
            source,
        }
    }
}

/// Result type alias using RegistryError
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_error_display() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = RegistryError::payload("futures/sink/trait.Sink", source);
        assert!(err.to_string().contains("futures/sink/trait.Sink"));
    }

    #[test]
    fn test_consumer_installed_display() {
        let err = RegistryError::ConsumerInstalled;
        assert!(err.to_string().contains("single consumer"));
    }
}
