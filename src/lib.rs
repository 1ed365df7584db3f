// Core infrastructure modules
pub mod core {
    pub mod errors;
}

// Protocol components
pub mod coord; // Registry coordination between fragments and the consumer
pub mod fragment; // Fragment loader invocation

// Re-exports for convenience
pub use crate::core::errors::{RegistryError, Result};
pub use coord::{FragmentMapping, ImplementorRecord, MergeSink, Registry, RegistryCoordinator};
pub use fragment::Fragment;
