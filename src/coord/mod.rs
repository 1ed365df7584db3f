//! Load-order-independent registration of implementor data
//!
//! Fragments submit mappings as they load; the coordinator buffers them
//! until a consumer installs, then forwards everything in arrival order.

pub mod coordinator;
pub mod sink;
pub mod types;

pub use coordinator::*;
pub use sink::*;
pub use types::*;
