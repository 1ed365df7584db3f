//! Registry coordinator - the heart of load-order independence
//!
//! Generated fragments finish loading in arbitrary order, possibly before
//! the consuming renderer is ready. The coordinator reconciles the two
//! sides: submissions are forwarded when a consumer is installed and
//! buffered when it is not, so every mapping reaches the consumer exactly
//! once in submit order.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::core::errors::{RegistryError, Result};
use crate::coord::sink::MergeSink;
use crate::coord::types::FragmentMapping;

/// Coordinator state machine
///
/// Two states, one transition: `Unready` buffers submissions until the
/// first (and only) install switches to `Ready`, draining the buffer as
/// part of the transition. The buffer only exists while unready, so the
/// type rules out a populated buffer alongside an installed sink.
enum State {
    Unready { pending: Vec<FragmentMapping> },
    Ready { sink: Arc<dyn MergeSink> },
}

/// Coordinator between fragment producers and the single consumer
///
/// Clones share the same state; hand one clone to the fragment-loading
/// side and one to the renderer rather than going through a process-wide
/// global.
#[derive(Clone)]
pub struct RegistryCoordinator {
    state: Arc<Mutex<State>>,
}

impl RegistryCoordinator {
    /// Create a coordinator in the unready state with an empty buffer
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::Unready {
                pending: Vec::new(),
            })),
        }
    }

    /// Submit one fragment mapping
    ///
    /// Forwards the mapping synchronously to the installed sink, or
    /// appends it to the pending buffer when no sink is installed yet.
    /// Exactly one of the two happens per mapping; the operation cannot
    /// fail and a missing consumer is an expected state.
    pub fn submit(&self, mapping: FragmentMapping) {
        // Take the sink out of the lock before invoking it, so a sink
        // that submits re-entrantly sees a consistent coordinator.
        let sink = {
            let mut state = self.state.lock();
            match &mut *state {
                State::Unready { pending } => {
                    pending.push(mapping);
                    tracing::debug!(buffered = pending.len(), "no consumer yet, mapping buffered");
                    return;
                }
                State::Ready { sink } => sink.clone(),
            }
        };

        tracing::debug!(crates = mapping.len(), "forwarding mapping to consumer");
        sink.merge(mapping);
    }

    /// Install the consumer sink and drain the pending buffer
    ///
    /// The first call transitions the coordinator to ready: buffered
    /// mappings are delivered to the sink in original submit order, the
    /// buffer is cleared for the remainder of the process, and every
    /// later [`submit`](Self::submit) bypasses buffering. A second call
    /// is rejected with [`RegistryError::ConsumerInstalled`] and changes
    /// nothing - the protocol is built for single-consumer pages.
    pub fn install(&self, sink: Arc<dyn MergeSink>) -> Result<()> {
        let pending = {
            let mut state = self.state.lock();
            if let State::Ready { .. } = *state {
                tracing::warn!("rejecting second consumer install");
                return Err(RegistryError::ConsumerInstalled);
            }
            match std::mem::replace(&mut *state, State::Ready { sink: sink.clone() }) {
                State::Unready { pending } => pending,
                State::Ready { .. } => unreachable!("checked above"),
            }
        };

        tracing::info!(drained = pending.len(), "consumer installed, draining buffer");
        if !pending.is_empty() {
            sink.merge_batch(pending);
        }
        Ok(())
    }

    /// Whether a consumer has been installed
    pub fn is_ready(&self) -> bool {
        matches!(*self.state.lock(), State::Ready { .. })
    }

    /// Number of mappings currently buffered
    ///
    /// Always zero once the coordinator is ready.
    pub fn pending_len(&self) -> usize {
        match &*self.state.lock() {
            State::Unready { pending } => pending.len(),
            State::Ready { .. } => 0,
        }
    }
}

impl Default for RegistryCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
