//! Cooperative stop signal for a running simulation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cloneable handle that asks a [`Sim`][crate::Sim] to stop.
///
/// The flag is read between ticks only; a tick that has started always
/// finishes.  Obtain one with [`Sim::stop_handle`][crate::Sim::stop_handle]
/// and move it to another thread or into an observer.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the run stop before its next tick.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear a previous request so `run` can be resumed.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}
