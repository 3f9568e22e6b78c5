use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared request to stop enumerating.
///
/// Clones observe the same flag, so a host can hand one to the batch and keep
/// another to trip it from elsewhere, e.g. a ctrl-c handler.
#[derive(Clone, Debug, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
