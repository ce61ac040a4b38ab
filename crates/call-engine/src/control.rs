//! Process-wide control flags
//!
//! Signal listeners set the flags; the simulation polls them once per tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Flags {
    stop: AtomicBool,
    reload: AtomicBool,
}

/// Shared stop and reload requests
#[derive(Debug, Clone, Default)]
pub struct ControlFlags {
    inner: Arc<Flags>,
}

impl ControlFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the simulation to stop at the next tick
    pub fn request_stop(&self) {
        self.inner.stop.store(true, Ordering::SeqCst);
    }

    pub fn stop_requested(&self) -> bool {
        self.inner.stop.load(Ordering::SeqCst)
    }

    /// Flag that the configuration should be re-read
    pub fn request_reload(&self) {
        self.inner.reload.store(true, Ordering::SeqCst);
    }

    /// Consume a pending reload request
    pub fn take_reload(&self) -> bool {
        self.inner.reload.swap(false, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_shared() {
        let flags = ControlFlags::new();
        let handle = flags.clone();

        assert!(!flags.stop_requested());
        handle.request_stop();
        assert!(flags.stop_requested());

        handle.request_reload();
        assert!(flags.take_reload());
        assert!(!flags.take_reload());
    }
}
