//! Tracks whether the screen owning a container is still on screen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "is this screen still mounted" flag.
///
/// In-flight requests are never aborted; a container checks the guard before
/// committing a response and drops the commit once the screen is gone.
#[derive(Debug, Clone)]
pub struct MountGuard {
    mounted: Arc<AtomicBool>,
}

impl MountGuard {
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Mark the screen gone. Every clone observes it.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}
