use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

// Global registry instance using a thread-safe lazy initialization
static REGISTRY_INSTANCE: Lazy<Arc<ProcessSynchronizationRegistry>> =
    Lazy::new(|| Arc::new(ProcessSynchronizationRegistry::new()));

/// Tracks whether a transaction synchronization context is active.
///
/// The init/clear pairing is strictly nested: only the aggregate that found
/// the context inactive (and therefore initialized it) may clear it, so an
/// outer transactional scope never loses a context it still owns.
pub trait SynchronizationRegistry: Send + Sync {
    /// Activate the synchronization context
    fn init_synchronization(&self);

    /// Whether a synchronization context is currently active
    fn is_synchronization_active(&self) -> bool;

    /// Deactivate the synchronization context
    fn clear_synchronization(&self);
}

/// Default registry: one process-wide flag.
pub struct ProcessSynchronizationRegistry {
    active: Mutex<bool>,
}

impl ProcessSynchronizationRegistry {
    /// Get the global registry instance
    pub fn instance() -> Arc<ProcessSynchronizationRegistry> {
        REGISTRY_INSTANCE.clone()
    }

    /// Create an independent registry (primarily for testing and embedders
    /// that scope synchronization themselves)
    pub fn new() -> Self {
        Self {
            active: Mutex::new(false),
        }
    }
}

impl Default for ProcessSynchronizationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SynchronizationRegistry for ProcessSynchronizationRegistry {
    fn init_synchronization(&self) {
        *self.active.lock() = true;
    }

    fn is_synchronization_active(&self) -> bool {
        *self.active.lock()
    }

    fn clear_synchronization(&self) {
        *self.active.lock() = false;
    }
}
