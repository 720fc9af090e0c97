// Resource manager seam - the capability surface every participant exposes

pub mod definition;
pub mod handle;
pub mod manager;

// Public exports
pub use definition::{IsolationLevel, Propagation, TransactionDefinition};
pub use handle::TransactionHandle;
pub use manager::{ResourceError, ResourceManager};
