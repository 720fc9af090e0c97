// txchain - best-effort transaction chaining across independent resources

pub mod common;
pub mod resource;
pub mod transaction;

// Re-export key items for convenient access
pub use common::types::Savepoint;
pub use resource::definition::{IsolationLevel, Propagation, TransactionDefinition};
pub use resource::handle::TransactionHandle;
pub use resource::manager::{ResourceError, ResourceManager};
pub use transaction::aggregate::TransactionAggregate;
pub use transaction::coordinator::TransactionCoordinator;
pub use transaction::error::{ChainError, HeuristicOutcome};
pub use transaction::savepoint::SavepointSet;
pub use transaction::synchronization::{ProcessSynchronizationRegistry, SynchronizationRegistry};
