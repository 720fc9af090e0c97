use thiserror::Error;

use crate::resource::definition::TransactionDefinition;
use crate::resource::handle::TransactionHandle;

/// Errors raised by a resource manager or its transaction handles
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("failed to begin transaction: {0}")]
    BeginFailed(String),

    #[error("commit failed: {0}")]
    CommitFailed(String),

    #[error("rollback failed: {0}")]
    RollbackFailed(String),

    #[error("savepoints are not supported by this resource")]
    SavepointsUnsupported,

    #[error("savepoint token does not belong to this transaction")]
    InvalidSavepoint,

    #[error("transaction handle was not created by this resource manager")]
    ForeignHandle,

    #[error("transaction handle is already completed")]
    HandleCompleted,

    #[error("internal resource error: {0}")]
    Internal(String),
}

/// Result type for resource manager operations
pub type Result<T> = std::result::Result<T, ResourceError>;

/// One independently transactional subsystem coordinated by the chain.
///
/// A SQL datastore, a message broker and a distributed-transaction adapter
/// each supply one implementation; the coordinator treats them uniformly.
/// Names identify participants in logs and failures and must be unique
/// within one coordinator.
pub trait ResourceManager: Send + Sync {
    /// Stable participant name
    fn name(&self) -> &str;

    /// Open a sub-transaction on this resource
    fn begin(&self, definition: &TransactionDefinition) -> Result<Box<dyn TransactionHandle>>;

    /// Commit the sub-transaction behind the handle
    fn commit(&self, handle: &mut dyn TransactionHandle) -> Result<()>;

    /// Roll back the sub-transaction behind the handle
    fn rollback(&self, handle: &mut dyn TransactionHandle) -> Result<()>;
}
