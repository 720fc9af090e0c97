use std::any::Any;

use crate::common::types::Savepoint;
use crate::resource::manager::ResourceError;

/// Per-participant transaction handle, returned by a resource manager's
/// begin and handed back to the same manager for commit or rollback.
///
/// The handle is opaque to the coordinator: status queries and savepoint
/// operations are the only surface the aggregate touches. Adapters recover
/// their concrete handle type through `as_any_mut`.
pub trait TransactionHandle: Send {
    /// Whether this handle represents a transaction newly opened by begin
    fn is_new_transaction(&self) -> bool;

    /// Whether the transaction has been marked rollback-only
    fn is_rollback_only(&self) -> bool;

    /// Force the transaction toward rollback
    fn set_rollback_only(&mut self);

    /// Whether the transaction has completed (committed or rolled back)
    fn is_completed(&self) -> bool;

    /// Whether an unreleased savepoint is open on this transaction
    fn has_savepoint(&self) -> bool {
        false
    }

    /// Flush pending work to the underlying resource
    fn flush(&mut self) -> Result<(), ResourceError> {
        Ok(())
    }

    /// Create a savepoint inside this transaction.
    ///
    /// Resources without savepoint support keep the default body.
    fn create_savepoint(&mut self) -> Result<Savepoint, ResourceError> {
        Err(ResourceError::SavepointsUnsupported)
    }

    /// Roll the transaction back to a previously created savepoint
    fn rollback_to_savepoint(&mut self, _savepoint: &Savepoint) -> Result<(), ResourceError> {
        Err(ResourceError::SavepointsUnsupported)
    }

    /// Release a previously created savepoint
    fn release_savepoint(&mut self, _savepoint: &Savepoint) -> Result<(), ResourceError> {
        Err(ResourceError::SavepointsUnsupported)
    }

    /// Downcast support for resource manager adapters
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
