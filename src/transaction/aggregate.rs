use linked_hash_map::LinkedHashMap;

use crate::common::types::ParticipantName;
use crate::resource::definition::TransactionDefinition;
use crate::resource::handle::TransactionHandle;
use crate::resource::manager::{ResourceError, ResourceManager};
use crate::transaction::savepoint::SavepointSet;

/// Per-transaction aggregate: one handle per participant for exactly one
/// begin -> (commit | rollback) cycle.
///
/// Handles are kept in registration order, which is the order participants
/// were supplied to the coordinator. The first-registered participant is the
/// primary one; transaction-level status queries delegate to its handle
/// alone. The coordinator consumes the aggregate on commit or rollback, so
/// exactly one of the two ever runs, exactly once.
pub struct TransactionAggregate {
    /// Name of the primary (first-registered) participant
    primary: ParticipantName,

    /// Participant name -> transaction handle, in registration order
    handles: LinkedHashMap<ParticipantName, Box<dyn TransactionHandle>>,

    /// Whether this aggregate activated the synchronization context and
    /// therefore must clear it on completion
    owns_synchronization: bool,
}

impl TransactionAggregate {
    pub(crate) fn new(primary: &str) -> Self {
        Self {
            primary: primary.to_string(),
            handles: LinkedHashMap::new(),
            owns_synchronization: false,
        }
    }

    pub(crate) fn set_owns_synchronization(&mut self) {
        self.owns_synchronization = true;
    }

    /// Whether this aggregate owns the synchronization context
    pub fn owns_synchronization(&self) -> bool {
        self.owns_synchronization
    }

    /// Begin a sub-transaction on the participant and store its handle
    pub(crate) fn register_participant(
        &mut self,
        definition: &TransactionDefinition,
        participant: &dyn ResourceManager,
    ) -> Result<(), ResourceError> {
        let handle = participant.begin(definition)?;
        self.handles.insert(participant.name().to_string(), handle);
        Ok(())
    }

    /// Commit the participant's sub-transaction; coordinator use only
    pub(crate) fn commit_participant(
        &mut self,
        participant: &dyn ResourceManager,
    ) -> Result<(), ResourceError> {
        let handle = self.handle_for(participant.name())?;
        participant.commit(handle)
    }

    /// Roll back the participant's sub-transaction; coordinator use only
    pub(crate) fn rollback_participant(
        &mut self,
        participant: &dyn ResourceManager,
    ) -> Result<(), ResourceError> {
        let handle = self.handle_for(participant.name())?;
        participant.rollback(handle)
    }

    fn handle_for(&mut self, name: &str) -> Result<&mut dyn TransactionHandle, ResourceError> {
        match self.handles.get_mut(name) {
            Some(handle) => Ok(handle.as_mut()),
            None => Err(ResourceError::Internal(format!(
                "no transaction handle registered for participant '{}'",
                name
            ))),
        }
    }

    fn primary_handle(&self) -> &dyn TransactionHandle {
        self.handles
            .get(&self.primary)
            .expect("primary participant is registered at begin")
            .as_ref()
    }

    /// Names of the registered participants, in registration order
    pub fn participant_names(&self) -> impl Iterator<Item = &str> {
        self.handles.keys().map(|name| name.as_str())
    }

    /// Borrow the handle registered for a participant
    pub fn handle(&self, name: &str) -> Option<&dyn TransactionHandle> {
        self.handles.get(name).map(|handle| handle.as_ref())
    }

    /// Mutably borrow the handle registered for a participant, so the caller
    /// can perform its unit of work against that resource directly
    pub fn handle_mut(&mut self, name: &str) -> Option<&mut (dyn TransactionHandle + '_)> {
        match self.handles.get_mut(name) {
            Some(handle) => Some(handle.as_mut()),
            None => None,
        }
    }

    /// Flush every participant's pending work
    pub fn flush(&mut self) -> Result<(), ResourceError> {
        for (_, handle) in self.handles.iter_mut() {
            handle.flush()?;
        }
        Ok(())
    }

    /// Whether the transaction is marked rollback-only, per the primary
    /// participant
    pub fn is_rollback_only(&self) -> bool {
        self.primary_handle().is_rollback_only()
    }

    /// Whether the transaction has completed, per the primary participant
    pub fn is_completed(&self) -> bool {
        self.primary_handle().is_completed()
    }

    /// Whether this is a newly opened transaction, per the primary
    /// participant
    pub fn is_new_transaction(&self) -> bool {
        self.primary_handle().is_new_transaction()
    }

    /// Whether a savepoint is open, per the primary participant
    pub fn has_savepoint(&self) -> bool {
        self.primary_handle().has_savepoint()
    }

    /// Mark every participant rollback-only, so any one of them can force
    /// the whole chain toward rollback
    pub fn set_rollback_only(&mut self) {
        for (_, handle) in self.handles.iter_mut() {
            handle.set_rollback_only();
        }
    }

    /// Create a savepoint on every participant.
    ///
    /// If creation fails partway, savepoints already created on earlier
    /// participants are left in place and the failure propagates.
    pub fn create_savepoint(&mut self) -> Result<SavepointSet, ResourceError> {
        let mut savepoints = SavepointSet::new();
        for (name, handle) in self.handles.iter_mut() {
            let savepoint = handle.create_savepoint()?;
            savepoints.save(name, savepoint);
        }
        Ok(savepoints)
    }

    /// Roll every participant back to its token from the savepoint set
    pub fn rollback_to_savepoint(&mut self, savepoints: &SavepointSet) -> Result<(), ResourceError> {
        for (name, savepoint) in savepoints.iter() {
            let handle = self.handle_for(name)?;
            handle.rollback_to_savepoint(savepoint)?;
        }
        Ok(())
    }

    /// Release every participant's token from the savepoint set
    pub fn release_savepoint(&mut self, savepoints: &SavepointSet) -> Result<(), ResourceError> {
        for (name, savepoint) in savepoints.iter() {
            let handle = self.handle_for(name)?;
            handle.release_savepoint(savepoint)?;
        }
        Ok(())
    }
}
