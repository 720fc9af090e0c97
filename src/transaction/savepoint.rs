use linked_hash_map::LinkedHashMap;

use crate::common::types::{ParticipantName, Savepoint};

/// One savepoint token per participant, captured in a single pass over the
/// chain and replayed by the aggregate's rollback-to/release operations.
///
/// Tokens are kept in registration order; each is opaque and only meaningful
/// to the handle that minted it.
pub struct SavepointSet {
    savepoints: LinkedHashMap<ParticipantName, Savepoint>,
}

impl SavepointSet {
    pub(crate) fn new() -> Self {
        Self {
            savepoints: LinkedHashMap::new(),
        }
    }

    pub(crate) fn save(&mut self, participant: &str, savepoint: Savepoint) {
        self.savepoints.insert(participant.to_string(), savepoint);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&ParticipantName, &Savepoint)> {
        self.savepoints.iter()
    }

    /// Number of participants covered by this savepoint set
    pub fn len(&self) -> usize {
        self.savepoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.savepoints.is_empty()
    }
}
