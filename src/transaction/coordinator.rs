use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, warn};

use crate::common::types::{ParticipantName, ResourceRef};
use crate::resource::definition::TransactionDefinition;
use crate::resource::manager::ResourceError;
use crate::transaction::aggregate::TransactionAggregate;
use crate::transaction::error::{ChainError, HeuristicOutcome, Result};
use crate::transaction::synchronization::{ProcessSynchronizationRegistry, SynchronizationRegistry};

/// Coordinates one logical transaction across an ordered chain of
/// independently transactional resources.
///
/// This is not an atomic commit protocol: there is no prepare phase, and
/// participants can reach different outcomes. The coordinator sequences
/// begin in registration order and commit/rollback in reverse registration
/// order, so the later-registered (more auxiliary) resources finish first
/// and the primary (first-registered) resource is touched last.
pub struct TransactionCoordinator {
    /// Fixed participant list; order is semantically meaningful
    participants: Vec<ResourceRef>,

    /// Synchronization context registry consulted at begin
    synchronization: Arc<dyn SynchronizationRegistry>,
}

impl TransactionCoordinator {
    /// Create a coordinator over the given participants, backed by the
    /// process-wide synchronization registry.
    ///
    /// The list must be non-empty and participant names must be unique; the
    /// first participant is the primary one.
    pub fn new(participants: Vec<ResourceRef>) -> Result<Self> {
        Self::with_registry(ProcessSynchronizationRegistry::instance(), participants)
    }

    /// Create a coordinator with an explicitly injected registry
    pub fn with_registry(
        synchronization: Arc<dyn SynchronizationRegistry>,
        participants: Vec<ResourceRef>,
    ) -> Result<Self> {
        if participants.is_empty() {
            return Err(ChainError::NoParticipants);
        }
        let mut seen = HashSet::new();
        for participant in &participants {
            if !seen.insert(participant.name().to_string()) {
                return Err(ChainError::DuplicateParticipant(
                    participant.name().to_string(),
                ));
            }
        }
        Ok(Self {
            participants,
            synchronization,
        })
    }

    fn primary_name(&self) -> &str {
        self.participants[0].name()
    }

    /// Begin a chained transaction: one sub-transaction per participant, in
    /// registration order.
    ///
    /// If no synchronization context is active, one is initialized and the
    /// returned aggregate owns it. A begin failure propagates immediately;
    /// participants begun before the failure are left open, with no
    /// compensating rollback, and an owned synchronization context stays
    /// active (it is only cleared by commit or rollback).
    pub fn begin(&self, definition: &TransactionDefinition) -> Result<TransactionAggregate> {
        let mut aggregate = TransactionAggregate::new(self.primary_name());

        if !self.synchronization.is_synchronization_active() {
            self.synchronization.init_synchronization();
            aggregate.set_owns_synchronization();
        }

        for participant in &self.participants {
            debug!("beginning sub-transaction on '{}'", participant.name());
            aggregate
                .register_participant(definition, participant.as_ref())
                .map_err(|source| ChainError::BeginFailed {
                    participant: participant.name().to_string(),
                    source,
                })?;
        }

        Ok(aggregate)
    }

    /// Commit every participant, in reverse registration order.
    ///
    /// After the first commit failure every remaining participant is rolled
    /// back instead; failures of those compensating rollbacks are logged and
    /// never propagated, so the root cause is not masked. The synchronization
    /// context is cleared unconditionally if the aggregate owns it. A commit
    /// failure surfaces as a heuristic completion: `RolledBack` if the
    /// failing participant is the primary one, `Mixed` otherwise.
    pub fn commit(&self, mut aggregate: TransactionAggregate) -> Result<()> {
        let mut failure: Option<(ParticipantName, ResourceError)> = None;

        for participant in self.participants.iter().rev() {
            if failure.is_none() {
                debug!("committing sub-transaction on '{}'", participant.name());
                if let Err(cause) = aggregate.commit_participant(participant.as_ref()) {
                    failure = Some((participant.name().to_string(), cause));
                }
            } else {
                // After an unsuccessful commit the remaining participants
                // must be rolled back instead.
                if let Err(cause) = aggregate.rollback_participant(participant.as_ref()) {
                    warn!(
                        "rollback failed after commit failure ('{}'): {}",
                        participant.name(),
                        cause
                    );
                }
            }
        }

        if aggregate.owns_synchronization() {
            self.synchronization.clear_synchronization();
        }

        match failure {
            Some((participant, cause)) => {
                let outcome = if participant == self.primary_name() {
                    HeuristicOutcome::RolledBack
                } else {
                    HeuristicOutcome::Mixed
                };
                Err(ChainError::HeuristicCompletion { outcome, cause })
            }
            None => Ok(()),
        }
    }

    /// Roll back every participant, in reverse registration order.
    ///
    /// Every participant is attempted regardless of earlier failures; only
    /// the first failure is surfaced, the rest are logged. The
    /// synchronization context is cleared unconditionally if the aggregate
    /// owns it.
    pub fn rollback(&self, mut aggregate: TransactionAggregate) -> Result<()> {
        let mut failure: Option<(ParticipantName, ResourceError)> = None;

        for participant in self.participants.iter().rev() {
            debug!("rolling back sub-transaction on '{}'", participant.name());
            if let Err(cause) = aggregate.rollback_participant(participant.as_ref()) {
                if failure.is_none() {
                    failure = Some((participant.name().to_string(), cause));
                } else {
                    warn!("rollback failed ('{}'): {}", participant.name(), cause);
                }
            }
        }

        if aggregate.owns_synchronization() {
            self.synchronization.clear_synchronization();
        }

        match failure {
            Some((participant, cause)) => {
                Err(ChainError::UnexpectedRollback { participant, cause })
            }
            None => Ok(()),
        }
    }
}
