use std::fmt;

use thiserror::Error;

use crate::common::types::ParticipantName;
use crate::resource::manager::ResourceError;

/// Classification of a failed commit pass.
///
/// `RolledBack` means the failure happened at the step associated with the
/// primary resource; `Mixed` means some participants plausibly committed
/// before the failure. The classification inspects only which participant
/// failed, not what each resource actually made durable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicOutcome {
    RolledBack,
    Mixed,
}

impl fmt::Display for HeuristicOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeuristicOutcome::RolledBack => write!(f, "rolled back"),
            HeuristicOutcome::Mixed => write!(f, "mixed"),
        }
    }
}

/// Errors surfaced at the coordinator boundary
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("no participants supplied to the transaction coordinator")]
    NoParticipants,

    #[error("duplicate participant name '{0}'")]
    DuplicateParticipant(ParticipantName),

    #[error("begin failed at participant '{participant}': {source}")]
    BeginFailed {
        participant: ParticipantName,
        #[source]
        source: ResourceError,
    },

    #[error("transaction completed heuristically ({outcome}): {cause}")]
    HeuristicCompletion {
        outcome: HeuristicOutcome,
        #[source]
        cause: ResourceError,
    },

    #[error("rollback failure, originated at participant '{participant}': {cause}")]
    UnexpectedRollback {
        participant: ParticipantName,
        #[source]
        cause: ResourceError,
    },
}

/// Result type for coordinator operations
pub type Result<T> = std::result::Result<T, ChainError>;
