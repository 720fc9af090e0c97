use std::any::Any;
use std::sync::Arc;

use crate::resource::manager::ResourceManager;

/// Participant name type
pub type ParticipantName = String;

/// Shareable reference to a resource manager
pub type ResourceRef = Arc<dyn ResourceManager>;

/// Opaque savepoint token minted by a participant's transaction handle.
/// Only the participant that created it can interpret it.
pub type Savepoint = Box<dyn Any + Send>;
