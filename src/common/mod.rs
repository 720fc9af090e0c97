// Common type aliases shared across the crate

pub mod types;

pub use types::{ParticipantName, ResourceRef, Savepoint};
