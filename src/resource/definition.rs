use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Transaction propagation behaviors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Propagation {
    Required,
    RequiresNew,
    Supports,
    NotSupported,
    Mandatory,
    Never,
    Nested,
}

/// Transaction isolation levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolationLevel {
    /// Use whatever isolation the underlying resource defaults to
    Default,
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

/// Transaction attributes handed uniformly to every participant's begin.
///
/// The coordinator never interprets these; each resource manager applies
/// whatever subset it understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDefinition {
    /// Propagation behavior
    #[serde(default = "default_propagation")]
    pub propagation: Propagation,

    /// Isolation level
    #[serde(default = "default_isolation")]
    pub isolation: IsolationLevel,

    /// Completion deadline, enforced by each participant on its own
    #[serde(default)]
    pub timeout: Option<Duration>,

    /// Hint that the unit of work performs no writes
    #[serde(default)]
    pub read_only: bool,

    /// Optional transaction name for diagnostics
    #[serde(default)]
    pub name: Option<String>,
}

fn default_propagation() -> Propagation {
    Propagation::Required
}

fn default_isolation() -> IsolationLevel {
    IsolationLevel::Default
}

impl Default for TransactionDefinition {
    fn default() -> Self {
        Self {
            propagation: Propagation::Required,
            isolation: IsolationLevel::Default,
            timeout: None,
            read_only: false,
            name: None,
        }
    }
}

impl TransactionDefinition {
    /// Create a definition with default attributes
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transaction name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the isolation level
    pub fn with_isolation(mut self, isolation: IsolationLevel) -> Self {
        self.isolation = isolation;
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Mark the transaction read-only
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}
