// Synchronization context ownership across nested transactional scopes

use anyhow::Result;
use std::sync::Arc;

use txchain::{
    ProcessSynchronizationRegistry, ResourceManager, SynchronizationRegistry,
    TransactionCoordinator, TransactionDefinition,
};

// Declare the common module for test utilities using a path attribute
#[path = "../common/mod.rs"]
mod common;
use common::MemoryStore;

fn coordinator_with(
    registry: &Arc<dyn SynchronizationRegistry>,
    store: Arc<MemoryStore>,
) -> TransactionCoordinator {
    TransactionCoordinator::with_registry(
        registry.clone(),
        vec![store as Arc<dyn ResourceManager>],
    )
    .unwrap()
}

#[test]
fn test_first_aggregate_owns_and_clears_the_context() -> Result<()> {
    let registry: Arc<dyn SynchronizationRegistry> =
        Arc::new(ProcessSynchronizationRegistry::new());
    let coordinator = coordinator_with(&registry, MemoryStore::new("store", &["id"]));

    assert!(!registry.is_synchronization_active());

    let aggregate = coordinator.begin(&TransactionDefinition::default())?;
    assert!(aggregate.owns_synchronization());
    assert!(registry.is_synchronization_active());

    coordinator.commit(aggregate)?;
    assert!(!registry.is_synchronization_active());
    Ok(())
}

#[test]
fn test_inner_scope_never_clears_an_outer_context() -> Result<()> {
    let registry: Arc<dyn SynchronizationRegistry> =
        Arc::new(ProcessSynchronizationRegistry::new());
    let outer = coordinator_with(&registry, MemoryStore::new("outer_store", &["id"]));
    let inner = coordinator_with(&registry, MemoryStore::new("inner_store", &["id"]));

    let outer_aggregate = outer.begin(&TransactionDefinition::default())?;
    assert!(outer_aggregate.owns_synchronization());

    // The inner scope finds the context active, so it neither owns nor
    // clears it.
    let inner_aggregate = inner.begin(&TransactionDefinition::default())?;
    assert!(!inner_aggregate.owns_synchronization());

    inner.commit(inner_aggregate)?;
    assert!(registry.is_synchronization_active());

    outer.commit(outer_aggregate)?;
    assert!(!registry.is_synchronization_active());
    Ok(())
}

#[test]
fn test_context_cleared_on_rollback() -> Result<()> {
    let registry: Arc<dyn SynchronizationRegistry> =
        Arc::new(ProcessSynchronizationRegistry::new());
    let coordinator = coordinator_with(&registry, MemoryStore::new("store", &["id"]));

    let aggregate = coordinator.begin(&TransactionDefinition::default())?;
    assert!(aggregate.owns_synchronization());

    coordinator.rollback(aggregate)?;
    assert!(!registry.is_synchronization_active());
    Ok(())
}
