// Savepoint integration tests across a chain of in-memory datastores

use anyhow::Result;
use std::sync::Arc;

use txchain::{
    ProcessSynchronizationRegistry, ResourceManager, SynchronizationRegistry,
    TransactionAggregate, TransactionCoordinator, TransactionDefinition,
};

// Declare the common module for test utilities using a path attribute
#[path = "../common/mod.rs"]
mod common;
use common::{row, MemoryStore, MemoryTransaction};

fn chained_coordinator(stores: &[Arc<MemoryStore>]) -> TransactionCoordinator {
    let registry: Arc<dyn SynchronizationRegistry> =
        Arc::new(ProcessSynchronizationRegistry::new());
    let participants = stores
        .iter()
        .map(|store| store.clone() as Arc<dyn ResourceManager>)
        .collect();
    TransactionCoordinator::with_registry(registry, participants).unwrap()
}

fn insert_into(aggregate: &mut TransactionAggregate, store: &str, values: &[(&str, &str)]) {
    let transaction = aggregate
        .handle_mut(store)
        .unwrap()
        .as_any_mut()
        .downcast_mut::<MemoryTransaction>()
        .unwrap();
    transaction.insert(row(values));
}

fn staged_len(aggregate: &mut TransactionAggregate, store: &str) -> usize {
    aggregate
        .handle_mut(store)
        .unwrap()
        .as_any_mut()
        .downcast_mut::<MemoryTransaction>()
        .unwrap()
        .staged_len()
}

#[test]
fn test_rollback_to_savepoint_keeps_earlier_work() -> Result<()> {
    let store_a = MemoryStore::new("store_a", &["id"]);
    let store_b = MemoryStore::new("store_b", &["id"]);
    let coordinator = chained_coordinator(&[store_a.clone(), store_b.clone()]);

    let mut aggregate = coordinator.begin(&TransactionDefinition::default())?;
    insert_into(&mut aggregate, "store_a", &[("id", "1")]);
    insert_into(&mut aggregate, "store_b", &[("id", "2")]);

    let savepoints = aggregate.create_savepoint()?;
    assert_eq!(savepoints.len(), 2);
    assert!(aggregate.has_savepoint());

    insert_into(&mut aggregate, "store_a", &[("id", "3")]);
    insert_into(&mut aggregate, "store_b", &[("id", "4")]);
    assert_eq!(staged_len(&mut aggregate, "store_a"), 2);

    aggregate.rollback_to_savepoint(&savepoints)?;
    assert_eq!(staged_len(&mut aggregate, "store_a"), 1);
    assert_eq!(staged_len(&mut aggregate, "store_b"), 1);

    coordinator.commit(aggregate)?;
    assert_eq!(store_a.row_count(), 1);
    assert_eq!(store_b.row_count(), 1);
    Ok(())
}

#[test]
fn test_release_savepoint_keeps_all_work() -> Result<()> {
    let store_a = MemoryStore::new("store_a", &["id"]);
    let store_b = MemoryStore::new("store_b", &["id"]);
    let coordinator = chained_coordinator(&[store_a.clone(), store_b.clone()]);

    let mut aggregate = coordinator.begin(&TransactionDefinition::default())?;
    insert_into(&mut aggregate, "store_a", &[("id", "1")]);

    let savepoints = aggregate.create_savepoint()?;
    insert_into(&mut aggregate, "store_a", &[("id", "2")]);

    aggregate.release_savepoint(&savepoints)?;
    assert!(!aggregate.has_savepoint());

    coordinator.commit(aggregate)?;
    assert_eq!(store_a.row_count(), 2);
    Ok(())
}
