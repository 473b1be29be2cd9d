mod common;

use common::{day, entry};
use depro_core::{CoreError, RecomputeOptions, RecomputeService};
use depro_domain::ProgressVariant;
use depro_storage_mem::MemoryLedgerStore;
use tempfile::tempdir;
use uuid::Uuid;

#[test]
fn snapshots_round_trip_including_computed_series() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("ledger.json");

    let product = Uuid::new_v4();
    let other = Uuid::new_v4();
    let store = MemoryLedgerStore::new();
    store.insert_many([
        entry(product, 1, 5, 4, 0),
        entry(product, 2, 5, 4, 7),
        entry(other, 1, 9, 0, 0),
    ]);
    RecomputeService::run(
        &store,
        product,
        day(1),
        day(2),
        ProgressVariant::PlannedProgress,
        &RecomputeOptions::default(),
    )
    .expect("recompute");

    store.save_snapshot(&path).expect("save snapshot");
    let loaded = MemoryLedgerStore::load_snapshot(&path).expect("load snapshot");

    assert_eq!(loaded.all_entries(), store.all_entries());
    assert_eq!(
        loaded
            .entries_for(product)
            .iter()
            .map(|entry| entry.planned_progress_quantity)
            .collect::<Vec<_>>(),
        vec![Some(-1), Some(1)]
    );
}

#[test]
fn loading_a_missing_snapshot_is_a_storage_error() {
    let dir = tempdir().expect("tempdir");
    let err = MemoryLedgerStore::load_snapshot(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CoreError::Storage(_)));
}

#[test]
fn saving_leaves_no_temporary_file_behind() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("ledger.json");

    let store = MemoryLedgerStore::new();
    store.insert(entry(Uuid::new_v4(), 1, 5, 0, 0));
    store.save_snapshot(&path).expect("save snapshot");

    assert!(path.exists());
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path() != path)
        .collect();
    assert!(leftovers.is_empty(), "unexpected files: {leftovers:?}");
}
