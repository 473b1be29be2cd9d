//! depro-storage-mem
//!
//! In-memory transactional store for the delivery-progress ledger.
//! Implements the depro-core storage traits with blocking range leases, so
//! overlapping recomputations on a product serialize while disjoint work
//! proceeds in parallel. Snapshots round-trip to JSON for fixtures and
//! backups.

use std::{
    collections::{HashMap, HashSet},
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use depro_core::{
    store::{LedgerStore, RangeLease},
    CoreError,
};
use depro_domain::{DateRange, DayValue, LedgerEntry, ProgressVariant};
use uuid::Uuid;

const TMP_SUFFIX: &str = "tmp";

/// Shared ledger state plus the lease table that serializes writers.
#[derive(Debug, Default)]
struct Shared {
    state: Mutex<StoreState>,
    lease_released: Condvar,
}

#[derive(Debug, Default)]
struct StoreState {
    entries: HashMap<Uuid, Vec<LedgerEntry>>,
    active: Vec<ActiveLease>,
    next_lease: u64,
}

#[derive(Debug)]
struct ActiveLease {
    id: u64,
    product_id: Uuid,
    /// The requested range extended by the prior day, so the seed row is
    /// covered by the same lock.
    span: DateRange,
}

/// In-memory ledger store with exclusive, blocking range leases.
///
/// Clones share the same underlying ledger, which is how concurrent callers
/// (threads) contend on it.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedgerStore {
    shared: Arc<Shared>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, entry: LedgerEntry) {
        let mut state = lock_state(&self.shared);
        state.entries.entry(entry.product_id).or_default().push(entry);
    }

    pub fn insert_many(&self, entries: impl IntoIterator<Item = LedgerEntry>) {
        let mut state = lock_state(&self.shared);
        for entry in entries {
            state.entries.entry(entry.product_id).or_default().push(entry);
        }
    }

    /// Every entry of the product, all statuses, ascending by
    /// `(delivery_date, id)`.
    pub fn entries_for(&self, product_id: Uuid) -> Vec<LedgerEntry> {
        let state = lock_state(&self.shared);
        let mut rows: Vec<LedgerEntry> = state
            .entries
            .get(&product_id)
            .map(|rows| rows.to_vec())
            .unwrap_or_default();
        rows.sort_by_key(|entry| (entry.delivery_date, entry.id));
        rows
    }

    /// Every entry in the store, ascending by `(product_id, delivery_date,
    /// id)`.
    pub fn all_entries(&self) -> Vec<LedgerEntry> {
        let state = lock_state(&self.shared);
        let mut rows: Vec<LedgerEntry> = state
            .entries
            .values()
            .flat_map(|rows| rows.iter().cloned())
            .collect();
        rows.sort_by_key(|entry| (entry.product_id, entry.delivery_date, entry.id));
        rows
    }

    /// Serializes the full ledger to pretty JSON at `path`, atomically via a
    /// temporary sibling file.
    pub fn save_snapshot(&self, path: &Path) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(&self.all_entries())
            .map_err(|err| CoreError::Storage(err.to_string()))?;
        let tmp = tmp_path(path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, path).map_err(|err| CoreError::Storage(err.to_string()))?;
        Ok(())
    }

    /// Loads a ledger previously written by [`MemoryLedgerStore::save_snapshot`].
    pub fn load_snapshot(path: &Path) -> Result<Self, CoreError> {
        let data = fs::read_to_string(path).map_err(|err| CoreError::Storage(err.to_string()))?;
        let entries: Vec<LedgerEntry> =
            serde_json::from_str(&data).map_err(|err| CoreError::Storage(err.to_string()))?;
        let store = Self::new();
        store.insert_many(entries);
        Ok(store)
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn lock_range(
        &self,
        product_id: Uuid,
        range: DateRange,
        timeout: Duration,
    ) -> Result<Box<dyn RangeLease + '_>, CoreError> {
        let span = DateRange {
            start: range.prior_day(),
            end: range.end,
        };
        let deadline = Instant::now() + timeout;
        let mut state = lock_state(&self.shared);
        if !state.entries.contains_key(&product_id) {
            return Err(CoreError::ProductNotFound(product_id));
        }
        while state
            .active
            .iter()
            .any(|lease| lease.product_id == product_id && lease.span.overlaps(&span))
        {
            let now = Instant::now();
            if now >= deadline {
                return Err(CoreError::LockTimeout { waited: timeout });
            }
            let (guard, _) = self
                .shared
                .lease_released
                .wait_timeout(state, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
        }
        let product_rows = state
            .entries
            .get(&product_id)
            .ok_or(CoreError::ProductNotFound(product_id))?;
        let mut rows: Vec<LedgerEntry> = product_rows
            .iter()
            .filter(|entry| range.contains(entry.delivery_date) && !entry.is_cancelled())
            .cloned()
            .collect();
        rows.sort_by_key(|entry| (entry.delivery_date, entry.id));
        let prior = product_rows
            .iter()
            .filter(|entry| entry.delivery_date == range.prior_day())
            .min_by_key(|entry| entry.id)
            .cloned();

        let lease_id = state.next_lease;
        state.next_lease += 1;
        state.active.push(ActiveLease {
            id: lease_id,
            product_id,
            span,
        });

        Ok(Box::new(MemoryLease {
            shared: Arc::clone(&self.shared),
            lease_id,
            product_id,
            range,
            prior,
            rows,
            staged: Vec::new(),
            finished: false,
        }))
    }

    fn product_ids(&self) -> Result<Vec<Uuid>, CoreError> {
        let state = lock_state(&self.shared);
        let mut ids: Vec<Uuid> = state
            .entries
            .iter()
            .filter(|(_, rows)| !rows.is_empty())
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        Ok(ids)
    }
}

enum StagedWrite {
    Series {
        variant: ProgressVariant,
        values: Vec<DayValue>,
    },
    PlannedReset,
}

/// One exclusively held transaction. Dropping it without committing releases
/// the locks and discards every staged write.
struct MemoryLease {
    shared: Arc<Shared>,
    lease_id: u64,
    product_id: Uuid,
    range: DateRange,
    prior: Option<LedgerEntry>,
    rows: Vec<LedgerEntry>,
    staged: Vec<StagedWrite>,
    finished: bool,
}

impl RangeLease for MemoryLease {
    fn prior_entry(&self) -> Option<&LedgerEntry> {
        self.prior.as_ref()
    }

    fn entries(&self) -> &[LedgerEntry] {
        &self.rows
    }

    fn stage_series(&mut self, variant: ProgressVariant, values: &[DayValue]) {
        self.staged.push(StagedWrite::Series {
            variant,
            values: values.to_vec(),
        });
    }

    fn stage_planned_reset(&mut self) {
        self.staged.push(StagedWrite::PlannedReset);
    }

    fn commit(mut self: Box<Self>) -> Result<usize, CoreError> {
        let mut state = lock_state(&self.shared);
        let rows = state
            .entries
            .get_mut(&self.product_id)
            .ok_or(CoreError::ProductNotFound(self.product_id))?;
        let mut touched: HashSet<Uuid> = HashSet::new();
        for write in &self.staged {
            match write {
                StagedWrite::Series { variant, values } => {
                    for value in values {
                        for entry in rows
                            .iter_mut()
                            .filter(|entry| entry.delivery_date == value.date)
                        {
                            entry.set_series_value(*variant, value.value);
                            touched.insert(entry.id);
                        }
                    }
                }
                StagedWrite::PlannedReset => {
                    for entry in rows.iter_mut().filter(|entry| {
                        self.range.contains(entry.delivery_date) && !entry.is_cancelled()
                    }) {
                        entry.planned_quantity = 0;
                        entry.touch();
                        touched.insert(entry.id);
                    }
                }
            }
        }
        self.finished = true;
        release(&self.shared, self.lease_id, state);
        Ok(touched.len())
    }
}

impl Drop for MemoryLease {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let state = lock_state(&self.shared);
        release(&self.shared, self.lease_id, state);
    }
}

fn lock_state(shared: &Shared) -> MutexGuard<'_, StoreState> {
    shared.state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn release(shared: &Shared, lease_id: u64, mut state: MutexGuard<'_, StoreState>) {
    state.active.retain(|lease| lease.id != lease_id);
    drop(state);
    shared.lease_released.notify_all();
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| CoreError::Storage(err.to_string()))?;
    }
    let mut file = File::create(path).map_err(|err| CoreError::Storage(err.to_string()))?;
    file.write_all(data.as_bytes())
        .map_err(|err| CoreError::Storage(err.to_string()))?;
    file.flush().map_err(|err| CoreError::Storage(err.to_string()))?;
    Ok(())
}
