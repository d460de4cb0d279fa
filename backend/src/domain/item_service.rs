//! Item store: the canonical in-memory collection and its persistence.
//!
//! All mutations go through this service. In-memory state is the source of
//! truth for the session; persistence is fire-and-forget with a single
//! bounded retry, and a periodic task copies the last durably-written blob
//! to a backup key. Storage failures are logged and absorbed, never surfaced
//! to the user.

use anyhow::Result;
use log::{debug, error, info, warn};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use shared::Item;

use crate::domain::commands::items::ReplaceAllResult;
use crate::storage::KeyValueStorage;

/// Storage key of the canonical item collection.
pub const ITEMS_KEY: &str = "items";

/// Storage key of the periodic backup copy.
pub const ITEMS_BACKUP_KEY: &str = "items_backup";

/// Delay before the single persist retry.
const PERSIST_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Interval between backup copies.
const BACKUP_INTERVAL: Duration = Duration::from_secs(300);

/// Owns the canonical item collection and mediates every mutation.
///
/// Cheap to clone; clones share the same collection and storage handle.
#[derive(Clone)]
pub struct ItemService {
    storage: Arc<dyn KeyValueStorage>,
    items: Arc<Mutex<Vec<Item>>>,
}

impl ItemService {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn locked(&self) -> MutexGuard<'_, Vec<Item>> {
        self.items.lock().expect("item collection mutex poisoned")
    }

    /// Load the persisted collection into memory, returning how many items
    /// were loaded.
    ///
    /// A missing key loads as an empty collection. A malformed or non-array
    /// blob never raises: the collection resets to empty and the corrupted
    /// record is overwritten so the next load is clean. Only an outright
    /// storage read failure propagates.
    pub fn load(&self) -> Result<usize> {
        let loaded = match self.storage.get(ITEMS_KEY)? {
            None => Vec::new(),
            Some(blob) => match serde_json::from_str::<Vec<Item>>(&blob) {
                Ok(items) => items,
                Err(parse_err) => {
                    error!(
                        "📦 STORE: persisted items are malformed, resetting to empty: {}",
                        parse_err
                    );
                    if let Err(write_err) = self.storage.set(ITEMS_KEY, "[]") {
                        error!(
                            "📦 STORE: failed to overwrite corrupted items record: {:#}",
                            write_err
                        );
                    }
                    Vec::new()
                }
            },
        };

        let count = loaded.len();
        *self.locked() = loaded;
        info!("📦 STORE: loaded {} items", count);
        Ok(count)
    }

    /// Re-read the persisted collection on demand (the manual refresh
    /// action). Same semantics as [`ItemService::load`].
    pub fn refresh(&self) -> Result<usize> {
        self.load()
    }

    /// Read-only snapshot of the canonical collection.
    pub fn items(&self) -> Vec<Item> {
        self.locked().clone()
    }

    /// Number of items currently in the collection.
    pub fn len(&self) -> usize {
        self.locked().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locked().is_empty()
    }

    /// Apply a transformation to the canonical collection.
    ///
    /// The change lands in memory synchronously (readers never observe a
    /// partially applied mutation) and a persist is scheduled; the caller
    /// does not block on durability. Returns the closure's output.
    pub fn mutate<T>(&self, f: impl FnOnce(&mut Vec<Item>) -> T) -> T {
        let (output, payload) = {
            let mut items = self.locked();
            let output = f(&mut *items);
            (output, serde_json::to_string(&*items))
        };

        match payload {
            Ok(payload) => self.schedule_persist(payload),
            // Serializing plain records cannot realistically fail; keep the
            // in-memory state authoritative if it somehow does.
            Err(e) => error!("📦 STORE: failed to serialize items for persist: {}", e),
        }

        output
    }

    /// Like [`ItemService::mutate`], but only schedules a persist when the
    /// closure succeeds. The closure must not touch the collection on its
    /// error path, keeping failed operations free of partial mutations.
    pub fn try_mutate<T, E>(
        &self,
        f: impl FnOnce(&mut Vec<Item>) -> Result<T, E>,
    ) -> Result<T, E> {
        let (result, payload) = {
            let mut items = self.locked();
            let result = f(&mut *items);
            let payload = if result.is_ok() {
                Some(serde_json::to_string(&*items))
            } else {
                None
            };
            (result, payload)
        };

        match payload {
            Some(Ok(payload)) => self.schedule_persist(payload),
            Some(Err(e)) => error!("📦 STORE: failed to serialize items for persist: {}", e),
            None => {}
        }

        result
    }

    /// Replace the whole collection, filtering out records that lack a
    /// non-empty id or name. Reports accepted vs. dropped counts and persists
    /// immediately.
    pub fn replace_all(&self, new_items: Vec<Item>) -> ReplaceAllResult {
        let total = new_items.len();
        let valid: Vec<Item> = new_items
            .into_iter()
            .filter(|item| !item.item_id.trim().is_empty() && !item.item_name.trim().is_empty())
            .collect();

        let accepted = valid.len();
        let dropped = total - accepted;
        if dropped > 0 {
            warn!(
                "📦 STORE: replace_all dropped {} of {} records",
                dropped, total
            );
        }

        *self.locked() = valid;

        // Imports want the new collection on disk right away; if the write
        // fails the normal retry path takes over.
        if let Err(e) = self.persist() {
            warn!("📦 STORE: immediate persist failed, scheduling retry: {:#}", e);
            if let Ok(payload) = serde_json::to_string(&*self.locked()) {
                self.schedule_persist(payload);
            }
        }

        ReplaceAllResult { accepted, dropped }
    }

    /// Write the current snapshot to storage synchronously.
    pub fn persist(&self) -> Result<()> {
        let payload = serde_json::to_string(&*self.locked())?;
        self.storage.set(ITEMS_KEY, &payload)
    }

    /// Fire-and-forget persist of an already-serialized snapshot.
    ///
    /// On an async runtime the write (and its single retry) runs in a
    /// spawned task; without one the write happens inline so synchronous
    /// callers still get durability.
    fn schedule_persist(&self, payload: String) {
        let storage = Arc::clone(&self.storage);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(persist_with_retry(storage, payload));
            }
            Err(_) => {
                if let Err(e) = storage.set(ITEMS_KEY, &payload) {
                    error!("📦 STORE: persist failed with no runtime to retry on: {:#}", e);
                }
            }
        }
    }

    /// Copy the last durably-written items blob to the backup key.
    ///
    /// Reads storage, not the in-memory collection, so a backup taken while
    /// a persist is pending lags behind the latest mutation. Returns whether
    /// a backup was written.
    pub fn backup_once(&self) -> Result<bool> {
        match self.storage.get(ITEMS_KEY)? {
            Some(blob) => {
                self.storage.set(ITEMS_BACKUP_KEY, &blob)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Periodic backup loop. Runs forever; spawn it on the runtime and drop
    /// the handle to stop caring, or abort the task to stop it.
    pub async fn run_backup_task(self) {
        let mut interval = tokio::time::interval(BACKUP_INTERVAL);
        // The first tick completes immediately; skip it so backups trail
        // mutations instead of racing startup.
        interval.tick().await;
        loop {
            interval.tick().await;
            match self.backup_once() {
                Ok(true) => info!("💾 BACKUP: backup created successfully"),
                Ok(false) => debug!("💾 BACKUP: nothing persisted yet, skipping"),
                Err(e) => error!("💾 BACKUP: backup failed: {:#}", e),
            }
        }
    }
}

/// One write attempt plus one retry after a fixed delay; repeated failure is
/// logged and absorbed, leaving in-memory state authoritative for the
/// session.
async fn persist_with_retry(storage: Arc<dyn KeyValueStorage>, payload: String) {
    if let Err(first_err) = storage.set(ITEMS_KEY, &payload) {
        warn!(
            "📦 STORE: persist failed, retrying in {:?}: {:#}",
            PERSIST_RETRY_DELAY, first_err
        );
        tokio::time::sleep(PERSIST_RETRY_DELAY).await;
        if let Err(retry_err) = storage.set(ITEMS_KEY, &payload) {
            error!("📦 STORE: persist retry failed, giving up: {:#}", retry_err);
        }
    }
}
