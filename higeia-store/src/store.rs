//! Asynchronous list store for one endpoint.

use higeia_api::{ApiClient, ApiResult};
use higeia_types::{Collection, FetchParams, Record, RecordId};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// How a confirmed server change is merged into the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMode {
    /// Append, or replace in place when the id already exists.
    Insert,
    /// Replace in place; skipped when the id is absent.
    Update,
    /// Drop the record; skipped when the id is absent.
    Remove,
}

/// What an optimistic mutation needs to undo itself.
///
/// Produced by [`ListSyncStore::optimistic_apply`], consumed by
/// [`ListSyncStore::revert`] when the request behind it fails.
#[derive(Debug, Clone)]
pub enum MutationReceipt {
    /// A new record was appended; revert removes it.
    Inserted { id: RecordId },
    /// An existing record was replaced; revert puts the prior back.
    Replaced { prior: Record },
    /// A record was removed; revert reinserts it where it was.
    Removed { index: usize, prior: Record },
    /// Nothing changed.
    Noop,
}

#[derive(Debug, Default)]
struct StoreState {
    collection: Collection,
    loading: bool,
    refreshing: bool,
}

/// Owns the collection a screen renders plus the loading/refreshing flags
/// it binds its spinners to.
///
/// A load fully replaces the collection on success and leaves it untouched
/// on failure, so screens keep showing the last good data under an error
/// banner. Local mutations are applied after the server confirms them, or
/// optimistically before with an explicit revert path.
pub struct ListSyncStore {
    client: Arc<ApiClient>,
    path: String,
    state: Arc<RwLock<StoreState>>,
    load_seq: AtomicU64,
}

impl ListSyncStore {
    /// Creates a store for one endpoint path.
    pub fn new(client: Arc<ApiClient>, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            state: Arc::new(RwLock::new(StoreState::default())),
            load_seq: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    // ── Loading ──────────────────────────────────────────────────

    /// Initial load: raises `loading`, fetches, fully replaces the
    /// collection on success. On failure the previous collection stays
    /// and the error is returned for the caller to surface.
    pub async fn load(&self, params: &FetchParams) -> ApiResult<()> {
        self.load_inner(params, false).await
    }

    /// Pull-to-refresh variant of [`load`](Self::load); also raises
    /// `refreshing` so screens can show the lighter indicator.
    pub async fn refresh(&self, params: &FetchParams) -> ApiResult<()> {
        self.load_inner(params, true).await
    }

    async fn load_inner(&self, params: &FetchParams, refreshing: bool) -> ApiResult<()> {
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.loading = true;
            if refreshing {
                state.refreshing = true;
            }
        }

        let result = self.client.fetch(&self.path, params).await;

        let mut state = self.state.write().await;
        // A newer load started while this one was in flight. Its completion
        // owns the collection and the flags, so this outcome is dropped,
        // error or not.
        if self.load_seq.load(Ordering::SeqCst) != seq {
            debug!("discarding stale load of {}", self.path);
            return Ok(());
        }

        state.loading = false;
        state.refreshing = false;

        match result {
            Ok(values) => {
                let records = collect_records(&self.path, values);
                debug!("loaded {} records from {}", records.len(), self.path);
                state.collection.replace_all(records);
                Ok(())
            }
            Err(error) => {
                warn!("load of {} failed: {error}", self.path);
                Err(error)
            }
        }
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Merges a server-confirmed change into the collection.
    ///
    /// `Insert` of an id already present degrades to an in-place update;
    /// `Update` and `Remove` of an absent id do nothing.
    pub async fn apply_mutation(&self, record: Record, mode: MutationMode) {
        let mut state = self.state.write().await;
        let receipt = apply(&mut state.collection, record, mode);
        if matches!(receipt, MutationReceipt::Noop) {
            debug!("mutation on {} touched no record", self.path);
        }
    }

    /// Applies a change before the server has confirmed it, returning the
    /// receipt [`revert`](Self::revert) needs if the request then fails.
    pub async fn optimistic_apply(&self, record: Record, mode: MutationMode) -> MutationReceipt {
        let mut state = self.state.write().await;
        apply(&mut state.collection, record, mode)
    }

    /// Undoes an optimistic mutation.
    pub async fn revert(&self, receipt: MutationReceipt) {
        let mut state = self.state.write().await;
        match receipt {
            MutationReceipt::Inserted { id } => {
                state.collection.remove(&id);
            }
            MutationReceipt::Replaced { prior } => {
                state.collection.update(prior);
            }
            MutationReceipt::Removed { index, prior } => {
                state.collection.insert_at(index, prior);
            }
            MutationReceipt::Noop => {}
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    /// Snapshot of the records in render order.
    pub async fn records(&self) -> Vec<Record> {
        self.state.read().await.collection.as_slice().to_vec()
    }

    pub async fn get(&self, id: &RecordId) -> Option<Record> {
        self.state.read().await.collection.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.collection.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.collection.is_empty()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn is_refreshing(&self) -> bool {
        self.state.read().await.refreshing
    }
}

fn apply(collection: &mut Collection, record: Record, mode: MutationMode) -> MutationReceipt {
    match mode {
        MutationMode::Insert => {
            let id = record.id().clone();
            match collection.upsert(record) {
                Some(prior) => MutationReceipt::Replaced { prior },
                None => MutationReceipt::Inserted { id },
            }
        }
        MutationMode::Update => match collection.update(record) {
            Some(prior) => MutationReceipt::Replaced { prior },
            None => MutationReceipt::Noop,
        },
        MutationMode::Remove => match collection.remove(record.id()) {
            Some((index, prior)) => MutationReceipt::Removed { index, prior },
            None => MutationReceipt::Noop,
        },
    }
}

/// Converts raw list values into records, dropping rows without a usable
/// id so one malformed row never fails a whole load.
fn collect_records(path: &str, values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .filter_map(|value| match Record::from_value(value) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!("dropping row from {path}: {error}");
                None
            }
        })
        .collect()
}
