//! Generic optimistic-sync store, one instance per entity type.
//!
//! Every mutation applies locally first, then attempts the matching REST
//! call. The settlement policy differs per operation and is deliberate:
//!
//! - `load`: falls back to the seed dataset on failure or an empty response.
//! - `create`: the optimistic record is retained even when the POST fails
//!   (no rollback on create; the asymmetry with delete is inherited behavior
//!   kept on purpose).
//! - `update`: merge semantics; the merged record is kept on failure.
//! - `remove`: the only operation that rolls back, restoring the pre-call
//!   snapshot when the DELETE fails.
//!
//! Failures are never swallowed: each operation returns a typed result, the
//! affected record is marked [`SyncStatus::Failed`], and the store records
//! `last_error` for consumers that poll instead of handling results.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, Value};
use thiserror::Error;
use time::OffsetDateTime;

use crate::client::ApiError;
use crate::domain::{Entity, EntityId};
use crate::endpoint::EntityEndpoint;

/// A shallow field patch: JSON object keys merged over the existing record.
pub type Patch = Map<String, Value>;

/// Per-record synchronization state, surfaced so consumers can render
/// non-silent failure indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// The backend has confirmed this record.
    Synced,
    /// An optimistic mutation is in flight.
    Pending,
    /// The last write for this record did not persist server-side.
    Failed,
}

/// A record plus its sync state.
#[derive(Debug, Clone)]
pub struct StoredRecord<T> {
    pub record: T,
    pub sync: SyncStatus,
}

/// Where a settled `load()` got its data from.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadSource {
    /// Backend responded with a non-empty collection.
    Remote { count: usize },
    /// Seed fallback; `reason` is `None` when the backend simply returned an
    /// empty collection.
    Seed { reason: Option<ApiError> },
    /// Superseded by a newer `load()`; nothing was mutated.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("no record with id {0}")]
    UnknownId(EntityId),
    #[error("invalid patch: {0}")]
    Patch(String),
}

struct StoreState<T> {
    items: Vec<StoredRecord<T>>,
    is_loading: bool,
    last_error: Option<ApiError>,
    /// Bumped on every items mutation; drives filter-view memoization.
    revision: u64,
    /// Load generation; responses from superseded loads are discarded.
    load_seq: u64,
}

/// The canonical in-memory collection for one entity type.
///
/// The store exclusively owns its collection: consumers read via clones
/// ([`items`](Self::items), [`records`](Self::records)) or a
/// [`FilteredView`](crate::domain::filters::FilteredView) and mutate only
/// through the operations here. Operations are not serialized against each
/// other; the caller must not issue concurrent writes for the same id.
pub struct EntityStore<T: Entity> {
    endpoint: Arc<dyn EntityEndpoint<T>>,
    seed: Vec<T>,
    state: Mutex<StoreState<T>>,
}

impl<T: Entity> EntityStore<T> {
    pub fn new(endpoint: Arc<dyn EntityEndpoint<T>>, seed: Vec<T>) -> Self {
        Self {
            endpoint,
            seed,
            state: Mutex::new(StoreState {
                items: Vec::new(),
                is_loading: false,
                last_error: None,
                revision: 0,
                load_seq: 0,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, StoreState<T>> {
        self.state.lock().expect("store lock poisoned")
    }

    /// Clone of the current records, arrival order.
    pub fn items(&self) -> Vec<T> {
        self.state()
            .items
            .iter()
            .map(|stored| stored.record.clone())
            .collect()
    }

    /// Clone of the current records with their sync state.
    pub fn records(&self) -> Vec<StoredRecord<T>> {
        self.state().items.clone()
    }

    /// Look up a single record by id from the already-loaded collection.
    pub fn get(&self, id: EntityId) -> Option<T> {
        self.state()
            .items
            .iter()
            .find(|stored| stored.record.id() == id)
            .map(|stored| stored.record.clone())
    }

    pub fn len(&self) -> usize {
        self.state().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    /// Most recent transport failure, if any.
    pub fn last_error(&self) -> Option<ApiError> {
        self.state().last_error.clone()
    }

    pub fn revision(&self) -> u64 {
        self.state().revision
    }

    /// Fetch the collection, replacing `items` on settlement.
    ///
    /// A non-empty response wins; an empty response or any failure falls
    /// back to the seed dataset. `is_loading` is guaranteed false once the
    /// latest `load()` settles, whichever path was taken. A response that
    /// arrives after a newer `load()` began is discarded.
    pub async fn load(&self) -> LoadSource {
        let seq = {
            let mut state = self.state();
            state.load_seq += 1;
            state.is_loading = true;
            state.load_seq
        };

        let result = self.endpoint.fetch_all().await;

        let mut state = self.state();
        if state.load_seq != seq {
            tracing::debug!(
                endpoint = T::ENDPOINT,
                "discarding response from superseded load"
            );
            return LoadSource::Stale;
        }
        state.is_loading = false;

        match result {
            Ok(remote) if !remote.is_empty() => {
                let count = remote.len();
                state.items = remote
                    .into_iter()
                    .map(|record| StoredRecord {
                        record,
                        sync: SyncStatus::Synced,
                    })
                    .collect();
                state.revision += 1;
                state.last_error = None;
                LoadSource::Remote { count }
            }
            Ok(_) => {
                tracing::debug!(endpoint = T::ENDPOINT, "empty collection, using seed data");
                state.items = self.seeded();
                state.revision += 1;
                LoadSource::Seed { reason: None }
            }
            Err(err) => {
                tracing::warn!(
                    endpoint = T::ENDPOINT,
                    error = %err,
                    "backend unreachable, using seed data"
                );
                state.items = self.seeded();
                state.revision += 1;
                state.last_error = Some(err.clone());
                LoadSource::Seed { reason: Some(err) }
            }
        }
    }

    /// Append `draft` optimistically under a temporary id, then POST it.
    ///
    /// On success the temp-id record is replaced by the server-confirmed one
    /// and returned. On failure the temporary record is retained, marked
    /// [`SyncStatus::Failed`], and the error is returned; there is no
    /// rollback on create.
    pub async fn create(&self, draft: T) -> Result<T, StoreError> {
        let temp_id = next_temp_id();
        let mut local = draft.clone();
        local.set_id(temp_id);
        {
            let mut state = self.state();
            state.items.push(StoredRecord {
                record: local,
                sync: SyncStatus::Pending,
            });
            state.revision += 1;
        }

        match self.endpoint.create(&draft).await {
            Ok(saved) => {
                let mut state = self.state();
                if let Some(idx) = state.items.iter().position(|s| s.record.id() == temp_id) {
                    state.items[idx] = StoredRecord {
                        record: saved.clone(),
                        sync: SyncStatus::Synced,
                    };
                    state.revision += 1;
                }
                Ok(saved)
            }
            Err(err) => {
                tracing::warn!(
                    endpoint = T::ENDPOINT,
                    label = draft.label(),
                    error = %err,
                    "create not persisted, keeping local record"
                );
                let mut state = self.state();
                if let Some(idx) = state.items.iter().position(|s| s.record.id() == temp_id) {
                    state.items[idx].sync = SyncStatus::Failed;
                }
                state.last_error = Some(err.clone());
                Err(err.into())
            }
        }
    }

    /// Merge `patch` over the record with `id` optimistically, then PUT the
    /// merged record.
    ///
    /// Merge semantics: fields absent from the patch are preserved, `id` is
    /// immutable through patches, and unknown fields are rejected. On
    /// failure the local merge is kept and marked [`SyncStatus::Failed`].
    pub async fn update(&self, id: EntityId, patch: Patch) -> Result<T, StoreError> {
        let merged = {
            let mut state = self.state();
            let idx = state
                .items
                .iter()
                .position(|s| s.record.id() == id)
                .ok_or(StoreError::UnknownId(id))?;
            let merged = merge_patch(&state.items[idx].record, &patch)?;
            state.items[idx] = StoredRecord {
                record: merged.clone(),
                sync: SyncStatus::Pending,
            };
            state.revision += 1;
            merged
        };

        match self.endpoint.update(id, &merged).await {
            Ok(()) => {
                let mut state = self.state();
                if let Some(idx) = state.items.iter().position(|s| s.record.id() == id) {
                    state.items[idx].sync = SyncStatus::Synced;
                }
                Ok(merged)
            }
            Err(err) => {
                tracing::warn!(
                    endpoint = T::ENDPOINT,
                    id,
                    error = %err,
                    "update not persisted, keeping local change"
                );
                let mut state = self.state();
                if let Some(idx) = state.items.iter().position(|s| s.record.id() == id) {
                    state.items[idx].sync = SyncStatus::Failed;
                }
                state.last_error = Some(err.clone());
                Err(err.into())
            }
        }
    }

    /// Remove the record with `id` optimistically, then DELETE it.
    ///
    /// The only operation with rollback: on failure the pre-call snapshot is
    /// restored, so a failed remove is a no-op from the caller's view.
    pub async fn remove(&self, id: EntityId) -> Result<(), StoreError> {
        let backup = {
            let mut state = self.state();
            if !state.items.iter().any(|s| s.record.id() == id) {
                return Err(StoreError::UnknownId(id));
            }
            let backup = state.items.clone();
            state.items.retain(|s| s.record.id() != id);
            state.revision += 1;
            backup
        };

        match self.endpoint.delete(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(
                    endpoint = T::ENDPOINT,
                    id,
                    error = %err,
                    "delete failed, restoring record"
                );
                let mut state = self.state();
                state.items = backup;
                state.revision += 1;
                state.last_error = Some(err.clone());
                Err(err.into())
            }
        }
    }

    fn seeded(&self) -> Vec<StoredRecord<T>> {
        self.seed
            .iter()
            .cloned()
            .map(|record| StoredRecord {
                record,
                sync: SyncStatus::Synced,
            })
            .collect()
    }
}

/// Shallow-merge `patch` over `record` through their JSON representations.
fn merge_patch<T: Entity>(record: &T, patch: &Patch) -> Result<T, StoreError> {
    let mut value = serde_json::to_value(record).map_err(|e| StoreError::Patch(e.to_string()))?;
    let Value::Object(fields) = &mut value else {
        return Err(StoreError::Patch(
            "record did not serialize to an object".to_string(),
        ));
    };

    for (key, val) in patch {
        if key == "id" {
            // id is immutable through patches
            continue;
        }
        if !fields.contains_key(key) {
            return Err(StoreError::Patch(format!("unknown field `{key}`")));
        }
        fields.insert(key.clone(), val.clone());
    }

    serde_json::from_value(value).map_err(|e| StoreError::Patch(e.to_string()))
}

/// Temporary id for a not-yet-confirmed record: a high-resolution clock
/// reading with a process-wide counter mixed in so back-to-back creates
/// never collide. Masked non-negative so it sorts with server ids.
fn next_temp_id() -> EntityId {
    static SEQ: AtomicI64 = AtomicI64::new(0);
    let stamp = OffsetDateTime::now_utc().unix_timestamp_nanos() as i64;
    stamp.wrapping_add(SEQ.fetch_add(1, Ordering::Relaxed)) & i64::MAX
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Machine, MachineStatus};
    use crate::endpoint::MockEndpoint;
    use crate::seed;

    fn machinery_store(endpoint: Arc<MockEndpoint<Machine>>) -> EntityStore<Machine> {
        EntityStore::new(endpoint, seed::machinery())
    }

    fn drill_draft() -> Machine {
        Machine {
            id: 0,
            name: "Drill D1".to_string(),
            kind: "Drill".to_string(),
            status: MachineStatus::Working,
            last_maintenance: None,
            project: None,
            location: None,
            supervisor: None,
        }
    }

    #[tokio::test]
    async fn load_falls_back_to_seed_when_offline() {
        let endpoint = Arc::new(MockEndpoint::new());
        endpoint.set_offline(true);
        let store = machinery_store(endpoint.clone());

        let source = store.load().await;

        assert!(matches!(source, LoadSource::Seed { reason: Some(_) }));
        assert_eq!(store.items(), seed::machinery());
        assert!(!store.is_loading());
        assert!(store.last_error().is_some());
        assert_eq!(endpoint.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn load_falls_back_to_seed_on_empty_collection() {
        let store = machinery_store(Arc::new(MockEndpoint::new()));

        let source = store.load().await;

        assert_eq!(source, LoadSource::Seed { reason: None });
        assert_eq!(store.items(), seed::machinery());
        assert!(store.last_error().is_none());
    }

    #[tokio::test]
    async fn load_replaces_items_with_remote_collection() {
        let remote = vec![drill_draft()];
        let store = machinery_store(Arc::new(MockEndpoint::with_remote(remote.clone())));

        let source = store.load().await;

        assert_eq!(source, LoadSource::Remote { count: 1 });
        assert_eq!(store.items(), remote);
        assert!(store
            .records()
            .iter()
            .all(|stored| stored.sync == SyncStatus::Synced));
    }

    #[tokio::test]
    async fn create_is_visible_before_network_settlement() {
        use std::future::Future;
        use std::task::{Context, Waker};

        let endpoint = Arc::new(MockEndpoint::new());
        let store = machinery_store(endpoint.clone());
        store.load().await;
        assert_eq!(store.len(), 2);

        let mut create = Box::pin(store.create(drill_draft()));
        let mut cx = Context::from_waker(Waker::noop());
        // first poll applies the optimistic insert, then suspends on the request
        assert!(create.as_mut().poll(&mut cx).is_pending());
        assert_eq!(store.len(), 3);
        let pending = store.records();
        let drill = pending
            .iter()
            .find(|s| s.record.name == "Drill D1")
            .unwrap();
        assert_eq!(drill.sync, SyncStatus::Pending);

        create.await.unwrap();
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn create_replaces_temp_id_with_server_record() {
        let endpoint = Arc::new(MockEndpoint::new());
        let store = machinery_store(endpoint.clone());
        store.load().await;
        assert_eq!(store.len(), 2);

        let saved = store.create(drill_draft()).await.unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(saved.name, "Drill D1");
        // temp id replaced by the server-assigned one, no duplicates
        let matching: Vec<_> = store
            .items()
            .into_iter()
            .filter(|m| m.name == "Drill D1")
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].id, saved.id);
        assert_eq!(endpoint.remote_items().len(), 1);
    }

    #[tokio::test]
    async fn create_keeps_local_record_on_failure() {
        let endpoint = Arc::new(MockEndpoint::new());
        let store = machinery_store(endpoint.clone());
        store.load().await;
        endpoint.set_fail_create(true);

        let result = store.create(drill_draft()).await;

        // no rollback on create: the record stays, marked failed
        assert!(matches!(result, Err(StoreError::Api(_))));
        assert_eq!(store.len(), 3);
        let records = store.records();
        let drill = records
            .iter()
            .find(|s| s.record.name == "Drill D1")
            .unwrap();
        assert_eq!(drill.sync, SyncStatus::Failed);
        assert!(store.last_error().is_some());
    }

    #[tokio::test]
    async fn update_merges_and_preserves_absent_fields() {
        let store = machinery_store(Arc::new(MockEndpoint::with_remote(seed::machinery())));
        store.load().await;
        let before = store.get(2).unwrap();

        let mut patch = Patch::new();
        patch.insert("status".to_string(), "Working".into());
        let merged = store.update(2, patch).await.unwrap();

        assert_eq!(merged.status, MachineStatus::Working);
        // fields absent from the patch are preserved
        assert_eq!(merged.name, before.name);
        assert_eq!(merged.kind, before.kind);
        assert_eq!(merged.last_maintenance, before.last_maintenance);
    }

    #[tokio::test]
    async fn update_keeps_local_change_on_failure() {
        let endpoint = Arc::new(MockEndpoint::with_remote(seed::machinery()));
        let store = machinery_store(endpoint.clone());
        store.load().await;
        endpoint.set_fail_update(true);

        let mut patch = Patch::new();
        patch.insert("status".to_string(), "Working".into());
        let result = store.update(2, patch).await;

        assert!(result.is_err());
        assert_eq!(store.get(2).unwrap().status, MachineStatus::Working);
        let records = store.records();
        let crane = records.iter().find(|s| s.record.id() == 2).unwrap();
        assert_eq!(crane.sync, SyncStatus::Failed);
    }

    #[tokio::test]
    async fn update_ignores_id_and_rejects_unknown_fields() {
        let store = machinery_store(Arc::new(MockEndpoint::with_remote(seed::machinery())));
        store.load().await;

        let mut patch = Patch::new();
        patch.insert("id".to_string(), 999.into());
        patch.insert("name".to_string(), "Renamed".into());
        let merged = store.update(1, patch).await.unwrap();
        assert_eq!(merged.id, 1);
        assert_eq!(merged.name, "Renamed");

        let mut patch = Patch::new();
        patch.insert("horsepower".to_string(), 900.into());
        assert!(matches!(
            store.update(1, patch).await,
            Err(StoreError::Patch(_))
        ));
    }

    #[tokio::test]
    async fn remove_rolls_back_on_failure() {
        let endpoint = Arc::new(MockEndpoint::with_remote(seed::machinery()));
        let store = machinery_store(endpoint.clone());
        store.load().await;
        endpoint.set_fail_delete(true);
        let before = store.items();

        let result = store.remove(1).await;

        assert!(result.is_err());
        assert_eq!(store.items(), before);
        assert_eq!(endpoint.delete_calls(), 1);
    }

    #[tokio::test]
    async fn remove_deletes_locally_and_remotely_on_success() {
        let endpoint = Arc::new(MockEndpoint::with_remote(seed::machinery()));
        let store = machinery_store(endpoint.clone());
        store.load().await;

        store.remove(1).await.unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.get(1).is_none());
        assert_eq!(endpoint.remote_items().len(), 1);
    }

    #[tokio::test]
    async fn operations_on_unknown_id_do_not_hit_the_network() {
        let endpoint = Arc::new(MockEndpoint::with_remote(seed::machinery()));
        let store = machinery_store(endpoint.clone());
        store.load().await;

        assert!(matches!(
            store.update(999, Patch::new()).await,
            Err(StoreError::UnknownId(999))
        ));
        assert!(matches!(
            store.remove(999).await,
            Err(StoreError::UnknownId(999))
        ));
        assert_eq!(endpoint.update_calls(), 0);
        assert_eq!(endpoint.delete_calls(), 0);
    }

    #[tokio::test]
    async fn end_to_end_create_then_offline_keeps_three_items() {
        // Seed machinery has 2 entries; a create makes it 3 immediately and
        // a network failure must not shrink it back.
        let endpoint = Arc::new(MockEndpoint::new());
        endpoint.set_offline(true);
        let store = machinery_store(endpoint.clone());
        store.load().await;
        assert_eq!(store.len(), 2);

        let _ = store.create(drill_draft()).await;

        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn stale_load_response_is_discarded() {
        // Simulate a late-resolving load by settling an old generation after
        // a newer load already replaced the collection.
        let endpoint = Arc::new(MockEndpoint::with_remote(vec![drill_draft()]));
        let store = machinery_store(endpoint.clone());

        let first = store.load();
        let second = store.load();
        // Later generation settles; the earlier one must report stale from
        // whichever of the two futures loses the sequence race.
        let (a, b) = tokio::join!(first, second);

        let stale = [&a, &b]
            .iter()
            .filter(|s| matches!(s, LoadSource::Stale))
            .count();
        assert_eq!(stale, 1);
        assert_eq!(store.items(), vec![drill_draft()]);
        assert!(!store.is_loading());
    }

    #[test]
    fn temp_ids_are_distinct_and_non_negative() {
        let a = next_temp_id();
        let b = next_temp_id();
        assert_ne!(a, b);
        assert!(a >= 0 && b >= 0);
    }
}
