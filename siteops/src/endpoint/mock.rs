//! Mock endpoint implementation for testing stores without a backend.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::EntityEndpoint;
use crate::client::ApiError;
use crate::domain::{Entity, EntityId};

/// Scriptable in-memory stand-in for the backend.
///
/// Holds its own "remote" collection, assigns server-style ids on create,
/// and can be switched to fail any subset of operations. Call counts are
/// recorded so tests can assert how many requests a store issued.
///
/// # Examples
///
/// ```ignore
/// let endpoint = Arc::new(MockEndpoint::with_remote(seed::machinery()));
/// endpoint.set_fail_delete(true);
/// let store = EntityStore::new(endpoint.clone(), seed::machinery());
/// ```
pub struct MockEndpoint<T> {
    remote: Mutex<Vec<T>>,
    next_id: AtomicI64,
    fail_fetch: AtomicBool,
    fail_create: AtomicBool,
    fail_update: AtomicBool,
    fail_delete: AtomicBool,
    fetch_calls: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl<T: Entity> MockEndpoint<T> {
    pub fn new() -> Self {
        Self::with_remote(Vec::new())
    }

    pub fn with_remote(items: Vec<T>) -> Self {
        let next_id = items.iter().map(|r| r.id()).max().unwrap_or(0) + 1000;
        Self {
            remote: Mutex::new(items),
            next_id: AtomicI64::new(next_id),
            fail_fetch: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
            fail_update: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            fetch_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// Make every operation fail, as if the backend were offline.
    pub fn set_offline(&self, offline: bool) {
        self.fail_fetch.store(offline, Ordering::SeqCst);
        self.fail_create.store(offline, Ordering::SeqCst);
        self.fail_update.store(offline, Ordering::SeqCst);
        self.fail_delete.store(offline, Ordering::SeqCst);
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    /// Current remote-side collection.
    pub fn remote_items(&self) -> Vec<T> {
        self.remote.lock().expect("mock remote lock poisoned").clone()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn offline_err() -> ApiError {
        ApiError::Unreachable("mock endpoint offline".to_string())
    }
}

impl<T: Entity> Default for MockEndpoint<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> EntityEndpoint<T> for MockEndpoint<T> {
    async fn fetch_all(&self) -> Result<Vec<T>, ApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        // One suspension point per request, like a real call settling later.
        tokio::task::yield_now().await;
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(Self::offline_err());
        }

        Ok(self.remote_items())
    }

    async fn create(&self, draft: &T) -> Result<T, ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(Self::offline_err());
        }

        let mut saved = draft.clone();
        saved.set_id(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.remote
            .lock()
            .expect("mock remote lock poisoned")
            .push(saved.clone());

        Ok(saved)
    }

    async fn update(&self, id: EntityId, record: &T) -> Result<(), ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(Self::offline_err());
        }

        let mut remote = self.remote.lock().expect("mock remote lock poisoned");
        match remote.iter_mut().find(|r| r.id() == id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(ApiError::Status(404)),
        }
    }

    async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::offline_err());
        }

        let mut remote = self.remote.lock().expect("mock remote lock poisoned");
        let before = remote.len();
        remote.retain(|r| r.id() != id);
        if remote.len() == before {
            return Err(ApiError::Status(404));
        }

        Ok(())
    }
}
