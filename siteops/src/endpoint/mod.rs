mod mock;

pub use mock::MockEndpoint;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::{ApiClient, ApiError};
use crate::domain::{Entity, EntityId};

/// Outbound port for one entity collection.
///
/// [`EntityStore`](crate::store::EntityStore) only talks to the backend
/// through this trait, so tests swap in a [`MockEndpoint`] and the CLI uses
/// [`RestEndpoint`] over a shared [`ApiClient`].
#[async_trait]
pub trait EntityEndpoint<T: Entity>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<T>, ApiError>;
    async fn create(&self, draft: &T) -> Result<T, ApiError>;
    async fn update(&self, id: EntityId, record: &T) -> Result<(), ApiError>;
    async fn delete(&self, id: EntityId) -> Result<(), ApiError>;
}

/// REST implementation of [`EntityEndpoint`] under `/api/<entity>`.
pub struct RestEndpoint {
    client: ApiClient,
    path: String,
}

impl RestEndpoint {
    pub fn new(client: ApiClient, entity_path: &str) -> Self {
        Self {
            client,
            path: format!("api/{entity_path}"),
        }
    }

    fn item_path(&self, id: EntityId) -> String {
        format!("{}/{}", self.path, id)
    }
}

#[async_trait]
impl<T: Entity> EntityEndpoint<T> for RestEndpoint {
    async fn fetch_all(&self) -> Result<Vec<T>, ApiError> {
        self.client.get_json(&self.path).await
    }

    async fn create(&self, draft: &T) -> Result<T, ApiError> {
        // POST body is the draft without the local temp id; the server
        // assigns the permanent one.
        let mut body = serde_json::to_value(draft).map_err(|e| ApiError::Parse(e.to_string()))?;
        if let Value::Object(fields) = &mut body {
            fields.remove("id");
        }

        self.client.post_json(&self.path, &body).await
    }

    async fn update(&self, id: EntityId, record: &T) -> Result<(), ApiError> {
        self.client.put_json(&self.item_path(id), record).await
    }

    async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        self.client.delete(&self.item_path(id)).await
    }
}
