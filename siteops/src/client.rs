use reqwest::{Client, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Transport-level failure talking to the backend.
///
/// Payloads are plain strings so the error can be cloned into a store's
/// `last_error` slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("failed to parse response: {0}")]
    Parse(String),
}

/// Thin wrapper over a shared reqwest [`Client`] with one configurable base
/// URL for every entity endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.endpoint(path)?)
            .send()
            .await
            .map_err(|e| ApiError::Unreachable(e.to_string()))?;
        let response = check_status(response)?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Unreachable(e.to_string()))?;
        let response = check_status(response)?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// PUT with a JSON body; any 2xx counts as success, body ignored.
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.endpoint(path)?)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Unreachable(e.to_string()))?;
        let response = check_status(response)?;
        let _ = response.bytes().await;

        Ok(())
    }

    /// DELETE; any 2xx counts as success, empty body expected.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.endpoint(path)?)
            .send()
            .await
            .map_err(|e| ApiError::Unreachable(e.to_string()))?;
        let response = check_status(response)?;
        let _ = response.bytes().await;

        Ok(())
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(response.status().as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_doubled_slashes() {
        let client = ApiClient::new("http://localhost:5000/").unwrap();
        let url = client.endpoint("/api/projects").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/projects");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
