use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::config::HttpSettings;
use crate::query::{ListQuery, ListResponse};

use super::error::ClientError;
use super::summary::{SummaryRequest, SummaryResponse};
use super::transport::{HttpTransport, Transport};

/// Thin HTTP client for the list/detail/summary endpoints.
#[derive(Clone)]
pub struct ListClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl ListClient {
    pub fn new(settings: &HttpSettings) -> Self {
        Self::with_transport(&settings.base_url, Arc::new(HttpTransport::new(settings)))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self { transport, base_url: base_url.trim_end_matches('/').to_string() }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &ListQuery,
    ) -> Result<ListResponse<T>, ClientError> {
        let body = serde_json::to_value(query).map_err(|e| ClientError::Decode(e.to_string()))?;
        let payload = self.transport.post_json(&self.url(endpoint), body).await?;
        serde_json::from_value(payload).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Detail lookup: `GET endpoint?id=…` answering `{ "<entity>": {…} }`.
    pub async fn detail<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        entity_key: &str,
        id: &str,
    ) -> Result<T, ClientError> {
        let payload = self
            .transport
            .get_json(&self.url(endpoint), &[("id", id.to_string())])
            .await?;
        let entity = payload.get(entity_key).cloned().ok_or_else(|| {
            ClientError::Decode(format!("detail payload is missing the `{entity_key}` key"))
        })?;
        serde_json::from_value(entity).map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn summary(
        &self,
        endpoint: &str,
        request: &SummaryRequest,
    ) -> Result<SummaryResponse, ClientError> {
        let body = serde_json::to_value(request).map_err(|e| ClientError::Decode(e.to_string()))?;
        let payload = self.transport.post_json(&self.url(endpoint), body).await?;
        serde_json::from_value(payload).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// List result handed to the view layer. Errors ride along as a value next
/// to the last known good window; nothing is thrown at the render path.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    pub response: ListResponse<T>,
    pub error: Option<ClientError>,
}

impl<T> ListView<T> {
    fn fresh(response: ListResponse<T>) -> Self {
        Self { response, error: None }
    }

    fn degraded(stale: Option<ListResponse<T>>, error: ClientError) -> Self {
        Self { response: stale.unwrap_or_else(ListResponse::empty), error: Some(error) }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Binds one endpoint to the query builder's output, de-duplicating fetches
/// by a stable key derived from the query. There is no ambient
/// revalidation: a cached window stays current until the query changes or
/// [`refetch`](Self::refetch) is called explicitly.
pub struct ListBinding<T> {
    client: ListClient,
    endpoint: String,
    cache: Mutex<HashMap<String, ListResponse<T>>>,
    last_good: Mutex<Option<ListResponse<T>>>,
}

impl<T: DeserializeOwned + Clone> ListBinding<T> {
    pub fn new(client: ListClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            cache: Mutex::new(HashMap::new()),
            last_good: Mutex::new(None),
        }
    }

    pub async fn fetch(&self, query: &ListQuery) -> ListView<T> {
        let key = query_key(query);
        let cached = self.lock_cache().get(&key).cloned();
        if let Some(hit) = cached {
            tracing::debug!(key = %key, "list cache hit");
            return ListView::fresh(hit);
        }
        self.load(key, query).await
    }

    /// Bypasses and refreshes the cache for this query.
    pub async fn refetch(&self, query: &ListQuery) -> ListView<T> {
        self.load(query_key(query), query).await
    }

    async fn load(&self, key: String, query: &ListQuery) -> ListView<T> {
        match self.client.list::<T>(&self.endpoint, query).await {
            Ok(response) => {
                self.lock_cache().insert(key, response.clone());
                *self.lock_last_good() = Some(response.clone());
                ListView::fresh(response)
            }
            Err(error) => {
                tracing::warn!(error = %error, endpoint = %self.endpoint, "list fetch failed");
                ListView::degraded(self.lock_last_good().clone(), error)
            }
        }
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, ListResponse<T>>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_last_good(&self) -> std::sync::MutexGuard<'_, Option<ListResponse<T>>> {
        self.last_good.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Stable cache key: SHA-256 over the canonical JSON of the query.
pub fn query_key(query: &ListQuery) -> String {
    let canonical = serde_json::to_string(query).unwrap_or_default();
    let digest = Sha256::digest(canonical.as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}
