use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::config::HttpSettings;

use super::error::ClientError;

// Shared connection pool for transports built without explicit settings
static DEFAULT_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Seam between the list client and the wire. Production uses
/// [`HttpTransport`]; tests substitute an in-memory implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: Value) -> Result<Value, ClientError>;
    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value, ClientError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(settings: &HttpSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_else(|_| DEFAULT_CLIENT.clone());
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self { client: DEFAULT_CLIENT.clone() }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: Value) -> Result<Value, ClientError> {
        let response = self.client.post(url).json(&body).send().await?;
        decode(response).await
    }

    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value, ClientError> {
        let response = self.client.get(url).query(params).send().await?;
        decode(response).await
    }
}

async fn decode(response: reqwest::Response) -> Result<Value, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status { status: status.as_u16(), body });
    }
    response
        .json()
        .await
        .map_err(|err| ClientError::Decode(err.to_string()))
}
