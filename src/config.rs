use serde::{Deserialize, Serialize};
use std::env;

/// Crate-level settings. Plain data handed to constructors — there is no
/// process-wide singleton; each list view wires its own instances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub sync: SyncSettings,
    pub http: HttpSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    pub enable_url_sync: bool,
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self { enable_url_sync: true, debounce_ms: 300 }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { base_url: "http://localhost:3000".to_string(), timeout_secs: 30 }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("GRIDSTATE_URL_SYNC") {
            self.sync.enable_url_sync = v.parse().unwrap_or(self.sync.enable_url_sync);
        }
        if let Ok(v) = env::var("GRIDSTATE_URL_SYNC_DEBOUNCE_MS") {
            self.sync.debounce_ms = v.parse().unwrap_or(self.sync.debounce_ms);
        }
        if let Ok(v) = env::var("GRIDSTATE_BASE_URL") {
            self.http.base_url = v;
        }
        if let Ok(v) = env::var("GRIDSTATE_HTTP_TIMEOUT_SECS") {
            self.http.timeout_secs = v.parse().unwrap_or(self.http.timeout_secs);
        }
        self
    }
}
