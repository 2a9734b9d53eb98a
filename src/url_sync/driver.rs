use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::SyncSettings;
use crate::state::{Action, ListStore};

use super::params::{decode_params, encode_state};

/// Where the query string lives. Browser hosts map this onto
/// `history.replaceState`; tests and native hosts provide their own.
pub trait HistoryBackend: Send + Sync + 'static {
    /// Current query string, with or without the leading `?`.
    fn current_query(&self) -> String;
    /// Replaces the query string in place (non-pushing navigation).
    fn replace_query(&self, query: &str);
}

/// Keeps one store and one history backend in sync for the lifetime of a
/// list view: hydrates from the URL on attach, debounces state changes into
/// `replace_query` calls, and re-hydrates on navigation events (the
/// back/forward analogue). Dropping the handle cancels the pending write
/// and the subscription.
pub struct UrlSync {
    task: JoinHandle<()>,
}

impl UrlSync {
    pub fn attach(
        store: Arc<ListStore>,
        backend: Arc<dyn HistoryBackend>,
        mut navigation: mpsc::Receiver<String>,
        settings: SyncSettings,
    ) -> Self {
        // Hydrate exactly once, strictly before the writer can observe any
        // change, so the initial URL read is never clobbered by a
        // default-state writeback.
        let initial_query = normalize(&backend.current_query());
        store.dispatch(Action::InitializeFromUrl(decode_params(store.config(), &initial_query)));

        let mut rx = store.subscribe();
        let debounce = Duration::from_millis(settings.debounce_ms);
        let write_enabled = settings.enable_url_sync;

        let task = tokio::spawn(async move {
            let mut last_written = initial_query;
            let mut nav_open = true;
            let mut armed = false;
            let timer = tokio::time::sleep(Duration::ZERO);
            tokio::pin!(timer);

            loop {
                tokio::select! {
                    changed = rx.changed() => match changed {
                        // Cancel the pending write and reschedule
                        Ok(()) if write_enabled => {
                            timer.as_mut().reset(Instant::now() + debounce);
                            armed = true;
                        }
                        Ok(()) => {}
                        // Store dropped: the view unmounted
                        Err(_) => break,
                    },
                    _ = &mut timer, if armed => {
                        armed = false;
                        let state = rx.borrow_and_update().clone();
                        let encoded = encode_state(store.config(), &state);
                        if encoded != last_written {
                            tracing::debug!(query = %encoded, "replacing url query string");
                            backend.replace_query(&encoded);
                            last_written = encoded;
                        }
                    },
                    nav = navigation.recv(), if nav_open => match nav {
                        Some(query) => {
                            let query = normalize(&query);
                            last_written.clone_from(&query);
                            store.dispatch(Action::InitializeFromUrl(decode_params(
                                store.config(),
                                &query,
                            )));
                        }
                        None => nav_open = false,
                    },
                }
            }
        });

        Self { task }
    }

    /// Explicit unmount. Equivalent to dropping the handle.
    pub fn detach(self) {}
}

impl Drop for UrlSync {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn normalize(query: &str) -> String {
    query.strip_prefix('?').unwrap_or(query).to_string()
}
