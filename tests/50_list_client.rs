mod common;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gridstate::client::{ClientError, ListBinding, ListClient, SummaryRequest, Transport};
use gridstate::{ListStore, Pagination};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct Usuario {
    id: String,
    nombres: String,
}

/// In-memory transport: scripted responses, recorded calls.
struct StubTransport {
    responses: Mutex<VecDeque<Result<Value, ClientError>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl StubTransport {
    fn new(responses: impl IntoIterator<Item = Result<Value, ClientError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next_response(&self) -> Result<Value, ClientError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("stub exhausted".to_string())))
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn post_json(&self, url: &str, body: Value) -> Result<Value, ClientError> {
        self.calls.lock().unwrap().push((url.to_string(), body));
        self.next_response()
    }

    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value, ClientError> {
        let recorded = json!(params
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect::<std::collections::BTreeMap<_, _>>());
        self.calls.lock().unwrap().push((url.to_string(), recorded));
        self.next_response()
    }
}

fn page_payload(ids: &[&str]) -> Value {
    json!({
        "data": ids.iter().map(|id| json!({"id": id, "nombres": format!("Usuario {id}")})).collect::<Vec<_>>(),
        "total": ids.len(),
        "inicio": 1,
        "fin": ids.len(),
        "totalPages": 1,
        "hasNextPage": false,
        "hasPrevPage": false,
        "currentPage": 1,
    })
}

fn store() -> ListStore {
    common::init_tracing();
    ListStore::new(common::usuario_config())
}

#[tokio::test]
async fn list_round_trips_the_wire_contract() {
    let transport = StubTransport::new([Ok(page_payload(&["u-1", "u-2"]))]);
    let client = ListClient::with_transport("http://api.local/v1", transport.clone());
    let binding: ListBinding<Usuario> = ListBinding::new(client, "/usuarios/lista");

    let view = binding.fetch(&store().query()).await;
    assert!(!view.is_error());
    assert_eq!(view.response.total, 2);
    assert_eq!(view.response.data[0].nombres, "Usuario u-1");

    let (url, body) = transport.calls.lock().unwrap()[0].clone();
    assert_eq!(url, "http://api.local/v1/usuarios/lista");
    assert_eq!(body["pagination"], json!({"page": 1, "pageSize": 10}));
}

#[tokio::test]
async fn identical_queries_are_served_from_the_cache() {
    let transport = StubTransport::new([Ok(page_payload(&["u-1"]))]);
    let client = ListClient::with_transport("http://api.local", transport.clone());
    let binding: ListBinding<Usuario> = ListBinding::new(client, "usuarios/lista");
    let store = store();

    let first = binding.fetch(&store.query()).await;
    let second = binding.fetch(&store.query()).await;
    assert_eq!(transport.call_count(), 1);
    assert_eq!(first.response.data, second.response.data);

    // A different query misses the cache
    store.set_page(1);
    let _ = binding.fetch(&store.query()).await;
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn refetch_bypasses_and_refreshes_the_cache() {
    let transport = StubTransport::new([
        Ok(page_payload(&["u-1"])),
        Ok(page_payload(&["u-1", "u-2"])),
    ]);
    let client = ListClient::with_transport("http://api.local", transport.clone());
    let binding: ListBinding<Usuario> = ListBinding::new(client, "usuarios/lista");
    let store = store();

    let _ = binding.fetch(&store.query()).await;
    let refreshed = binding.refetch(&store.query()).await;
    assert_eq!(transport.call_count(), 2);
    assert_eq!(refreshed.response.total, 2);

    // The refreshed window replaces the cached one
    let cached = binding.fetch(&store.query()).await;
    assert_eq!(transport.call_count(), 2);
    assert_eq!(cached.response.total, 2);
}

#[tokio::test]
async fn failures_surface_as_values_with_stale_data() {
    let transport = StubTransport::new([
        Ok(page_payload(&["u-1"])),
        Err(ClientError::Status { status: 502, body: "bad gateway".to_string() }),
    ]);
    let client = ListClient::with_transport("http://api.local", transport.clone());
    let binding: ListBinding<Usuario> = ListBinding::new(client, "usuarios/lista");
    let store = store();

    let ok = binding.refetch(&store.query()).await;
    assert!(!ok.is_error());

    let degraded = binding.refetch(&store.query()).await;
    assert!(degraded.is_error());
    // Stale data keeps rendering while the error is toasted
    assert_eq!(degraded.response.data, ok.response.data);
    assert_eq!(
        degraded.error,
        Some(ClientError::Status { status: 502, body: "bad gateway".to_string() })
    );
}

#[tokio::test]
async fn a_failure_with_no_history_degrades_to_an_empty_window() {
    let transport =
        StubTransport::new([Err(ClientError::Transport("connection refused".to_string()))]);
    let client = ListClient::with_transport("http://api.local", transport);
    let binding: ListBinding<Usuario> = ListBinding::new(client, "usuarios/lista");

    let view = binding.fetch(&store().query()).await;
    assert!(view.is_error());
    assert!(view.response.data.is_empty());
    assert_eq!(view.response.current_page, 1);
}

#[tokio::test]
async fn detail_unwraps_the_entity_key() {
    let transport =
        StubTransport::new([Ok(json!({"usuario": {"id": "u-7", "nombres": "Mariana"}}))]);
    let client = ListClient::with_transport("http://api.local", transport.clone());

    let usuario: Usuario = client.detail("usuarios/detalle", "usuario", "u-7").await.unwrap();
    assert_eq!(usuario, Usuario { id: "u-7".to_string(), nombres: "Mariana".to_string() });

    let (_, params) = transport.calls.lock().unwrap()[0].clone();
    assert_eq!(params, json!({"id": "u-7"}));
}

#[tokio::test]
async fn detail_with_a_missing_key_is_a_decode_error() {
    let transport = StubTransport::new([Ok(json!({"otra_cosa": {}}))]);
    let client = ListClient::with_transport("http://api.local", transport);

    let result = client.detail::<Usuario>("usuarios/detalle", "usuario", "u-7").await;
    assert!(matches!(result, Err(ClientError::Decode(_))));
}

#[tokio::test]
async fn summary_counts_group_by_estado() {
    let transport = StubTransport::new([Ok(json!({
        "total": 40,
        "groups": [
            {"group": "ACTIVO", "count": 30},
            {"group": "INACTIVO", "count": 10},
        ],
    }))]);
    let client = ListClient::with_transport("http://api.local", transport.clone());

    let summary = client
        .summary("usuarios/resumen", &SummaryRequest::group_by("estado"))
        .await
        .unwrap();
    assert_eq!(summary.total, 40);
    let items = summary.items();
    assert_eq!(items[0].percentage, 75);

    let (_, body) = transport.calls.lock().unwrap()[0].clone();
    assert_eq!(body, json!({"groupBy": "estado"}));
}

#[tokio::test]
async fn verify_selection_against_a_fetched_page() {
    let transport = StubTransport::new([Ok(page_payload(&["u-1", "u-2"]))]);
    let client = ListClient::with_transport("http://api.local", transport);
    let binding: ListBinding<Usuario> = ListBinding::new(client, "usuarios/lista");
    let store = store();
    store.set_selected_id(Some("u-9".to_string()));

    let view = binding.fetch(&store.query()).await;
    let ids: Vec<String> = view.response.data.iter().map(|u| u.id.clone()).collect();
    let notice = store.verify_selection(ids, true);
    assert!(notice.is_some());
    assert_eq!(store.snapshot().selected_id, None);
}

#[test]
fn query_keys_are_stable_and_query_sensitive() {
    let store = store();
    let a = gridstate::client::query_key(&store.query());
    let b = gridstate::client::query_key(&store.query());
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);

    store.set_page(1);
    assert_ne!(a, gridstate::client::query_key(&store.query()));
}

#[test]
fn paginate_matches_the_backend_window_shape() {
    let data: Vec<u32> = (1..=42).collect();
    let page = gridstate::paginate(&data, &Pagination { page: 5, page_size: 10 });
    assert_eq!(page.data, vec![41, 42]);
    assert_eq!(page.inicio, 41);
    assert_eq!(page.fin, 42);
    assert_eq!(page.total_pages, 5);
    assert!(!page.has_next_page);
    assert!(page.has_prev_page);
}
