mod common;

use gridstate::{build_list_query, ExtraState, FilterValue, ListStore, WhereExpression};
use serde_json::json;

fn store() -> ListStore {
    common::init_tracing();
    ListStore::new(common::usuario_config())
}

#[test]
fn default_state_emits_no_where_clause() {
    let store = store();
    let query = store.query();
    assert!(query.where_clause.is_none());
    assert_eq!(query.pagination.page, 1);
    assert_eq!(query.pagination.page_size, 10);
    assert_eq!(
        serde_json::to_value(&query).unwrap(),
        json!({
            "pagination": {"page": 1, "pageSize": 10},
            "sort": [{"column": "nombres", "direction": "asc"}],
        })
    );
}

#[test]
fn a_single_condition_is_not_wrapped() {
    let store = store();
    store.set_extra_state(ExtraState::estado("ACTIVO"));
    let query = store.query();
    assert_eq!(
        serde_json::to_value(query.where_clause.unwrap()).unwrap(),
        json!({"estado": {"equals": "ACTIVO"}})
    );
}

#[test]
fn search_spans_every_configured_field_as_one_or_group() {
    let store = store();
    store.apply_toolbar_filters(store.snapshot().toolbar_filters.with_search("ana"));
    let query = store.query();
    // The OR group is the only condition, so it is used directly
    assert_eq!(
        serde_json::to_value(query.where_clause.unwrap()).unwrap(),
        json!({"OR": [
            {"nombres": {"contains": "ana"}},
            {"apellidos": {"contains": "ana"}},
            {"email": {"contains": "ana"}},
            {"dni": {"contains": "ana"}},
        ]})
    );
}

#[test]
fn combined_filters_build_the_full_request() {
    let store = store();
    store.apply_toolbar_filters(
        store
            .snapshot()
            .toolbar_filters
            .with_search("ana")
            .with_value("tipo", FilterValue::multi(["SUPERADMIN"])),
    );
    let query = store.query();
    assert_eq!(
        serde_json::to_value(&query).unwrap(),
        json!({
            "where": {"AND": [
                {"OR": [
                    {"nombres": {"contains": "ana"}},
                    {"apellidos": {"contains": "ana"}},
                    {"email": {"contains": "ana"}},
                    {"dni": {"contains": "ana"}},
                ]},
                {"tipo": {"in": ["SUPERADMIN"]}},
            ]},
            "pagination": {"page": 1, "pageSize": 10},
            "sort": [{"column": "nombres", "direction": "asc"}],
        })
    );
}

#[test]
fn pagination_is_translated_to_one_based() {
    let store = store();
    store.set_page(4);
    let query = store.query();
    assert_eq!(query.pagination.page, 5);
    assert_eq!(query.pagination.page_size, 10);
}

#[test]
fn whitespace_search_terms_are_treated_as_absent() {
    let store = store();
    store.apply_toolbar_filters(store.snapshot().toolbar_filters.with_search("   "));
    assert!(store.query().where_clause.is_none());
}

#[test]
fn empty_multi_values_are_skipped() {
    let store = store();
    store.apply_toolbar_filters(
        store.snapshot().toolbar_filters.with_value("tipo", FilterValue::multi(Vec::<String>::new())),
    );
    assert!(store.query().where_clause.is_none());
}

#[test]
fn the_all_estado_sentinel_adds_no_condition() {
    let store = store();
    store.set_extra_state(ExtraState::all());
    assert!(store.query().where_clause.is_none());
}

#[test]
fn draft_values_never_reach_the_query() {
    let store = store();
    store.set_toolbar_filters(store.snapshot().toolbar_filters.with_search("ana"));
    assert!(store.query().where_clause.is_none());
}

#[test]
fn built_queries_evaluate_in_memory_too() {
    let store = store();
    store.apply_toolbar_filters(
        store
            .snapshot()
            .toolbar_filters
            .with_search("ana")
            .with_value("tipo", FilterValue::multi(["SUPERADMIN", "ALCALDE"])),
    );
    let where_clause = store.query().where_clause.unwrap();
    assert!(where_clause.matches(&json!({
        "nombres": "Mariana", "apellidos": "Quispe", "email": "mq@example.pe",
        "dni": "40123456", "tipo": "ALCALDE",
    })));
    assert!(!where_clause.matches(&json!({
        "nombres": "Mariana", "apellidos": "Quispe", "email": "mq@example.pe",
        "dni": "40123456", "tipo": "REGIDOR",
    })));
}

#[test]
fn build_list_query_matches_the_store_wrapper() {
    let store = store();
    store.set_page(2);
    let direct = build_list_query(store.config(), &store.snapshot());
    assert_eq!(direct, store.query());
}

#[test]
fn global_search_collapses_a_single_field() {
    let fields = vec!["nombre".to_string()];
    let expr = gridstate::query::global_search("ana", &fields).unwrap();
    assert!(matches!(expr, WhereExpression::Condition { .. }));
}
