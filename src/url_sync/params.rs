use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::filter::{format_sort_param, parse_sort_param};
use crate::state::{
    ExtraState, FilterOperator, FilterState, FilterValue, ListConfig, StatePatch, ESTADO_ALL,
};

/// Serializes state to a query string, emitting a parameter only when the
/// value differs from its default so URLs stay minimal and stable.
pub fn encode_state(config: &ListConfig, state: &FilterState) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());

    let search = state.applied_toolbar_filters.search.trim();
    if !search.is_empty() {
        params.append_pair("search", search);
    }

    for name in config.additional_filters.keys() {
        if let Some(value) = state.applied_toolbar_filters.get(name) {
            if !value.is_empty() {
                params.append_pair(name, &value.to_param());
            }
        }
    }

    if !state.extra_state.is_all() {
        params.append_pair("estado", &state.extra_state.estado);
    }

    if let Some(selected_id) = &state.selected_id {
        params.append_pair("selectedId", selected_id);
    }

    if state.page > 0 {
        params.append_pair("page", &state.page.to_string());
    }

    if state.page_size != config.default_page_size {
        params.append_pair("pageSize", &state.page_size.to_string());
    }

    if state.sort != config.default_sort {
        params.append_pair("sort", &format_sort_param(&state.sort));
    }

    params.finish()
}

/// Parses a query string back into a state patch. Only recognized keys are
/// honored; malformed values fall back silently to the configured defaults.
/// Parsed toolbar values seed both the draft and the applied filters.
pub fn decode_params(config: &ListConfig, query: &str) -> StatePatch {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs: BTreeMap<String, String> =
        form_urlencoded::parse(query.as_bytes()).into_owned().collect();

    for key in pairs.keys() {
        if !is_recognized_key(config, key) {
            tracing::debug!(key = %key, "ignoring unrecognized url parameter");
        }
    }

    let mut toolbar = config.initial_toolbar_filters();
    if let Some(search) = pairs.get("search") {
        toolbar.search = search.trim().to_string();
    }
    for (name, filter_config) in &config.additional_filters {
        if let Some(raw) = pairs.get(name) {
            let value = if filter_config.operator == FilterOperator::In {
                FilterValue::Multi(
                    raw.split(',').filter(|v| !v.is_empty()).map(str::to_string).collect(),
                )
            } else {
                FilterValue::Text(raw.clone())
            };
            toolbar.set(name.clone(), value);
        }
    }

    let estado =
        pairs.get("estado").cloned().unwrap_or_else(|| ESTADO_ALL.to_string());
    let selected_id = pairs.get("selectedId").filter(|id| !id.is_empty()).cloned();
    let page = pairs.get("page").and_then(|raw| raw.parse::<u32>().ok()).unwrap_or(0);
    let page_size = pairs
        .get("pageSize")
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|size| *size >= 1)
        .unwrap_or(config.default_page_size);
    let sort = pairs
        .get("sort")
        .map(|raw| parse_sort_param(raw, &config.default_sort))
        .unwrap_or_else(|| config.default_sort.clone());

    StatePatch {
        toolbar_filters: Some(toolbar.clone()),
        applied_toolbar_filters: Some(toolbar),
        extra_state: Some(ExtraState { estado }),
        sort: Some(sort),
        page: Some(page),
        page_size: Some(page_size),
        selected_id: Some(selected_id),
    }
}

fn is_recognized_key(config: &ListConfig, key: &str) -> bool {
    matches!(key, "search" | "estado" | "selectedId" | "page" | "pageSize" | "sort")
        || config.additional_filters.contains_key(key)
}
