use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filter::SortColumn;

/// Sentinel meaning "no estado tab selected".
pub const ESTADO_ALL: &str = "all";

/// Value held by one toolbar control: a text input or a multi-select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Multi(Vec<String>),
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text(value.into())
    }

    pub fn multi(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        FilterValue::Multi(values.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.is_empty(),
            FilterValue::Multi(v) => v.is_empty(),
        }
    }

    /// Comma-joined form used by the URL codec.
    pub fn to_param(&self) -> String {
        match self {
            FilterValue::Text(s) => s.clone(),
            FilterValue::Multi(v) => v.join(","),
        }
    }
}

/// User-editable filter inputs: the search box plus the configured
/// additional controls, keyed by filter name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolbarFilters {
    pub search: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, FilterValue>,
}

impl ToolbarFilters {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_value(mut self, name: impl Into<String>, value: FilterValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: FilterValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.values.get(name)
    }
}

/// Auxiliary filter dimension (the status tab). Commits immediately,
/// without the draft/apply step toolbar filters go through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraState {
    pub estado: String,
}

impl ExtraState {
    pub fn all() -> Self {
        Self { estado: ESTADO_ALL.to_string() }
    }

    pub fn estado(value: impl Into<String>) -> Self {
        Self { estado: value.into() }
    }

    pub fn is_all(&self) -> bool {
        self.estado == ESTADO_ALL
    }
}

impl Default for ExtraState {
    fn default() -> Self {
        Self::all()
    }
}

/// Complete filter state for one list view.
///
/// `toolbar_filters` is the draft shown in the inputs;
/// `applied_toolbar_filters` is what drives queries. They coincide right
/// after an apply.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub toolbar_filters: ToolbarFilters,
    pub applied_toolbar_filters: ToolbarFilters,
    pub extra_state: ExtraState,
    pub sort: Vec<SortColumn>,
    pub page: u32,
    pub page_size: u32,
    pub selected_id: Option<String>,
}

/// Partial state used for URL hydration; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch {
    pub toolbar_filters: Option<ToolbarFilters>,
    pub applied_toolbar_filters: Option<ToolbarFilters>,
    pub extra_state: Option<ExtraState>,
    pub sort: Option<Vec<SortColumn>>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub selected_id: Option<Option<String>>,
}

impl StatePatch {
    pub fn apply_to(&self, state: &mut FilterState) {
        if let Some(filters) = &self.toolbar_filters {
            state.toolbar_filters = filters.clone();
        }
        if let Some(filters) = &self.applied_toolbar_filters {
            state.applied_toolbar_filters = filters.clone();
        }
        if let Some(extra) = &self.extra_state {
            state.extra_state = extra.clone();
        }
        if let Some(sort) = &self.sort {
            state.sort = sort.clone();
        }
        if let Some(page) = self.page {
            state.page = page;
        }
        if let Some(page_size) = self.page_size {
            state.page_size = page_size.max(1);
        }
        if let Some(selected_id) = &self.selected_id {
            state.selected_id = selected_id.clone();
        }
    }
}
