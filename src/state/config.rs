use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filter::{EnumCriterion, SortColumn, StringCriterion, WhereExpression};

use super::types::{ExtraState, FilterState, FilterValue, ToolbarFilters};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Backend operator an additional toolbar filter translates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    In,
    Contains,
    StartsWith,
    EndsWith,
}

/// Normalization applied to a filter value before it reaches the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueTransform {
    Uppercase,
    Lowercase,
    Trim,
}

impl ValueTransform {
    pub fn apply(&self, value: FilterValue) -> FilterValue {
        let map = |s: String| match self {
            ValueTransform::Uppercase => s.to_uppercase(),
            ValueTransform::Lowercase => s.to_lowercase(),
            ValueTransform::Trim => s.trim().to_string(),
        };
        match value {
            FilterValue::Text(s) => FilterValue::Text(map(s)),
            FilterValue::Multi(v) => FilterValue::Multi(v.into_iter().map(map).collect()),
        }
    }
}

/// How one additional toolbar filter maps onto a backend field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterFieldConfig {
    pub field: String,
    pub operator: FilterOperator,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<ValueTransform>,
}

impl FilterFieldConfig {
    pub fn new(field: impl Into<String>, operator: FilterOperator) -> Self {
        Self { field: field.into(), operator, transform: None }
    }

    pub fn with_transform(mut self, transform: ValueTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Empty draft value for this filter: multi-selects start as an empty
    /// list, everything else as an empty string.
    pub fn empty_value(&self) -> FilterValue {
        if self.operator == FilterOperator::In {
            FilterValue::Multi(vec![])
        } else {
            FilterValue::Text(String::new())
        }
    }

    pub fn to_condition(&self, value: FilterValue) -> WhereExpression {
        let value = match self.transform {
            Some(transform) => transform.apply(value),
            None => value,
        };
        let criterion = match (self.operator, value) {
            (FilterOperator::In, FilterValue::Multi(values)) => EnumCriterion::is_in(values).into(),
            (FilterOperator::In, FilterValue::Text(value)) => EnumCriterion::is_in([value]).into(),
            (FilterOperator::Equals, FilterValue::Text(value)) => {
                StringCriterion::equals(value).into()
            }
            (FilterOperator::Contains, FilterValue::Text(value)) => {
                StringCriterion::contains(value).into()
            }
            (FilterOperator::StartsWith, FilterValue::Text(value)) => {
                StringCriterion::starts_with(value).into()
            }
            (FilterOperator::EndsWith, FilterValue::Text(value)) => {
                StringCriterion::ends_with(value).into()
            }
            // A multi value under a scalar operator degrades to membership
            (_, FilterValue::Multi(values)) => EnumCriterion::is_in(values).into(),
        };
        WhereExpression::Condition { field: self.field.clone(), criterion }
    }
}

/// Entity-specific configuration: which fields the free-text search spans,
/// the additional filters, the estado discriminator, and the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    pub search_fields: Vec<String>,
    #[serde(default)]
    pub additional_filters: BTreeMap<String, FilterFieldConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado_field: Option<String>,
    pub default_sort: Vec<SortColumn>,
    pub default_page_size: u32,
}

impl ListConfig {
    pub fn new(
        search_fields: impl IntoIterator<Item = impl Into<String>>,
        default_sort: Vec<SortColumn>,
    ) -> Self {
        Self {
            search_fields: search_fields.into_iter().map(Into::into).collect(),
            additional_filters: BTreeMap::new(),
            estado_field: None,
            default_sort,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_filter(mut self, name: impl Into<String>, config: FilterFieldConfig) -> Self {
        self.additional_filters.insert(name.into(), config);
        self
    }

    pub fn with_estado_field(mut self, field: impl Into<String>) -> Self {
        self.estado_field = Some(field.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size.max(1);
        self
    }

    pub fn initial_toolbar_filters(&self) -> ToolbarFilters {
        let mut filters = ToolbarFilters::default();
        for (name, config) in &self.additional_filters {
            filters.values.insert(name.clone(), config.empty_value());
        }
        filters
    }

    pub fn initial_state(&self) -> FilterState {
        let toolbar = self.initial_toolbar_filters();
        FilterState {
            toolbar_filters: toolbar.clone(),
            applied_toolbar_filters: toolbar,
            extra_state: ExtraState::all(),
            sort: self.default_sort.clone(),
            page: 0,
            page_size: self.default_page_size,
            selected_id: None,
        }
    }
}
