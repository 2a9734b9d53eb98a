use crate::filter::{EnumCriterion, StringCriterion, WhereExpression};
use crate::state::{FilterState, ListConfig};

use super::{ListQuery, Pagination};

/// OR-group of `contains` conditions spanning the searchable fields. An
/// all-whitespace term counts as absent.
pub fn global_search(term: &str, fields: &[String]) -> Option<WhereExpression> {
    let term = term.trim();
    if term.is_empty() || fields.is_empty() {
        return None;
    }
    WhereExpression::any_of(
        fields
            .iter()
            .map(|field| WhereExpression::condition(field.clone(), StringCriterion::contains(term)))
            .collect(),
    )
}

/// Folds the committed filter state into one backend request: search group,
/// additional filters, estado discriminator, then pagination (translated to
/// one-based) and sort.
pub fn build_list_query(config: &ListConfig, state: &FilterState) -> ListQuery {
    let mut conditions = Vec::new();

    if let Some(search) = global_search(&state.applied_toolbar_filters.search, &config.search_fields)
    {
        conditions.push(search);
    }

    for (name, filter_config) in &config.additional_filters {
        let value = match state.applied_toolbar_filters.get(name) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => continue,
        };
        conditions.push(filter_config.to_condition(value));
    }

    if let Some(estado_field) = &config.estado_field {
        if !state.extra_state.is_all() {
            conditions.push(WhereExpression::condition(
                estado_field.clone(),
                EnumCriterion::equals(state.extra_state.estado.clone()),
            ));
        }
    }

    ListQuery {
        where_clause: WhereExpression::all_of(conditions),
        pagination: Pagination { page: state.page + 1, page_size: state.page_size },
        sort: Some(state.sort.clone()),
    }
}
