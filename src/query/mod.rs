pub mod builder;
pub mod paginate;

pub use builder::{build_list_query, global_search};
pub use paginate::paginate;

use serde::{Deserialize, Serialize};

use crate::filter::{SortColumn, WhereExpression};

/// Backend pagination window, one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

/// Request body for the list endpoint:
/// `{ where?, pagination: {page, pageSize}, sort? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<WhereExpression>,
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<SortColumn>>,
}

/// Paginated list response as the backend returns it. `inicio`/`fin` are
/// the one-based indices of the window edges within the filtered total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub inicio: u64,
    pub fin: u64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub current_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_sort: Option<Vec<SortColumn>>,
}

impl<T> ListResponse<T> {
    /// Empty window, used before the first fetch and as the degraded shape
    /// when a fetch fails with no stale data to show.
    pub fn empty() -> Self {
        Self {
            data: vec![],
            total: 0,
            inicio: 0,
            fin: 0,
            total_pages: 0,
            has_next_page: false,
            has_prev_page: false,
            current_page: 1,
            applied_sort: None,
        }
    }
}
