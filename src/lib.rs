pub mod client;
pub mod config;
pub mod filter;
pub mod query;
pub mod state;
pub mod url_sync;

pub use client::{ClientError, ListBinding, ListClient, ListView};
pub use filter::{
    BoolCriterion, DateCriterion, EnumCriterion, FilterCriterion, NumberCriterion, SortColumn,
    SortDirection, StringCriterion, WhereExpression,
};
pub use query::{build_list_query, paginate, ListQuery, ListResponse, Pagination};
pub use state::{
    Action, ExtraState, FilterState, FilterValue, ListConfig, ListStore, Notice, ToolbarFilters,
};
pub use url_sync::{HistoryBackend, UrlSync};
