pub mod actions;
pub mod config;
pub mod presets;
pub mod store;
pub mod types;

pub use actions::{Action, Notice};
pub use config::{FilterFieldConfig, FilterOperator, ListConfig, ValueTransform, DEFAULT_PAGE_SIZE};
pub use store::ListStore;
pub use types::{ExtraState, FilterState, FilterValue, StatePatch, ToolbarFilters, ESTADO_ALL};
