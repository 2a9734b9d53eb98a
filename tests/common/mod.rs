#![allow(dead_code)]

use std::sync::Once;

use gridstate::state::{FilterFieldConfig, FilterOperator, ListConfig};
use gridstate::SortColumn;

static TRACING: Once = Once::new();

/// Install a test subscriber once per process; repeated calls are no-ops.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// The usuario list as the views configure it: free text over the person
/// fields, a tipo multi-select, estado tabs, nombres ascending by default.
pub fn usuario_config() -> ListConfig {
    ListConfig::new(
        ["nombres", "apellidos", "email", "dni"],
        vec![SortColumn::asc("nombres")],
    )
    .with_filter("tipo", FilterFieldConfig::new("tipo", FilterOperator::In))
    .with_estado_field("estado")
}
