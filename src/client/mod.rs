pub mod error;
pub mod list;
pub mod summary;
pub mod transport;

pub use error::ClientError;
pub use list::{query_key, ListBinding, ListClient, ListView};
pub use summary::{
    find_by_label, total_for_labels, SummaryGroup, SummaryItem, SummaryRequest, SummaryResponse,
    UNCLASSIFIED_LABEL,
};
pub use transport::{HttpTransport, Transport};
