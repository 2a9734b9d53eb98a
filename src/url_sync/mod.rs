pub mod driver;
pub mod params;

pub use driver::{HistoryBackend, UrlSync};
pub use params::{decode_params, encode_state};
