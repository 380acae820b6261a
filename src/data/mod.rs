//! On-disk persistence: JSON helpers and the data directory layout.

mod json;
mod store;

pub use json::{StoreError, load_json, save_json};
pub use store::Store;
pub(crate) use store::result_timestamp;
