pub mod config;
pub mod json_store;
pub mod m3u;

pub use config::StorageConfig;
pub use json_store::JsonLibraryStore;
pub use m3u::{export_m3u, write_m3u};
