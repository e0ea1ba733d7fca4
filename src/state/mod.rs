// State management module
// SQLite-backed preference persistence in the app data directory

pub mod db;
pub mod preferences;
pub mod storage;

pub use db::{init_store, open_in_memory, StoreConnection, StoreError, StoreResult};
pub use preferences::{get_preference, put_preference, remove_preference};
pub use storage::{get_app_data_dir, StorageError};
