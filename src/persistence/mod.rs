pub mod files;
pub mod kv;
pub mod snapshot;

pub use files::{atomic_write, config_file, ensure_data_dir, init_local_data_dir, log_dir, storage_file};
pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use snapshot::{PersistedSnapshot, PersistenceAdapter};
