//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Storage (LocalStorage on web, files or memory on native)

pub mod storage;
pub mod time;

pub use storage::{MemoryStore, RecordStore};
pub use time::now_ms;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
