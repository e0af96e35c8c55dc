//! Storage - durable key/value persistence for JSON values.
//!
//! A `StorageBackend` moves raw JSON text in and out of some medium
//! (memory, a directory of files, ...). `StorageService` is the typed,
//! clonable handle the repositories share: it serializes values with
//! `serde_json` and hands out per-key write locks.
//!
//! ## Example
//!
//! ```ignore
//! use campus_books::storage::{FileStorage, StorageService};
//!
//! let storage = StorageService::new(FileStorage::new("./data"));
//! storage.set("campusbooks_wishlist", &vec!["seed-1"]).await?;
//! let ids: Option<Vec<String>> = storage.get("campusbooks_wishlist").await?;
//! ```

mod backend;
mod file;
mod in_memory;
mod locks;
mod service;

pub use backend::StorageBackend;
pub use file::FileStorage;
pub use in_memory::InMemoryStorage;
pub use locks::{KeyGuard, KeyLocks};
pub use service::StorageService;
