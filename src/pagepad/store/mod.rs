//! # Storage Layer
//!
//! Pagepad persists everything as string items in a flat key-value namespace,
//! the same shape as a browser's `localStorage`. The [`StorageBackend`] trait is
//! that namespace; [`page_store::PageStore`] layers the page model on top of it.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production storage, one file per key
//!   - The page collection is stored in `pages.json`
//!   - Page bodies in individual files: `page-{n}.{ext}`
//!   - Every write is atomic (temp file, then rename)
//!
//! - [`mem_backend::MemBackend`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Consistency
//!
//! Each item is read and written on its own; there are no multi-key
//! transactions. The page store orders its writes so that a failure part way
//! through never leaves the collection pointing at a body that was removed.

use crate::error::Result;

pub mod fs_backend;
pub mod mem_backend;
pub mod page_store;

/// Abstract interface for raw item storage.
///
/// Backends take `&self` for every operation: they are either stateless I/O or
/// use interior mutability, since pagepad is single-threaded.
pub trait StorageBackend {
    /// Read the item stored under `key`, or `None` if there is none.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the item under `key`. Removing a missing item is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
