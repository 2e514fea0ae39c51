use super::StorageBackend;
use crate::error::{PageError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since pagepad is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    items: RefCell<HashMap<String, String>>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of stored items, pages and collection record included.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl StorageBackend for MemBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(PageError::Store("Simulated write error".to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(PageError::Store("Simulated write error".to_string()));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{PageCollection, COLLECTION_KEY};
    use crate::store::page_store::PageStore;

    /// Builds a store with pages already in it.
    pub struct StoreFixture {
        pub store: PageStore<MemBackend>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: PageStore::with_backend(MemBackend::new()),
            }
        }

        /// Writes a raw collection record, bypassing validation.
        pub fn with_raw_collection(self, raw: &str) -> Self {
            self.store.backend.set_item(COLLECTION_KEY, raw).unwrap();
            self
        }

        /// Appends a page with the given body; the title is derived as usual.
        pub fn with_page(self, body: &str) -> Self {
            let mut collection = self.store.load().unwrap();
            let id = self.store.add_page(&mut collection).unwrap();
            self.store.set_body(&id, body).unwrap();
            self.store
                .recompute_title(&mut collection, &id, body)
                .unwrap();
            self
        }

        pub fn collection(&self) -> PageCollection {
            self.store.load().unwrap()
        }
    }
}
