use super::StorageBackend;
use crate::error::{PageError, Result};
use crate::model::{derive_title, PageCollection, PageId, COLLECTION_KEY};
use log::{debug, info, warn};

/// Durable CRUD over the [`PageCollection`] and the individual page bodies.
///
/// Every mutating method persists before returning. The collection is passed in
/// by the caller and updated in place, so a command can load it once and thread
/// it through several operations.
pub struct PageStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> PageStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the collection, resetting it to the default single page if the
    /// stored record is absent or malformed. The reset is written back.
    pub fn load(&self) -> Result<PageCollection> {
        match self.backend.get_item(COLLECTION_KEY)? {
            Some(raw) => {
                if let Some(collection) = PageCollection::parse(&raw) {
                    return Ok(collection);
                }
                warn!("stored page collection is malformed, resetting to a single empty page");
            }
            None => debug!("no page collection stored yet, seeding the default page"),
        }

        let collection = PageCollection::default();
        self.set_body(&collection.first(), "")?;
        self.save(&collection)?;
        Ok(collection)
    }

    pub fn save(&self, collection: &PageCollection) -> Result<()> {
        let raw = collection.to_json()?;
        self.backend.set_item(COLLECTION_KEY, &raw)
    }

    /// Body of `id`, or an empty string if nothing is stored.
    pub fn get_body(&self, id: &PageId) -> Result<String> {
        Ok(self.backend.get_item(&id.key())?.unwrap_or_default())
    }

    pub fn set_body(&self, id: &PageId, text: &str) -> Result<()> {
        debug!("writing {} ({} bytes)", id, text.len());
        self.backend.set_item(&id.key(), text)
    }

    /// Append a fresh page numbered one past the highest id in use.
    pub fn add_page(&self, collection: &mut PageCollection) -> Result<PageId> {
        let id = collection.next_id()?;
        collection.push_page(id);
        self.set_body(&id, "")?;
        self.save(collection)?;
        info!("added {}", id);
        Ok(id)
    }

    /// Delete `id` and its body. Deleting the last page recreates `page-1`.
    ///
    /// Returns the page that should become active: the first one in the list.
    pub fn delete_page(&self, collection: &mut PageCollection, id: &PageId) -> Result<PageId> {
        if !collection.contains(id) {
            return Err(PageError::PageNotFound(*id));
        }

        collection.remove_page(id);
        if collection.is_empty() {
            let fresh = PageId::first();
            collection.push_page(fresh);
            self.set_body(&fresh, "")?;
            debug!("deleted the last page, recreated {}", fresh);
        }

        // The collection goes first, so a failed save leaves the body in place.
        self.save(collection)?;
        if !collection.contains(id) {
            self.backend.remove_item(&id.key())?;
        }
        info!("deleted {}", id);
        Ok(collection.first())
    }

    /// Re-derive the title of `id` from `body` and persist the collection.
    pub fn recompute_title(
        &self,
        collection: &mut PageCollection,
        id: &PageId,
        body: &str,
    ) -> Result<()> {
        if !collection.contains(id) {
            return Err(PageError::PageNotFound(*id));
        }
        collection.set_title(*id, derive_title(body));
        self.save(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PLACEHOLDER_TITLE;
    use crate::store::mem_backend::fixtures::StoreFixture;
    use crate::store::mem_backend::MemBackend;

    fn id(n: u64) -> PageId {
        PageId::new(n).unwrap()
    }

    fn assert_default_state(store: &PageStore<MemBackend>) {
        let collection = store.load().unwrap();
        assert_eq!(collection.list(), &[id(1)]);
        assert_eq!(collection.title(&id(1)), PLACEHOLDER_TITLE);
        assert_eq!(
            store.backend.get_item("page-1").unwrap(),
            Some(String::new())
        );
    }

    #[test]
    fn load_seeds_default_when_absent() {
        let store = PageStore::with_backend(MemBackend::new());
        let collection = store.load().unwrap();

        assert_eq!(collection, PageCollection::default());
        assert_eq!(
            store.backend.get_item(COLLECTION_KEY).unwrap().as_deref(),
            Some(r#"{"list":["page-1"],"titles":{"page-1":"Untitled"}}"#)
        );
        assert_default_state(&store);
    }

    #[test]
    fn load_resets_malformed_records() {
        for raw in ["garbage", "{}", r#"{"list":{}}"#, r#"{"list":[]}"#] {
            let fixture = StoreFixture::new().with_raw_collection(raw);
            assert_default_state(&fixture.store);
        }
    }

    #[test]
    fn load_keeps_valid_records_untouched() {
        let raw = r#"{"list":["page-2"],"titles":{"page-2":"Kept"}}"#;
        let fixture = StoreFixture::new().with_raw_collection(raw);

        let collection = fixture.collection();
        assert_eq!(collection.list(), &[id(2)]);
        assert_eq!(collection.title(&id(2)), "Kept");
        assert!(!fixture.store.backend.contains_key("page-1"));
    }

    #[test]
    fn load_skips_junk_entries_and_keeps_bodies() {
        let raw = r#"{"list":["page-1","page-2","notes","page-01"],"titles":{"page-2":"Second"}}"#;
        let fixture = StoreFixture::new().with_raw_collection(raw);
        fixture.store.set_body(&id(1), "first body").unwrap();
        fixture.store.set_body(&id(2), "Second\nmore").unwrap();

        let collection = fixture.collection();

        assert_eq!(collection.list(), &[id(1), id(2)]);
        assert_eq!(collection.title(&id(2)), "Second");
        assert_eq!(fixture.store.get_body(&id(1)).unwrap(), "first body");
        assert_eq!(fixture.store.get_body(&id(2)).unwrap(), "Second\nmore");
    }

    #[test]
    fn add_page_fails_when_numbers_run_out() {
        let raw = r#"{"list":["page-18446744073709551615"],"titles":{}}"#;
        let fixture = StoreFixture::new().with_raw_collection(raw);
        let mut collection = fixture.collection();
        let before = fixture.store.backend.get_item(COLLECTION_KEY).unwrap();

        let err = fixture.store.add_page(&mut collection);

        assert!(matches!(err, Err(PageError::Store(_))));
        assert_eq!(collection.len(), 1);
        assert_eq!(fixture.store.backend.get_item(COLLECTION_KEY).unwrap(), before);
    }

    #[test]
    fn failed_delete_keeps_the_body_it_still_lists() {
        let fixture = StoreFixture::new().with_page("second");
        let mut collection = fixture.collection();
        fixture.store.backend.set_simulate_write_error(true);

        assert!(fixture.store.delete_page(&mut collection, &id(2)).is_err());

        fixture.store.backend.set_simulate_write_error(false);
        assert!(fixture.collection().contains(&id(2)));
        assert_eq!(fixture.store.get_body(&id(2)).unwrap(), "second");
    }

    #[test]
    fn get_body_defaults_to_empty() {
        let store = PageStore::with_backend(MemBackend::new());
        assert_eq!(store.get_body(&id(9)).unwrap(), "");
    }

    #[test]
    fn add_page_uses_max_suffix_plus_one() {
        let raw = r#"{"list":["page-1","page-3"],"titles":{}}"#;
        let fixture = StoreFixture::new().with_raw_collection(raw);
        let mut collection = fixture.collection();

        let new_id = fixture.store.add_page(&mut collection).unwrap();

        assert_eq!(new_id, id(4));
        assert_eq!(collection.list(), &[id(1), id(3), id(4)]);
        assert_eq!(collection.title(&new_id), PLACEHOLDER_TITLE);
        assert_eq!(fixture.store.get_body(&new_id).unwrap(), "");
        assert_eq!(fixture.collection(), collection);
    }

    #[test]
    fn delete_page_removes_body_and_title() {
        let fixture = StoreFixture::new().with_page("second").with_page("third");
        let mut collection = fixture.collection();

        let next = fixture.store.delete_page(&mut collection, &id(2)).unwrap();

        assert_eq!(next, id(1));
        assert_eq!(collection.list(), &[id(1), id(3)]);
        assert!(!fixture.store.backend.contains_key("page-2"));
        assert_eq!(fixture.collection(), collection);
    }

    #[test]
    fn deleting_only_page_recreates_default() {
        let fixture = StoreFixture::new().with_raw_collection(
            r#"{"list":["page-5"],"titles":{"page-5":"Lonely"}}"#,
        );
        fixture.store.set_body(&id(5), "lonely body").unwrap();
        let mut collection = fixture.collection();

        let next = fixture.store.delete_page(&mut collection, &id(5)).unwrap();

        assert_eq!(next, id(1));
        assert!(!fixture.store.backend.contains_key("page-5"));
        assert_default_state(&fixture.store);
    }

    #[test]
    fn deleting_page_one_when_alone_leaves_empty_page_one() {
        let fixture = StoreFixture::new();
        let mut collection = fixture.collection();
        fixture.store.set_body(&id(1), "old text").unwrap();

        fixture.store.delete_page(&mut collection, &id(1)).unwrap();

        assert_default_state(&fixture.store);
    }

    #[test]
    fn delete_unknown_page_is_an_error() {
        let fixture = StoreFixture::new();
        let mut collection = fixture.collection();
        let err = fixture.store.delete_page(&mut collection, &id(7));
        assert!(matches!(err, Err(PageError::PageNotFound(_))));
    }

    #[test]
    fn recompute_title_persists_derived_title() {
        let fixture = StoreFixture::new();
        let mut collection = fixture.collection();

        fixture
            .store
            .recompute_title(&mut collection, &id(1), "  My Note\nbody text")
            .unwrap();
        assert_eq!(fixture.collection().title(&id(1)), "My Note");

        fixture
            .store
            .recompute_title(&mut collection, &id(1), "")
            .unwrap();
        assert_eq!(fixture.collection().title(&id(1)), PLACEHOLDER_TITLE);
    }

    #[test]
    fn storage_failures_propagate() {
        let store = PageStore::with_backend(MemBackend::new());
        let mut collection = store.load().unwrap();
        store.backend.set_simulate_write_error(true);

        assert!(matches!(
            store.add_page(&mut collection),
            Err(PageError::Store(_))
        ));
        assert!(store.set_body(&id(1), "text").is_err());
    }
}
