//! # Session State
//!
//! The session is everything a front end would otherwise keep in globals: which
//! page is active, what the editor buffer holds, and where the search state
//! machine stands. It is never persisted.
//!
//! ## Search State Machine
//!
//! ```text
//!            search("kw")                      search("") / open_page
//!   Idle ───────────────────▶ Searching ───────────────────────────────▶ Idle
//! ```
//!
//! In `Searching`, the visible page set is the result list and the cursor is set
//! whenever there are results. An empty result list makes the editor read-only:
//! the buffer is cleared on screen, the active page is remembered, and no edit
//! can reach the store until a page is visible again.
//!
//! ## Switching Pages
//!
//! [`Session::switch_to`] is the only way the active page changes. It flushes the
//! outgoing buffer to the store before the incoming body is read, so nothing
//! typed into one page can be lost or land in another.

use crate::error::Result;
use crate::model::{PageCollection, PageId};
use crate::search::SelectionCursor;
use crate::store::page_store::PageStore;
use crate::store::StorageBackend;
use log::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    Searching {
        keyword: String,
        results: Vec<PageId>,
        cursor: SelectionCursor,
    },
}

impl SearchState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SearchState::Idle)
    }

    pub fn keyword(&self) -> &str {
        match self {
            SearchState::Idle => "",
            SearchState::Searching { keyword, .. } => keyword,
        }
    }

    pub fn results(&self) -> Option<&[PageId]> {
        match self {
            SearchState::Idle => None,
            SearchState::Searching { results, .. } => Some(results),
        }
    }

    pub fn cursor(&self) -> SelectionCursor {
        match self {
            SearchState::Idle => SelectionCursor::none(),
            SearchState::Searching { cursor, .. } => *cursor,
        }
    }

    /// The page under the cursor, if any.
    pub fn selected(&self) -> Option<PageId> {
        match self {
            SearchState::Idle => None,
            SearchState::Searching {
                results, cursor, ..
            } => cursor.index().and_then(|i| results.get(i).copied()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    active: PageId,
    buffer: String,
    read_only: bool,
    search: SearchState,
}

impl Session {
    /// Start a session on the first page of the stored collection.
    pub fn start<B: StorageBackend>(store: &PageStore<B>) -> Result<Self> {
        let collection = store.load()?;
        let active = collection.first();
        let buffer = store.get_body(&active)?;
        debug!("session started on {}", active);
        Ok(Self {
            active,
            buffer,
            read_only: false,
            search: SearchState::Idle,
        })
    }

    pub fn active(&self) -> PageId {
        self.active
    }

    /// Text currently shown in the editor.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub(crate) fn search_mut(&mut self) -> &mut SearchState {
        &mut self.search
    }

    pub(crate) fn set_search(&mut self, state: SearchState) {
        self.search = state;
    }

    pub(crate) fn clear_search(&mut self) {
        self.search = SearchState::Idle;
    }

    pub(crate) fn set_buffer(&mut self, text: String) {
        self.buffer = text;
    }

    /// Persist the buffer of the active page and re-derive its title.
    ///
    /// Skipped while read-only: the buffer is blank then and must not
    /// overwrite the page it hides. Also skipped if the active page has
    /// disappeared from the collection.
    pub(crate) fn flush<B: StorageBackend>(
        &self,
        store: &PageStore<B>,
        collection: &mut PageCollection,
    ) -> Result<()> {
        if self.read_only || !collection.contains(&self.active) {
            return Ok(());
        }
        store.set_body(&self.active, &self.buffer)?;
        store.recompute_title(collection, &self.active, &self.buffer)
    }

    /// Flush the outgoing page, then make `id` active with its stored body.
    pub(crate) fn switch_to<B: StorageBackend>(
        &mut self,
        store: &PageStore<B>,
        collection: &mut PageCollection,
        id: PageId,
    ) -> Result<()> {
        self.flush(store, collection)?;
        self.enter(id, store.get_body(&id)?);
        Ok(())
    }

    /// Make `id` active with `body` in the editor, without flushing. Used when
    /// the outgoing page no longer exists or was just created.
    pub(crate) fn enter(&mut self, id: PageId, body: String) {
        if id != self.active {
            debug!("switching {} -> {}", self.active, id);
        }
        self.active = id;
        self.buffer = body;
        self.read_only = false;
    }

    /// Hide the editor: blank buffer, edits refused, active page remembered.
    pub(crate) fn make_read_only(&mut self) {
        self.buffer.clear();
        self.read_only = true;
    }
}
