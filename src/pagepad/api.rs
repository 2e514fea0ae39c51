//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It owns the
//! [`PageStore`] and the [`Session`], so a UI only has to hold one value and call
//! one method per user action.
//!
//! The facade:
//! - **Dispatches** to the matching `commands::*` handler
//! - **Normalizes inputs** (page id strings → [`PageId`])
//! - **Returns render instructions** ([`CmdResult`])
//!
//! It does no printing, prompting, or formatting. Confirmation for destructive
//! actions arrives as a plain `bool`, decided by the UI.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `PagesApi<FsBackend>`
//! - Testing: `PagesApi<MemBackend>`

use crate::commands;
use crate::error::Result;
use crate::model::{PageCollection, PageId};
use crate::session::Session;
use crate::store::page_store::PageStore;
use crate::store::StorageBackend;
use log::debug;

pub struct PagesApi<B: StorageBackend> {
    store: PageStore<B>,
    session: Session,
}

impl<B: StorageBackend> PagesApi<B> {
    /// Open the store and start a session on its first page.
    pub fn open(backend: B) -> Result<Self> {
        let store = PageStore::with_backend(backend);
        let session = Session::start(&store)?;
        Ok(Self { store, session })
    }

    /// Full render of the current state, editor included. For the first paint.
    pub fn refresh(&self) -> Result<CmdResult> {
        let collection = self.store.load()?;
        Ok(commands::snapshot(&collection, &self.session).with_editor(&self.session))
    }

    pub fn add_page(&mut self) -> Result<CmdResult> {
        debug!("command: add");
        commands::add::run(&self.store, &mut self.session)
    }

    pub fn delete_page(&mut self, confirmed: bool) -> Result<CmdResult> {
        debug!("command: delete (confirmed: {})", confirmed);
        commands::delete::run(&self.store, &mut self.session, confirmed)
    }

    /// Switch to the page named by `id` (as typed or picked in a selector).
    pub fn switch_page(&mut self, id: &str) -> Result<CmdResult> {
        let id = parse_page_id(id)?;
        self.open_page(id)
    }

    pub fn open_page(&mut self, id: PageId) -> Result<CmdResult> {
        debug!("command: open {}", id);
        commands::open::run(&self.store, &mut self.session, id)
    }

    pub fn edit(&mut self, text: impl Into<String>) -> Result<CmdResult> {
        commands::edit::run(&self.store, &mut self.session, text.into())
    }

    pub fn search(&mut self, keyword: &str) -> Result<CmdResult> {
        debug!("command: search {:?}", keyword);
        commands::search::run(&self.store, &mut self.session, keyword)
    }

    pub fn move_selection(&mut self, delta: isize) -> Result<CmdResult> {
        commands::selection::move_by(&self.store, &mut self.session, delta)
    }

    pub fn activate_selection(&mut self, keyword: &str) -> Result<CmdResult> {
        debug!("command: activate {:?}", keyword);
        commands::selection::activate(&self.store, &mut self.session, keyword)
    }

    pub fn collection(&self) -> Result<PageCollection> {
        self.store.load()
    }

    /// Title of the active page, e.g. for a delete confirmation prompt.
    pub fn active_title(&self) -> Result<String> {
        let collection = self.store.load()?;
        Ok(collection.title(&self.session.active()).to_string())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &PageStore<B> {
        &self.store
    }
}

pub fn parse_page_id(input: &str) -> Result<PageId> {
    input.trim().parse()
}

pub use crate::commands::{
    CmdMessage, CmdResult, EditorView, MessageLevel, PageEntry, ResultsView,
};
pub use crate::session::SearchState;
