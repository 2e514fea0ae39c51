//! # Command Layer
//!
//! One module per user action. Every handler has the same shape:
//!
//! ```text
//! run(store, session, input) -> Result<CmdResult>
//! ```
//!
//! Handlers mutate the store and the session, then describe what the UI should
//! show in a [`CmdResult`]: the visible page set, the active page, the results
//! panel, whether the editor must be repopulated, and any messages. They never
//! print and never prompt; confirmation is an input like any other.

use crate::model::{PageCollection, PageId};
use crate::session::{SearchState, Session};

pub mod add;
pub mod delete;
pub mod edit;
pub mod open;
pub mod search;
pub mod selection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A page as shown in the selector or the results panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub id: PageId,
    pub title: String,
}

/// Editor contents to load. Absent from a [`CmdResult`] when the editor should
/// be left alone (e.g. right after the user typed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub text: String,
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub entries: Vec<PageEntry>,
    pub selected: Option<usize>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub active: Option<PageId>,
    /// Selector contents: every page when idle, the matches while searching.
    pub pages: Vec<PageEntry>,
    pub editor: Option<EditorView>,
    /// `None` hides the results panel.
    pub results: Option<ResultsView>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Ask the UI to reload the editor from the session buffer.
    pub fn with_editor(mut self, session: &Session) -> Self {
        self.editor = Some(EditorView {
            text: session.buffer().to_string(),
            read_only: session.is_read_only(),
        });
        self
    }

    pub fn is_active(&self, id: &PageId) -> bool {
        self.active.as_ref() == Some(id)
    }
}

fn entries(collection: &PageCollection, ids: &[PageId]) -> Vec<PageEntry> {
    ids.iter()
        .map(|id| PageEntry {
            id: *id,
            title: collection.title(id).to_string(),
        })
        .collect()
}

/// Render instructions for the current state, editor untouched.
pub fn snapshot(collection: &PageCollection, session: &Session) -> CmdResult {
    let (pages, results) = match session.search() {
        SearchState::Idle => (entries(collection, collection.list()), None),
        SearchState::Searching {
            results, cursor, ..
        } => {
            let shown = entries(collection, results);
            let panel = ResultsView {
                entries: shown.clone(),
                selected: cursor.index(),
            };
            (shown, Some(panel))
        }
    };

    CmdResult {
        active: Some(session.active()),
        pages,
        editor: None,
        results,
        messages: Vec::new(),
    }
}
