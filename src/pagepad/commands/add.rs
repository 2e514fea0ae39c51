use crate::commands::{snapshot, CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::Session;
use crate::store::page_store::PageStore;
use crate::store::StorageBackend;

/// Append a new empty page and make it active.
pub fn run<B: StorageBackend>(store: &PageStore<B>, session: &mut Session) -> Result<CmdResult> {
    let mut collection = store.load()?;
    session.flush(store, &mut collection)?;

    let id = store.add_page(&mut collection)?;
    session.enter(id, String::new());
    session.clear_search();

    Ok(snapshot(&collection, session)
        .with_editor(session)
        .with_message(CmdMessage::success(format!("Page added: {}", id))))
}
