use crate::commands::{snapshot, CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::Session;
use crate::store::page_store::PageStore;
use crate::store::StorageBackend;

/// Delete the active page once the user has confirmed.
///
/// Declining touches nothing, not even the stored collection. On success the
/// first remaining page becomes active; deleting the last page leaves a fresh
/// empty `page-1`.
pub fn run<B: StorageBackend>(
    store: &PageStore<B>,
    session: &mut Session,
    confirmed: bool,
) -> Result<CmdResult> {
    if !confirmed {
        return Ok(CmdResult::default().with_message(CmdMessage::info("Delete cancelled.")));
    }

    let mut collection = store.load()?;
    let target = session.active();
    let title = collection.title(&target).to_string();

    let next = store.delete_page(&mut collection, &target)?;
    session.enter(next, store.get_body(&next)?);
    session.clear_search();

    Ok(snapshot(&collection, session)
        .with_editor(session)
        .with_message(CmdMessage::success(format!(
            "Page deleted ({}): {}",
            target, title
        ))))
}
