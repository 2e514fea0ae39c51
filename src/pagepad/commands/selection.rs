use crate::commands::{open, search, snapshot, CmdResult};
use crate::error::Result;
use crate::session::{SearchState, Session};
use crate::store::page_store::PageStore;
use crate::store::StorageBackend;

/// Move the results cursor by `delta` (negative is up). Clamped, no wraparound.
pub fn move_by<B: StorageBackend>(
    store: &PageStore<B>,
    session: &mut Session,
    delta: isize,
) -> Result<CmdResult> {
    if let SearchState::Searching {
        results, cursor, ..
    } = session.search_mut()
    {
        cursor.move_by(delta, results.len());
    }

    let collection = store.load()?;
    Ok(snapshot(&collection, session))
}

/// Open the highlighted result. With nothing highlighted, search for `keyword`
/// instead.
pub fn activate<B: StorageBackend>(
    store: &PageStore<B>,
    session: &mut Session,
    keyword: &str,
) -> Result<CmdResult> {
    match session.search().selected() {
        Some(id) => open::run(store, session, id),
        None => search::run(store, session, keyword),
    }
}
