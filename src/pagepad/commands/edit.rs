use crate::commands::{snapshot, CmdResult};
use crate::error::{PageError, Result};
use crate::session::Session;
use crate::store::page_store::PageStore;
use crate::store::StorageBackend;

/// Replace the editor contents of the active page.
///
/// Write-through: the body and its derived title are persisted before this
/// returns. Refused while the editor is read-only.
pub fn run<B: StorageBackend>(
    store: &PageStore<B>,
    session: &mut Session,
    text: String,
) -> Result<CmdResult> {
    if session.is_read_only() {
        return Err(PageError::ReadOnly);
    }

    let mut collection = store.load()?;
    session.set_buffer(text);
    session.flush(store, &mut collection)?;

    Ok(snapshot(&collection, session))
}
