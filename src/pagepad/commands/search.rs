use crate::commands::{snapshot, CmdMessage, CmdResult};
use crate::error::Result;
use crate::search::{filter, SelectionCursor};
use crate::session::{SearchState, Session};
use crate::store::page_store::PageStore;
use crate::store::StorageBackend;

/// Run a search and update the visible page set.
///
/// - Blank keyword: back to `Idle`, every page visible.
/// - Matches: `Searching` with the cursor on the first result. If the active
///   page is not among the matches, the first match is opened.
/// - No matches: `Searching` with an empty list and a read-only editor.
pub fn run<B: StorageBackend>(
    store: &PageStore<B>,
    session: &mut Session,
    keyword: &str,
) -> Result<CmdResult> {
    let mut collection = store.load()?;
    let keyword = keyword.trim();

    if keyword.is_empty() {
        session.clear_search();
        if session.is_read_only() {
            let active = session.active();
            let target = if collection.contains(&active) {
                active
            } else {
                collection.first()
            };
            session.enter(target, store.get_body(&target)?);
            return Ok(snapshot(&collection, session).with_editor(session));
        }
        return Ok(snapshot(&collection, session));
    }

    let results = filter(&collection, keyword, |id| store.get_body(id))?;
    let count = results.len();
    let first = results.first().copied();
    session.set_search(SearchState::Searching {
        keyword: keyword.to_string(),
        cursor: SelectionCursor::for_results(count),
        results,
    });

    let Some(first) = first else {
        session.make_read_only();
        return Ok(snapshot(&collection, session)
            .with_editor(session)
            .with_message(CmdMessage::info("No matching pages.")));
    };

    let found = CmdMessage::info(match count {
        1 => "1 page found.".to_string(),
        n => format!("{} pages found.", n),
    });

    let active = session.active();
    let visible = session
        .search()
        .results()
        .is_some_and(|ids| ids.contains(&active));
    let target = if visible { active } else { first };

    if session.is_read_only() || target != active {
        session.switch_to(store, &mut collection, target)?;
        return Ok(snapshot(&collection, session)
            .with_editor(session)
            .with_message(found));
    }

    Ok(snapshot(&collection, session).with_message(found))
}
