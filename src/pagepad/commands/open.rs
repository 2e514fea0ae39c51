use crate::commands::{snapshot, CmdResult};
use crate::error::{PageError, Result};
use crate::model::PageId;
use crate::session::Session;
use crate::store::page_store::PageStore;
use crate::store::StorageBackend;

/// Open `id`: flush the outgoing page, load `id` into the editor, end any search.
///
/// Serves both the page selector and search-result activation.
pub fn run<B: StorageBackend>(
    store: &PageStore<B>,
    session: &mut Session,
    id: PageId,
) -> Result<CmdResult> {
    let mut collection = store.load()?;
    if !collection.contains(&id) {
        return Err(PageError::PageNotFound(id));
    }

    session.switch_to(store, &mut collection, id)?;
    session.clear_search();

    Ok(snapshot(&collection, session).with_editor(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::edit;
    use crate::store::mem_backend::fixtures::StoreFixture;

    fn id(n: u64) -> PageId {
        PageId::new(n).unwrap()
    }

    #[test]
    fn opens_page_and_loads_body() {
        let fixture = StoreFixture::new().with_page("Second\nbody");
        let mut session = Session::start(&fixture.store).unwrap();

        let result = run(&fixture.store, &mut session, id(2)).unwrap();

        assert_eq!(session.active(), id(2));
        assert!(result.is_active(&id(2)));
        assert_eq!(result.editor.unwrap().text, "Second\nbody");
        assert!(result.results.is_none());
        assert_eq!(result.pages.len(), 2);
    }

    #[test]
    fn edits_survive_a_round_trip_between_pages() {
        let fixture = StoreFixture::new().with_page("B original");
        let mut session = Session::start(&fixture.store).unwrap();

        edit::run(&fixture.store, &mut session, "A edited\nline two".to_string()).unwrap();
        run(&fixture.store, &mut session, id(2)).unwrap();
        let back = run(&fixture.store, &mut session, id(1)).unwrap();

        assert_eq!(back.editor.unwrap().text, "A edited\nline two");
        assert_eq!(fixture.store.get_body(&id(2)).unwrap(), "B original");
    }

    #[test]
    fn unknown_page_is_rejected_without_switching() {
        let fixture = StoreFixture::new();
        let mut session = Session::start(&fixture.store).unwrap();

        let err = run(&fixture.store, &mut session, id(4));

        assert!(matches!(err, Err(PageError::PageNotFound(_))));
        assert_eq!(session.active(), id(1));
    }
}
