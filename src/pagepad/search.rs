//! Keyword filtering and the selection cursor.
//!
//! Search is computed on demand, nothing is indexed. A page matches when its title
//! or its body contains the keyword, compared case-insensitively. Results keep the
//! collection's display order; there is no ranking.

use crate::error::Result;
use crate::model::{PageCollection, PageId};

/// Filter `collection` by `keyword`.
///
/// A keyword that is empty after trimming selects every page. `body_of` is only
/// consulted for pages whose title does not already match.
pub fn filter<F>(collection: &PageCollection, keyword: &str, mut body_of: F) -> Result<Vec<PageId>>
where
    F: FnMut(&PageId) -> Result<String>,
{
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return Ok(collection.list().to_vec());
    }

    let mut matches = Vec::new();
    for id in collection.list() {
        let in_title = collection.title(id).to_lowercase().contains(&needle);
        if in_title || body_of(id)?.to_lowercase().contains(&needle) {
            matches.push(*id);
        }
    }
    Ok(matches)
}

/// The highlighted entry of a result list, or none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    index: Option<usize>,
}

impl SelectionCursor {
    pub fn none() -> Self {
        Self::default()
    }

    /// First entry selected when there are results, unset otherwise.
    pub fn for_results(count: usize) -> Self {
        Self {
            index: (count > 0).then_some(0),
        }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_set(&self) -> bool {
        self.index.is_some()
    }

    /// Move by `delta`, clamped to `[0, count - 1]`. No wraparound; an unset
    /// cursor or an empty result list stays as it is.
    pub fn move_by(&mut self, delta: isize, count: usize) {
        let Some(current) = self.index else {
            return;
        };
        if count == 0 {
            self.index = None;
            return;
        }
        let last = count as isize - 1;
        let target = (current as isize).saturating_add(delta).clamp(0, last);
        self.index = Some(target as usize);
    }
}
