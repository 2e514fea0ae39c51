//! # Domain Model: Pages and the Page Collection
//!
//! A page is addressed by a [`PageId`] of the form `page-<N>`. The id doubles as the
//! storage key of the page body, so it has to round-trip through its string form
//! exactly: `page-07` or `page-+7` are rejected rather than normalized.
//!
//! The [`PageCollection`] is the root record persisted under [`COLLECTION_KEY`]:
//!
//! ```text
//! { "list": ["page-1", "page-3"], "titles": { "page-1": "Groceries", "page-3": "Untitled" } }
//! ```
//!
//! ## Validated Construction
//!
//! Stored collections are never trusted. [`PageCollection::parse`] either returns a
//! record that satisfies every invariant or `None`, and the store falls back to
//! [`PageCollection::default`] on `None`. Repairs that don't lose information are
//! applied silently:
//!
//! - Duplicate ids in `list` keep their first occurrence.
//! - Ids without a title get [`PLACEHOLDER_TITLE`].
//! - Titles for ids not in `list` are dropped.
//!
//! A record whose `list` is missing, not an array, empty, or holds anything that is
//! not a valid page id is rejected outright.
//!
//! ## Title Derivation
//!
//! Titles are computed, never typed: [`derive_title`] takes the first line of the
//! trimmed body, trims it, and keeps at most [`TITLE_MAX_CHARS`] characters.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::PageError;

/// Storage key of the serialized [`PageCollection`].
pub const COLLECTION_KEY: &str = "pages";

/// Title shown for pages whose body has no non-blank first line.
pub const PLACEHOLDER_TITLE: &str = "Untitled";

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 30;

const ID_PREFIX: &str = "page-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(u64);

impl PageId {
    /// Builds the id `page-<n>`. Returns `None` for `n == 0`.
    pub fn new(n: u64) -> Option<Self> {
        (n > 0).then_some(Self(n))
    }

    pub fn first() -> Self {
        Self(1)
    }

    pub fn number(&self) -> u64 {
        self.0
    }

    /// The backend key holding this page's body.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ID_PREFIX, self.0)
    }
}

impl FromStr for PageId {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PageError::InvalidPageId(s.to_string());
        let digits = s.strip_prefix(ID_PREFIX).ok_or_else(invalid)?;

        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        digits
            .parse::<u64>()
            .ok()
            .and_then(PageId::new)
            .ok_or_else(invalid)
    }
}

impl Serialize for PageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PageId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// The durable index of all pages: display order plus derived titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageCollection {
    list: Vec<PageId>,
    titles: BTreeMap<PageId, String>,
}

impl Default for PageCollection {
    fn default() -> Self {
        let first = PageId::first();
        let mut titles = BTreeMap::new();
        titles.insert(first, PLACEHOLDER_TITLE.to_string());
        Self {
            list: vec![first],
            titles,
        }
    }
}

impl PageCollection {
    /// Parse a stored collection, returning `None` if it is structurally invalid.
    ///
    /// Entries that are not page ids are dropped, as are repeats. The record is
    /// only rejected when no usable id remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        let record = value.as_object()?;
        let entries = record.get("list")?.as_array()?;

        let mut list: Vec<PageId> = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(id) = entry.as_str().and_then(|s| s.parse::<PageId>().ok()) else {
                continue;
            };
            if !list.contains(&id) {
                list.push(id);
            }
        }
        if list.is_empty() {
            return None;
        }

        let stored_titles = record.get("titles").and_then(Value::as_object);
        let titles = list
            .iter()
            .map(|id| {
                let title = stored_titles
                    .and_then(|titles| titles.get(&id.to_string()))
                    .and_then(Value::as_str)
                    .unwrap_or(PLACEHOLDER_TITLE);
                (*id, title.to_string())
            })
            .collect();

        Some(Self { list, titles })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Page ids in display order. Never empty.
    pub fn list(&self) -> &[PageId] {
        &self.list
    }

    /// The first page in display order.
    pub fn first(&self) -> PageId {
        self.list[0]
    }

    pub fn contains(&self, id: &PageId) -> bool {
        self.list.contains(id)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Display title for `id`, falling back to the placeholder.
    pub fn title(&self, id: &PageId) -> &str {
        match self.titles.get(id) {
            Some(title) if !title.is_empty() => title,
            _ => PLACEHOLDER_TITLE,
        }
    }

    /// The id a newly added page receives: one past the highest suffix in use.
    pub fn next_id(&self) -> Result<PageId, PageError> {
        let max = self.list.iter().map(PageId::number).max().unwrap_or(0);
        max.checked_add(1)
            .map(PageId)
            .ok_or_else(|| PageError::Store(format!("No page number left after page-{}", max)))
    }

    pub(crate) fn push_page(&mut self, id: PageId) {
        if !self.list.contains(&id) {
            self.list.push(id);
        }
        self.titles.insert(id, PLACEHOLDER_TITLE.to_string());
    }

    /// Removes `id` from the list and the titles. May leave the list empty;
    /// callers restore the non-empty invariant before persisting.
    pub(crate) fn remove_page(&mut self, id: &PageId) -> bool {
        let before = self.list.len();
        self.list.retain(|existing| existing != id);
        self.titles.remove(id);
        self.list.len() != before
    }

    pub(crate) fn set_title(&mut self, id: PageId, title: String) {
        self.titles.insert(id, title);
    }
}

/// Derive a page title from its body.
pub fn derive_title(body: &str) -> String {
    let first_line = body.trim().lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        return PLACEHOLDER_TITLE.to_string();
    }
    first_line.chars().take(TITLE_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> PageId {
        PageId::new(n).unwrap()
    }

    #[test]
    fn page_id_round_trips_through_its_key() {
        let parsed: PageId = "page-42".parse().unwrap();
        assert_eq!(parsed.number(), 42);
        assert_eq!(parsed.key(), "page-42");
    }

    #[test]
    fn page_id_rejects_malformed_tokens() {
        for bad in ["page-0", "page-", "page-07", "page-+3", "page-1a", "pages", "Page-1", "3"] {
            assert!(bad.parse::<PageId>().is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn default_collection_has_one_placeholder_page() {
        let collection = PageCollection::default();
        assert_eq!(collection.list(), &[id(1)]);
        assert_eq!(collection.title(&id(1)), PLACEHOLDER_TITLE);
    }

    #[test]
    fn parse_accepts_well_formed_record() {
        let raw = r#"{"list":["page-1","page-3"],"titles":{"page-1":"Groceries","page-3":"Ideas"}}"#;
        let collection = PageCollection::parse(raw).unwrap();
        assert_eq!(collection.list(), &[id(1), id(3)]);
        assert_eq!(collection.title(&id(3)), "Ideas");
    }

    #[test]
    fn parse_rejects_structurally_invalid_records() {
        let invalid = [
            "",
            "null",
            "[]",
            r#""pages""#,
            r#"{"titles":{}}"#,
            r#"{"list":"page-1","titles":{}}"#,
            r#"{"list":[],"titles":{}}"#,
            r#"{"list":[1,2],"titles":{}}"#,
            r#"{"list":["notes","page-0"],"titles":{}}"#,
            "{not json",
        ];
        for raw in invalid {
            assert!(PageCollection::parse(raw).is_none(), "accepted {:?}", raw);
        }
    }

    #[test]
    fn parse_repairs_missing_titles_and_duplicates() {
        let raw = r#"{"list":["page-2","page-1","page-2"],"titles":{"page-1":"One","page-9":"Stale"}}"#;
        let collection = PageCollection::parse(raw).unwrap();

        assert_eq!(collection.list(), &[id(2), id(1)]);
        assert_eq!(collection.title(&id(2)), PLACEHOLDER_TITLE);
        assert_eq!(collection.title(&id(1)), "One");

        let json = collection.to_json().unwrap();
        assert!(!json.contains("page-9"));
    }

    #[test]
    fn parse_drops_entries_that_are_not_page_ids() {
        let raw = r#"{"list":["page-1","notes","page-01",7,"page-2"],"titles":{"page-2":"Two"}}"#;
        let collection = PageCollection::parse(raw).unwrap();

        assert_eq!(collection.list(), &[id(1), id(2)]);
        assert_eq!(collection.title(&id(2)), "Two");
    }

    #[test]
    fn next_id_refuses_to_overflow() {
        let raw = r#"{"list":["page-18446744073709551615"]}"#;
        let collection = PageCollection::parse(raw).unwrap();

        assert!(matches!(collection.next_id(), Err(PageError::Store(_))));
    }

    #[test]
    fn parse_tolerates_missing_titles_object() {
        let collection = PageCollection::parse(r#"{"list":["page-5"]}"#).unwrap();
        assert_eq!(collection.title(&id(5)), PLACEHOLDER_TITLE);
    }

    #[test]
    fn serialized_form_matches_storage_layout() {
        let json = PageCollection::default().to_json().unwrap();
        assert_eq!(json, r#"{"list":["page-1"],"titles":{"page-1":"Untitled"}}"#);
    }

    #[test]
    fn next_id_uses_max_suffix_regardless_of_gaps() {
        let raw = r#"{"list":["page-1","page-3"],"titles":{}}"#;
        let collection = PageCollection::parse(raw).unwrap();
        assert_eq!(collection.next_id().unwrap(), id(4));
    }

    #[test]
    fn derive_title_takes_trimmed_first_line() {
        assert_eq!(derive_title("  My Note\nbody text"), "My Note");
        assert_eq!(derive_title("\n\n  Second try  \nrest"), "Second try");
    }

    #[test]
    fn derive_title_falls_back_to_placeholder() {
        assert_eq!(derive_title(""), PLACEHOLDER_TITLE);
        assert_eq!(derive_title("   \n\t\n"), PLACEHOLDER_TITLE);
    }

    #[test]
    fn derive_title_truncates_to_thirty_chars() {
        let line = "x".repeat(40);
        assert_eq!(derive_title(&line).chars().count(), TITLE_MAX_CHARS);

        let wide = "日本語のメモ".repeat(10);
        assert_eq!(derive_title(&wide).chars().count(), TITLE_MAX_CHARS);
    }
}
