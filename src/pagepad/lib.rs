//! # Pagepad Architecture
//!
//! Pagepad is a **UI-agnostic paged scratch pad**. A single editable buffer is bound
//! to a set of numbered pages (`page-1`, `page-2`, ...) kept in a key-value store,
//! with substring search across titles and bodies. The terminal client in `main.rs`
//! is one possible front end; nothing below the API knows about a terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, prints render instructions    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the PageStore and the Session                       │
//! │  - Normalizes inputs (strings → PageIds)                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One handler per user action                              │
//! │  - (store, session, input) → CmdResult                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait: get/set/remove string items        │
//! │  - FsBackend (production), MemBackend (testing)             │
//! │  - PageStore: the page collection over a backend            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Layout
//!
//! Two kinds of entries live in the backend:
//!
//! - `"pages"` → `{"list": ["page-1", ...], "titles": {"page-1": "..."}}`
//! - `"page-N"` → the raw body text of that page
//!
//! Titles are never edited directly: they are derived from the first line of the
//! body every time the body is written. See [`model`].
//!
//! ## Session State
//!
//! Which page is active, what the editor buffer holds and whether a search is
//! running all live in an explicit [`session::Session`] owned by the API. Every
//! page switch flushes the outgoing page before the incoming body is loaded.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One handler per user action, returning render instructions
//! - [`search`]: Keyword filtering and the selection cursor
//! - [`session`]: Active page, editor buffer, search state machine
//! - [`store`]: Storage abstraction, backends and the [`store::page_store::PageStore`]
//! - [`model`]: `PageId`, `PageCollection`, title derivation
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context wiring
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod search;
pub mod session;
pub mod store;
