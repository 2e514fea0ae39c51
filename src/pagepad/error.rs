use crate::model::PageId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    #[error("Invalid page id: {0}")]
    InvalidPageId(String),

    #[error("No page is open for editing (the current search matched nothing)")]
    ReadOnly,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, PageError>;
