//! Storage access for cafes.
//!
//! `CafeRepository` is the only code that talks to SQLite. Its calls are
//! blocking; request handlers run them on actix's blocking pool.

mod cafes;

pub use cafes::CafeRepository;

use actix_web::error::BlockingError;
use std::error::Error as StdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store rejected the insert because the name is already taken.
    #[error("a cafe named '{0}' already exists")]
    DuplicateName(String),
    /// The store could not be opened, queried or written.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] Box<dyn StdError + Send + Sync>),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(e: rusqlite::Error) -> Self {
        RepositoryError::StorageUnavailable(Box::new(e))
    }
}

impl From<BlockingError> for RepositoryError {
    fn from(e: BlockingError) -> Self {
        RepositoryError::StorageUnavailable(Box::new(e))
    }
}
