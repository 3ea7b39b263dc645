//! Storage layer
//!
//! Persists the site document as a single JSON file. The whole document
//! is serialized and rewritten on every mutation; there are no partial
//! or incremental updates. Last writer wins.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::JsonPersistence;
