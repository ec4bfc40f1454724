//! Document store abstraction (the persistence collaborator).
//!
//! Documents are plain JSON objects grouped into named collections. The store
//! assigns identifiers on insert and returns documents with the identifier
//! under `_id`, the way a document database does.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use warehouse_core::DocumentId;

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;

/// A stored JSON object.
pub type Document = Map<String, Value>;

/// Key under which a document's identifier is returned.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to encode document: {0}")]
    Encode(String),

    #[error("failed to decode document: {0}")]
    Decode(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Skip/limit applied to a collection scan (insertion order).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>>;

    async fn find(&self, collection: &str, options: FindOptions) -> StoreResult<Vec<Document>>;

    /// Insert a document and return its freshly generated identifier.
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<DocumentId>;

    /// Merge `set` into the matching document; returns whether a document matched.
    async fn update_one(&self, collection: &str, id: &DocumentId, set: Document) -> StoreResult<bool>;

    /// Returns whether a document matched and was removed.
    async fn delete_one(&self, collection: &str, id: &DocumentId) -> StoreResult<bool>;
}

/// Attach the identifier to a document body under `_id`.
pub(crate) fn with_id(id: &DocumentId, body: Document) -> Document {
    let mut out = Map::with_capacity(body.len() + 1);
    out.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    out.extend(body.into_iter().filter(|(k, _)| k != ID_FIELD));
    out
}
