//! Infrastructure layer: document storage and typed repositories.

pub mod document_store;
pub mod repository;

pub use document_store::{
    Document, DocumentStore, FindOptions, InMemoryDocumentStore, PostgresDocumentStore,
    StoreError, StoreResult,
};
pub use repository::{CatalogRepository, Stored};
