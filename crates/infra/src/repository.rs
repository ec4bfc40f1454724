//! Typed access to the catalog collections.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use warehouse_catalog::{Category, Product, ProductUpdate};
use warehouse_core::DocumentId;

use crate::document_store::{Document, DocumentStore, FindOptions, StoreError, StoreResult};

pub const CATEGORY_COLLECTION: &str = "category";
pub const PRODUCT_COLLECTION: &str = "product";

/// A record as returned by the store: its identifier plus the entity fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub record: T,
}

#[derive(Clone)]
pub struct CatalogRepository {
    store: Arc<dyn DocumentStore>,
}

impl CatalogRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list_categories(&self) -> StoreResult<Vec<Stored<Category>>> {
        let docs = self
            .store
            .find(CATEGORY_COLLECTION, FindOptions::default())
            .await?;
        docs.into_iter().map(decode).collect()
    }

    pub async fn get_category(&self, id: &DocumentId) -> StoreResult<Option<Stored<Category>>> {
        let doc = self.store.find_one(CATEGORY_COLLECTION, id).await?;
        doc.map(decode).transpose()
    }

    pub async fn insert_category(&self, category: &Category) -> StoreResult<DocumentId> {
        self.store
            .insert_one(CATEGORY_COLLECTION, encode(category)?)
            .await
    }

    /// Set a new name; returns whether the category exists.
    pub async fn rename_category(&self, id: &DocumentId, name: &str) -> StoreResult<bool> {
        let mut set = Document::new();
        set.insert("name".to_string(), Value::String(name.to_string()));
        self.store.update_one(CATEGORY_COLLECTION, id, set).await
    }

    pub async fn delete_category(&self, id: &DocumentId) -> StoreResult<bool> {
        self.store.delete_one(CATEGORY_COLLECTION, id).await
    }

    pub async fn list_products(&self, options: FindOptions) -> StoreResult<Vec<Stored<Product>>> {
        let docs = self.store.find(PRODUCT_COLLECTION, options).await?;
        docs.into_iter().map(decode).collect()
    }

    pub async fn get_product(&self, id: &DocumentId) -> StoreResult<Option<Stored<Product>>> {
        let doc = self.store.find_one(PRODUCT_COLLECTION, id).await?;
        doc.map(decode).transpose()
    }

    pub async fn insert_product(&self, product: &Product) -> StoreResult<DocumentId> {
        self.store
            .insert_one(PRODUCT_COLLECTION, encode(product)?)
            .await
    }

    /// Apply the well-typed fields of `update`; returns whether the product exists.
    pub async fn update_product(&self, update: &ProductUpdate) -> StoreResult<bool> {
        self.store
            .update_one(PRODUCT_COLLECTION, &update.id, encode(&update.changes)?)
            .await
    }

    pub async fn delete_product(&self, id: &DocumentId) -> StoreResult<bool> {
        self.store.delete_one(PRODUCT_COLLECTION, id).await
    }
}

fn encode<T: Serialize>(value: &T) -> StoreResult<Document> {
    match serde_json::to_value(value).map_err(|e| StoreError::Encode(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Encode(format!("expected an object, got {other}"))),
    }
}

fn decode<T: DeserializeOwned>(doc: Document) -> StoreResult<Stored<T>> {
    serde_json::from_value(Value::Object(doc)).map_err(|e| StoreError::Decode(e.to_string()))
}
