use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use warehouse_core::DocumentId;

use super::{Document, DocumentStore, FindOptions, ID_FIELD, StoreResult, with_id};

/// In-memory document store for tests/dev.
///
/// Each collection keeps documents in insertion order, which is the order
/// `find` returns them in.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    inner: RwLock<HashMap<String, Vec<(DocumentId, Document)>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find_one(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(map.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(doc_id, _)| doc_id == id)
                .map(|(doc_id, body)| with_id(doc_id, body.clone()))
        }))
    }

    async fn find(&self, collection: &str, options: FindOptions) -> StoreResult<Vec<Document>> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let Some(docs) = map.get(collection) else {
            return Ok(vec![]);
        };

        let skip = options.skip.unwrap_or(0) as usize;
        let limit = options.limit.map_or(usize::MAX, |l| l as usize);

        Ok(docs
            .iter()
            .skip(skip)
            .take(limit)
            .map(|(doc_id, body)| with_id(doc_id, body.clone()))
            .collect())
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> StoreResult<DocumentId> {
        let id = DocumentId::generate();
        document.remove(ID_FIELD);

        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.entry(collection.to_string())
            .or_default()
            .push((id.clone(), document));
        Ok(id)
    }

    async fn update_one(&self, collection: &str, id: &DocumentId, set: Document) -> StoreResult<bool> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let Some((_, body)) = map
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == id))
        else {
            return Ok(false);
        };

        body.extend(set.into_iter().filter(|(k, _)| k != ID_FIELD));
        Ok(true)
    }

    async fn delete_one(&self, collection: &str, id: &DocumentId) -> StoreResult<bool> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let Some(docs) = map.get_mut(collection) else {
            return Ok(false);
        };

        match docs.iter().position(|(doc_id, _)| doc_id == id) {
            Some(index) => {
                docs.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn insert_then_find_one_returns_document_with_id() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .insert_one("category", doc(json!({ "name": "Tools" })))
            .await
            .unwrap();

        let found = store.find_one("category", &id).await.unwrap().unwrap();
        assert_eq!(Value::Object(found), json!({ "_id": id.as_str(), "name": "Tools" }));
    }

    #[tokio::test]
    async fn collections_are_independent() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .insert_one("category", doc(json!({ "name": "Tools" })))
            .await
            .unwrap();

        assert!(store.find_one("product", &id).await.unwrap().is_none());
        assert!(store.find("product", FindOptions::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_respects_insertion_order_skip_and_limit() {
        let store = InMemoryDocumentStore::new();
        for n in 0..5 {
            store
                .insert_one("product", doc(json!({ "n": n })))
                .await
                .unwrap();
        }

        let page = store
            .find(
                "product",
                FindOptions {
                    skip: Some(1),
                    limit: Some(2),
                },
            )
            .await
            .unwrap();
        let ns: Vec<_> = page.iter().map(|d| d["n"].clone()).collect();
        assert_eq!(ns, vec![json!(1), json!(2)]);

        let all = store.find("product", FindOptions::default()).await.unwrap();
        assert_eq!(all.len(), 5);
    }

    #[tokio::test]
    async fn update_merges_fields_and_reports_match() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .insert_one("product", doc(json!({ "name": "Widget", "price": 1 })))
            .await
            .unwrap();

        let matched = store
            .update_one("product", &id, doc(json!({ "price": 2, "_id": "other" })))
            .await
            .unwrap();
        assert!(matched);

        let found = store.find_one("product", &id).await.unwrap().unwrap();
        assert_eq!(
            Value::Object(found),
            json!({ "_id": id.as_str(), "name": "Widget", "price": 2 })
        );
    }

    #[tokio::test]
    async fn empty_update_still_reports_match() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .insert_one("product", doc(json!({ "name": "Widget" })))
            .await
            .unwrap();

        assert!(store.update_one("product", &id, Document::new()).await.unwrap());
        assert!(
            !store
                .update_one("product", &DocumentId::from("missing"), Document::new())
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn delete_reports_match_once() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .insert_one("category", doc(json!({ "name": "Tools" })))
            .await
            .unwrap();

        assert!(store.delete_one("category", &id).await.unwrap());
        assert!(!store.delete_one("category", &id).await.unwrap());
        assert!(store.find_one("category", &id).await.unwrap().is_none());
    }
}
