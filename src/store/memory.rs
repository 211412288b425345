//! In-memory store backend for tests and local development.
//!
//! Documents are held as JSON values keyed by id, per (database, collection)
//! pair, behind an async read-write lock. Queries scan the whole collection
//! and evaluate the query shape; fine at catalog scale, which is all this
//! backend is for.

use crate::query::{QueryShape, QuerySpec};
use crate::store::{document_id, DocumentStore, QueryOptions, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type CollectionMap = HashMap<String, Value>;
type StoreMap = HashMap<(String, String), CollectionMap>;

/// Cloneable, Arc-shared in-memory document store. Clones see the same data.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    store: Arc<RwLock<StoreMap>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed documents directly, bypassing the write path. Test helper.
    pub async fn seed(&self, database: &str, collection: &str, documents: Vec<Value>) {
        let mut store = self.store.write().await;
        let map = store
            .entry((database.to_string(), collection.to_string()))
            .or_default();
        for doc in documents {
            if let Some(id) = doc.get("id").and_then(Value::as_str) {
                map.insert(id.to_string(), doc.clone());
            }
        }
    }
}

fn matches(shape: &QueryShape, spec: &QuerySpec, doc: &Value) -> bool {
    let doc_type_is = |t: &crate::models::DocType| {
        doc.get("type").and_then(Value::as_str) == Some(t.as_str())
    };
    match shape {
        QueryShape::AnyDocument => true,
        QueryShape::ScanAll { doc_type } | QueryShape::ScanValues { doc_type, .. } => {
            doc_type_is(doc_type)
        }
        QueryShape::TextContains { doc_type } => {
            let term = spec.param("@title").and_then(Value::as_str).unwrap_or("");
            doc_type_is(doc_type)
                && doc
                    .get("textSearch")
                    .and_then(Value::as_str)
                    .is_some_and(|s| s.contains(term))
        }
        QueryShape::ById { doc_type } => {
            let id = spec.param("@id").and_then(Value::as_str).unwrap_or("");
            doc_type_is(doc_type) && doc.get("id").and_then(Value::as_str) == Some(id)
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn query(
        &self,
        database: &str,
        collection: &str,
        spec: &QuerySpec,
        _options: QueryOptions,
    ) -> Result<Vec<Value>, StoreError> {
        let store = self.store.read().await;
        let docs = store
            .get(&(database.to_string(), collection.to_string()))
            .map(|m| m.values().cloned().collect::<Vec<_>>())
            .unwrap_or_default();

        let mut hits: Vec<Value> = docs
            .into_iter()
            .filter(|doc| matches(&spec.shape, spec, doc))
            .collect();
        // HashMap iteration order is arbitrary; keep results stable by id.
        hits.sort_by(|a, b| {
            let ida = a.get("id").and_then(Value::as_str).unwrap_or("");
            let idb = b.get("id").and_then(Value::as_str).unwrap_or("");
            ida.cmp(idb)
        });

        if let QueryShape::ScanValues { field, .. } = &spec.shape {
            return Ok(hits
                .into_iter()
                .filter_map(|doc| doc.get(*field).cloned())
                .collect());
        }
        Ok(hits)
    }

    async fn get_by_id(
        &self,
        database: &str,
        collection: &str,
        _partition_key: &str,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        let store = self.store.read().await;
        Ok(store
            .get(&(database.to_string(), collection.to_string()))
            .and_then(|m| m.get(id))
            .cloned())
    }

    async fn upsert(
        &self,
        database: &str,
        collection: &str,
        document: Value,
    ) -> Result<Value, StoreError> {
        let id = document_id(&document)?;
        let mut store = self.store.write().await;
        store
            .entry((database.to_string(), collection.to_string()))
            .or_default()
            .insert(id, document.clone());
        Ok(document)
    }

    async fn delete(
        &self,
        database: &str,
        collection: &str,
        id: &str,
    ) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        let removed = store
            .get_mut(&(database.to_string(), collection.to_string()))
            .and_then(|m| m.remove(id));
        match removed {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound {
                id: id.to_string(),
                collection: collection.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocType;
    use serde_json::json;

    const DB: &str = "imdb";
    const COLL: &str = "media";

    fn sample_docs() -> Vec<Value> {
        vec![
            json!({"id": "tt0087182", "type": "Movie", "title": "Dune", "textSearch": "dune 1984"}),
            json!({"id": "tt1160419", "type": "Movie", "title": "Dune", "textSearch": "dune 2021"}),
            json!({"id": "tt0081505", "type": "Movie", "title": "The Shining", "textSearch": "the shining 1980"}),
            json!({"id": "nm0000517", "type": "Actor", "name": "Kyle MacLachlan", "textSearch": "kyle maclachlan"}),
            json!({"id": "Sci-Fi", "type": "Genre"}),
            json!({"id": "Horror", "type": "Genre"}),
        ]
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store.seed(DB, COLL, sample_docs()).await;
        store
    }

    #[tokio::test]
    async fn scan_all_returns_only_matching_type() {
        let store = seeded().await;
        let spec = QuerySpec::scan_all(DocType::Movie);
        let hits = store
            .query(DB, COLL, &spec, QueryOptions::cross_partition())
            .await
            .unwrap();
        assert_eq!(hits.len(), 3);
        assert!(hits
            .iter()
            .all(|d| d.get("type").and_then(Value::as_str) == Some("Movie")));
    }

    #[tokio::test]
    async fn filtered_results_are_a_subset_containing_the_term() {
        let store = seeded().await;
        let all = store
            .query(DB, COLL, &QuerySpec::scan_all(DocType::Movie), QueryOptions::cross_partition())
            .await
            .unwrap();
        let filtered = store
            .query(
                DB,
                COLL,
                &QuerySpec::filtered(DocType::Movie, "DUNE"),
                QueryOptions::cross_partition(),
            )
            .await
            .unwrap();
        assert_eq!(filtered.len(), 2);
        for doc in &filtered {
            assert!(all.contains(doc));
            let ts = doc.get("textSearch").and_then(Value::as_str).unwrap();
            assert!(ts.contains("dune"));
        }
    }

    #[tokio::test]
    async fn values_projection_returns_bare_ids() {
        let store = seeded().await;
        let spec = QuerySpec::values(DocType::Genre, "id");
        let hits = store
            .query(DB, COLL, &spec, QueryOptions::cross_partition())
            .await
            .unwrap();
        assert_eq!(hits, vec![json!("Horror"), json!("Sci-Fi")]);
    }

    #[tokio::test]
    async fn delete_then_get_is_absent_and_second_delete_is_not_found() {
        let store = seeded().await;
        store.delete(DB, COLL, "tt0087182").await.unwrap();
        let doc = store.get_by_id(DB, COLL, "0", "tt0087182").await.unwrap();
        assert!(doc.is_none());
        let err = store.delete(DB, COLL, "tt0087182").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn upsert_replaces_whole_document() {
        let store = seeded().await;
        let replacement = json!({"id": "tt0087182", "type": "Movie", "title": "Dune", "textSearch": "dune 1984", "year": 1984});
        store.upsert(DB, COLL, replacement.clone()).await.unwrap();
        let doc = store
            .get_by_id(DB, COLL, "0", "tt0087182")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc, replacement);
    }

    #[tokio::test]
    async fn upsert_without_id_is_rejected() {
        let store = MemoryStore::new();
        let err = store
            .upsert(DB, COLL, json!({"title": "Dune"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument(_)));
    }
}
