//! MongoDB-backed document store.
//!
//! Query shapes are translated into find filters; the lower-cased substring
//! semantics of the filtered scan become an escaped `$regex` over the
//! already lower-cased `textSearch` field. Upserts are whole-document
//! replacements keyed by the `id` field.

use crate::query::{QueryShape, QuerySpec};
use crate::store::{document_id, DocumentStore, QueryOptions, StoreError};
use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Collection};
use serde_json::Value;

pub struct MongoStore {
    client: Client,
}

impl MongoStore {
    /// Connect with the resolved store URL and access key. A single client is
    /// long-lived and safe for concurrent use across requests.
    pub async fn connect(url: &str, access_key: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(url).await.map_err(backend)?;
        apply_access_key(&mut options, access_key);
        let client = Client::with_options(options).map_err(backend)?;
        Ok(MongoStore { client })
    }

    fn collection(&self, database: &str, collection: &str) -> Collection<Value> {
        self.client.database(database).collection(collection)
    }
}

fn backend(e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// Set the access key as the credential password while keeping whatever
/// username, auth source, or mechanism the connection URL already carried.
fn apply_access_key(options: &mut ClientOptions, access_key: &str) {
    if access_key.is_empty() {
        return;
    }
    let mut credential = options.credential.take().unwrap_or_else(Credential::default);
    credential.password = Some(access_key.to_string());
    options.credential = Some(credential);
}

/// Projection for read queries. Mongo's auto-generated `_id` never leaves the
/// store seam: documents must come back exactly as they were upserted.
fn projection_for(shape: &QueryShape) -> Document {
    match shape {
        QueryShape::ScanValues { field, .. } => doc! { *field: 1, "_id": 0 },
        _ => doc! { "_id": 0 },
    }
}

/// Escape regex metacharacters so a filter term is matched literally.
fn escape_regex(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '.' | '^' | '$' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn filter_for(spec: &QuerySpec) -> Document {
    match &spec.shape {
        QueryShape::AnyDocument => doc! {},
        QueryShape::ScanAll { doc_type } | QueryShape::ScanValues { doc_type, .. } => {
            doc! { "type": doc_type.as_str() }
        }
        QueryShape::TextContains { doc_type } => {
            let term = spec.param("@title").and_then(Value::as_str).unwrap_or("");
            doc! {
                "type": doc_type.as_str(),
                "textSearch": { "$regex": escape_regex(term) },
            }
        }
        QueryShape::ById { doc_type } => {
            let id = spec.param("@id").and_then(Value::as_str).unwrap_or("");
            doc! { "type": doc_type.as_str(), "id": id }
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn query(
        &self,
        database: &str,
        collection: &str,
        spec: &QuerySpec,
        options: QueryOptions,
    ) -> Result<Vec<Value>, StoreError> {
        tracing::debug!(
            query = %spec.query,
            cross_partition = options.enable_cross_partition,
            "store query"
        );
        let coll = self.collection(database, collection);
        let filter = filter_for(spec);

        let mut find = coll.find(filter).projection(projection_for(&spec.shape));
        // The liveness probe only needs proof of connectivity.
        if spec.shape == QueryShape::AnyDocument {
            find = find.limit(1);
        }

        let docs: Vec<Value> = find
            .await
            .map_err(backend)?
            .try_collect()
            .await
            .map_err(backend)?;

        if let QueryShape::ScanValues { field, .. } = &spec.shape {
            return Ok(docs
                .into_iter()
                .filter_map(|doc| doc.get(*field).cloned())
                .collect());
        }
        Ok(docs)
    }

    async fn get_by_id(
        &self,
        database: &str,
        collection: &str,
        partition_key: &str,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        tracing::debug!(id, partition_key, "store point read");
        self.collection(database, collection)
            .find_one(doc! { "id": id })
            .projection(doc! { "_id": 0 })
            .await
            .map_err(backend)
    }

    async fn upsert(
        &self,
        database: &str,
        collection: &str,
        document: Value,
    ) -> Result<Value, StoreError> {
        let id = document_id(&document)?;
        self.collection(database, collection)
            .replace_one(doc! { "id": &id }, &document)
            .upsert(true)
            .await
            .map_err(backend)?;
        Ok(document)
    }

    async fn delete(
        &self,
        database: &str,
        collection: &str,
        id: &str,
    ) -> Result<(), StoreError> {
        let result = self
            .collection(database, collection)
            .delete_one(doc! { "id": id })
            .await
            .map_err(backend)?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound {
                id: id.to_string(),
                collection: collection.to_string(),
            });
        }
        Ok(())
    }
}
