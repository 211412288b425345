//! Document store client: a thin seam over the underlying document database.
//!
//! The store executes exactly one attempt per call and surfaces faults as
//! [`StoreError`]; retry policy, if any, belongs to a caller-side wrapper.
//! Controllers classify errors (not-found vs everything else) and own the
//! HTTP mapping.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::query::QuerySpec;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document {id} not found in collection {collection}")]
    NotFound { id: String, collection: String },
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("backend: {0}")]
    Backend(String),
}

/// Per-query execution options.
///
/// `enable_cross_partition` must be set whenever the predicate does not pin
/// the partition key. In this domain that is every id- and filter-based
/// query, since `id` is deliberately not the partition key: correctness over
/// partition-locality, acceptable at catalog scale.
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryOptions {
    pub enable_cross_partition: bool,
}

impl QueryOptions {
    pub fn cross_partition() -> Self {
        QueryOptions {
            enable_cross_partition: true,
        }
    }
}

/// Issue parameterized queries, point reads, upserts, and deletes against a
/// named database and collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn query(
        &self,
        database: &str,
        collection: &str,
        spec: &QuerySpec,
        options: QueryOptions,
    ) -> Result<Vec<Value>, StoreError>;

    /// Point read by document id. The partition key hint routes the read when
    /// the store supports it; backends that shard differently may ignore it.
    async fn get_by_id(
        &self,
        database: &str,
        collection: &str,
        partition_key: &str,
        id: &str,
    ) -> Result<Option<Value>, StoreError>;

    /// Create-or-full-replace keyed by the document's `id` field.
    async fn upsert(
        &self,
        database: &str,
        collection: &str,
        document: Value,
    ) -> Result<Value, StoreError>;

    async fn delete(
        &self,
        database: &str,
        collection: &str,
        id: &str,
    ) -> Result<(), StoreError>;
}

/// The `id` field a document must carry to be upserted or deleted.
pub(crate) fn document_id(document: &Value) -> Result<String, StoreError> {
    document
        .get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| StoreError::InvalidDocument("document has no 'id' field".into()))
}
