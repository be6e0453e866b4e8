// Entity Store port
// Generic document-collection interface the repositories are written against.
// Adapters live in infrastructure::store.

mod populate;
mod query;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use query::{Filter, Update};

/// A stored document: a JSON object carrying its identity under `id`
pub type Document = Map<String, Value>;

/// Store handle shared by handlers and repositories
pub type SharedStore = Arc<dyn EntityStore>;

/// Field every document carries its identity in
pub const ID_FIELD: &str = "id";

/// Document collections known to the league
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Teams,
    Players,
    Matches,
}

impl Collection {
    /// Name used for the collection in persistent storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Teams => "teams",
            Collection::Players => "players",
            Collection::Matches => "matches",
        }
    }

    /// Top-level fields whose values must be unique across the collection
    pub fn unique_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Teams => &["name"],
            Collection::Players | Collection::Matches => &[],
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by Entity Store adapters
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate key in {collection}: {field} = {value}")]
    DuplicateKey {
        collection: Collection,
        field: String,
        value: String,
    },

    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Malformed document: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Serialize a typed record into a storable document
pub fn to_document<T: Serialize>(record: &T) -> StoreResult<Document> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Backend(format!(
            "Expected a JSON object, got {}",
            other
        ))),
    }
}

/// Deserialize a stored document into a typed record
pub fn from_document<T: DeserializeOwned>(document: Document) -> StoreResult<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

/// A field path holding identities of documents in another collection
///
/// Paths are dotted (`scores.team`); arrays met along the way are walked
/// element by element.
#[derive(Debug, Clone, Copy)]
pub struct Reference {
    pub path: &'static str,
    pub collection: Collection,
}

impl Reference {
    pub const fn new(path: &'static str, collection: Collection) -> Self {
        Self { path, collection }
    }
}

/// Document database contract consumed by every repository
///
/// Single-document operations (`find_one`, `update_one`, `delete_one`) act on
/// the first matching document in insertion order. `find_many` keeps
/// insertion order.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Insert a document, assigning an `id` if it has none.
    /// Fails with `DuplicateKey` when a unique field collides.
    async fn insert(&self, collection: Collection, document: Document) -> StoreResult<Document>;

    async fn find_one(&self, collection: Collection, filter: &Filter)
        -> StoreResult<Option<Document>>;

    async fn find_many(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>>;

    /// Apply `update` to the first match and return the post-update document
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
    ) -> StoreResult<Option<Document>>;

    /// Remove the first match and return it
    async fn delete_one(&self, collection: Collection, filter: &Filter)
        -> StoreResult<Option<Document>>;

    /// Release connections held by the store
    async fn close(&self) {}

    /// Replace identity references with the documents they point to
    ///
    /// A single reference that no longer resolves becomes `null`; dangling
    /// entries of an identity array are dropped.
    async fn resolve_references(
        &self,
        mut document: Document,
        references: &[Reference],
    ) -> StoreResult<Document> {
        for reference in references {
            let ids = populate::collect_ids(&document, reference.path);
            if ids.is_empty() {
                continue;
            }

            let found = self
                .find_many(reference.collection, &Filter::is_in(ID_FIELD, ids))
                .await?;
            let lookup = populate::index_by_id(found);
            populate::substitute(&mut document, reference.path, &lookup);
        }

        Ok(document)
    }
}
