use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::store::{
    Collection, Document, EntityStore, Filter, StoreError, StoreResult, Update, ID_FIELD,
};

/// In-process implementation of EntityStore
///
/// Keeps each collection as a vector in insertion order behind one lock, so
/// every operation is atomic with respect to the others. Used by the test
/// suites and when no database is configured.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    /// Creates an empty MemoryStore
    pub fn new() -> Self {
        Self::default()
    }
}

/// Fail if `candidate` would share a unique field value with another document
fn check_unique(
    collection: Collection,
    documents: &[Document],
    candidate: &Document,
    skip_index: Option<usize>,
) -> StoreResult<()> {
    for field in collection.unique_fields() {
        let Some(value) = candidate.get(*field) else {
            continue;
        };

        let clash = documents
            .iter()
            .enumerate()
            .any(|(index, doc)| Some(index) != skip_index && doc.get(*field) == Some(value));

        if clash {
            return Err(StoreError::DuplicateKey {
                collection,
                field: field.to_string(),
                value: display_value(value),
            });
        }
    }

    Ok(())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert(&self, collection: Collection, mut document: Document) -> StoreResult<Document> {
        if !document.contains_key(ID_FIELD) {
            document.insert(ID_FIELD.to_string(), Uuid::new_v4().to_string().into());
        }

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        check_unique(collection, documents, &document, None)?;
        if let Some(id) = document.get(ID_FIELD) {
            if documents.iter().any(|doc| doc.get(ID_FIELD) == Some(id)) {
                return Err(StoreError::DuplicateKey {
                    collection,
                    field: ID_FIELD.to_string(),
                    value: display_value(id),
                });
            }
        }

        documents.push(document.clone());
        Ok(document)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)))
            .cloned())
    }

    async fn find_many(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
    ) -> StoreResult<Option<Document>> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(None);
        };
        let Some(index) = documents.iter().position(|doc| filter.matches(doc)) else {
            return Ok(None);
        };

        let mut updated = documents[index].clone();
        update.apply(&mut updated);
        check_unique(collection, documents, &updated, Some(index))?;

        documents[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<Option<Document>> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(None);
        };

        Ok(documents
            .iter()
            .position(|doc| filter.matches(doc))
            .map(|index| documents.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::Reference;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().expect("object")
    }

    #[tokio::test]
    async fn insert_assigns_identity() {
        let store = MemoryStore::new();
        let stored = store
            .insert(Collection::Teams, doc(json!({"name": "Tigers"})))
            .await
            .unwrap();

        let id = stored[ID_FIELD].as_str().expect("string id");
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn duplicate_team_name_is_rejected() {
        let store = MemoryStore::new();
        store
            .insert(Collection::Teams, doc(json!({"name": "Tigers", "coach": "A"})))
            .await
            .unwrap();

        let err = store
            .insert(Collection::Teams, doc(json!({"name": "Tigers", "coach": "B"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { ref field, .. } if field == "name"));

        let all = store.find_many(Collection::Teams, &Filter::All).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0]["coach"], "A");
    }

    #[tokio::test]
    async fn player_names_need_not_be_unique() {
        let store = MemoryStore::new();
        for _ in 0..2 {
            store
                .insert(Collection::Players, doc(json!({"name": "Ravi"})))
                .await
                .unwrap();
        }

        let players = store
            .find_many(Collection::Players, &Filter::eq("name", "Ravi"))
            .await
            .unwrap();
        assert_eq!(players.len(), 2);
    }

    #[tokio::test]
    async fn rename_onto_existing_name_is_rejected() {
        let store = MemoryStore::new();
        for name in ["Tigers", "Lions"] {
            store
                .insert(Collection::Teams, doc(json!({"name": name})))
                .await
                .unwrap();
        }

        let result = store
            .update_one(
                Collection::Teams,
                &Filter::eq("name", "Lions"),
                &Update::Set(doc(json!({"name": "Tigers"}))),
            )
            .await;
        assert!(matches!(result, Err(StoreError::DuplicateKey { .. })));

        let lions = store
            .find_one(Collection::Teams, &Filter::eq("name", "Lions"))
            .await
            .unwrap();
        assert!(lions.is_some());
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_documents() {
        let store = MemoryStore::new();
        let filter = Filter::eq("name", "Nobody");

        let updated = store
            .update_one(Collection::Players, &filter, &Update::push("x", 1))
            .await
            .unwrap();
        assert!(updated.is_none());

        let deleted = store.delete_one(Collection::Players, &filter).await.unwrap();
        assert!(deleted.is_none());
    }

    #[tokio::test]
    async fn delete_returns_removed_document() {
        let store = MemoryStore::new();
        store
            .insert(Collection::Teams, doc(json!({"name": "Tigers"})))
            .await
            .unwrap();

        let deleted = store
            .delete_one(Collection::Teams, &Filter::eq("name", "Tigers"))
            .await
            .unwrap()
            .expect("deleted document");
        assert_eq!(deleted["name"], "Tigers");
        assert!(store
            .find_many(Collection::Teams, &Filter::All)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn resolve_references_populates_from_other_collection() {
        let store = MemoryStore::new();
        let team = store
            .insert(Collection::Teams, doc(json!({"name": "Tigers"})))
            .await
            .unwrap();
        let player = store
            .insert(
                Collection::Players,
                doc(json!({"name": "Ravi", "team": team[ID_FIELD].clone()})),
            )
            .await
            .unwrap();

        let populated = store
            .resolve_references(player, &[Reference::new("team", Collection::Teams)])
            .await
            .unwrap();
        assert_eq!(populated["team"]["name"], "Tigers");
    }
}
