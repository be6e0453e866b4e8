use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::domain::store::{
    Collection, Document, EntityStore, Filter, StoreError, StoreResult, Update, ID_FIELD,
};

const COLLECTIONS: [Collection; 3] = [Collection::Teams, Collection::Players, Collection::Matches];

/// PostgreSQL implementation of EntityStore
///
/// Every collection shares one `documents` table; a document is a JSONB body
/// keyed by `(collection, id)`. `seq` records insertion order. Unique fields
/// are enforced by partial expression indexes created in `ensure_schema`.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgresStore
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to connect to database: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Create the documents table and unique indexes if they are missing
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id UUID NOT NULL,
                seq BIGSERIAL NOT NULL,
                body JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(format!("Failed to create documents table: {}", e)))?;

        for collection in COLLECTIONS {
            for field in collection.unique_fields() {
                let statement = format!(
                    "CREATE UNIQUE INDEX IF NOT EXISTS documents_{c}_{f}_key \
                     ON documents ((body ->> '{f}')) WHERE collection = '{c}'",
                    c = collection.as_str(),
                    f = field,
                );
                sqlx::query(&statement)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        StoreError::Backend(format!("Failed to create unique index: {}", e))
                    })?;
            }
        }

        tracing::info!("Document schema ready");
        Ok(())
    }
}

/// Append the SQL condition for `filter` against the `body` column
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::All => {
            builder.push("TRUE");
        }
        Filter::Eq(field, value) => {
            let mut probe = Document::new();
            probe.insert(field.clone(), value.clone());
            builder.push("body @> ").push_bind(Json(Value::Object(probe)));
        }
        Filter::In(field, values) => {
            let texts: Vec<String> = values.iter().map(value_text).collect();
            builder
                .push("(body ->> ")
                .push_bind(field.clone())
                .push(") = ANY(")
                .push_bind(texts)
                .push(")");
        }
    }
}

/// Append a sub-select of the first matching document's id
fn push_target(builder: &mut QueryBuilder<'_, Postgres>, collection: Collection, filter: &Filter) {
    builder
        .push("(SELECT id FROM documents WHERE collection = ")
        .push_bind(collection.as_str())
        .push(" AND ");
    push_filter(builder, filter);
    builder.push(" ORDER BY seq LIMIT 1)");
}

/// Append the new body expression for `update`
fn push_update(builder: &mut QueryBuilder<'_, Postgres>, update: &Update) {
    match update {
        Update::Set(fields) => {
            let mut patch = fields.clone();
            patch.remove(ID_FIELD);
            builder.push("body || ").push_bind(Json(Value::Object(patch)));
        }
        Update::Push(field, value) => {
            builder
                .push("jsonb_set(body, ARRAY[")
                .push_bind(field.clone())
                .push("]::text[], ");
            push_array_of(builder, field);
            builder
                .push(" || jsonb_build_array(")
                .push_bind(Json(value.clone()))
                .push("::jsonb))");
        }
        Update::Pull(field, value) => {
            builder
                .push("jsonb_set(body, ARRAY[")
                .push_bind(field.clone())
                .push("]::text[], COALESCE((SELECT jsonb_agg(elem) FROM jsonb_array_elements(");
            push_array_of(builder, field);
            builder
                .push(") AS elem WHERE elem <> ")
                .push_bind(Json(value.clone()))
                .push("::jsonb), '[]'::jsonb))");
        }
    }
}

/// `body -> field` when it is an array, an empty array otherwise
fn push_array_of(builder: &mut QueryBuilder<'_, Postgres>, field: &str) {
    builder
        .push("(CASE WHEN jsonb_typeof(body -> ")
        .push_bind(field.to_string())
        .push(") = 'array' THEN body -> ")
        .push_bind(field.to_string())
        .push(" ELSE '[]'::jsonb END)");
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn row_to_document(row: PgRow) -> StoreResult<Document> {
    let Json(body): Json<Value> = row
        .try_get("body")
        .map_err(|e| StoreError::Backend(format!("Failed to read document body: {}", e)))?;

    match body {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Backend(format!(
            "Stored body is not an object: {}",
            other
        ))),
    }
}

/// Translate a unique violation into DuplicateKey, anything else into Backend
fn write_error(error: sqlx::Error, collection: Collection, candidate: &Document, action: &str) -> StoreError {
    let is_unique_violation = error
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false);

    if is_unique_violation {
        let (field, value) = collection
            .unique_fields()
            .iter()
            .find_map(|field| candidate.get(*field).map(|value| (field.to_string(), value_text(value))))
            .or_else(|| {
                candidate
                    .get(ID_FIELD)
                    .map(|value| (ID_FIELD.to_string(), value_text(value)))
            })
            .unwrap_or_default();

        return StoreError::DuplicateKey {
            collection,
            field,
            value,
        };
    }

    StoreError::Backend(format!("Failed to {} in {}: {}", action, collection, error))
}

#[async_trait]
impl EntityStore for PostgresStore {
    async fn insert(&self, collection: Collection, mut document: Document) -> StoreResult<Document> {
        let id = match document.get(ID_FIELD).and_then(Value::as_str) {
            Some(raw) => Uuid::parse_str(raw)
                .map_err(|e| StoreError::Backend(format!("Invalid document id {}: {}", raw, e)))?,
            None => {
                let id = Uuid::new_v4();
                document.insert(ID_FIELD.to_string(), id.to_string().into());
                id
            }
        };

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection.as_str())
            .bind(id)
            .bind(Json(Value::Object(document.clone())))
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, collection, &document, "insert document"))?;

        Ok(document)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<Option<Document>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT body FROM documents WHERE collection = ");
        builder.push_bind(collection.as_str()).push(" AND ");
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY seq LIMIT 1");

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to find document in {}: {}", collection, e)))?;

        row.map(row_to_document).transpose()
    }

    async fn find_many(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT body FROM documents WHERE collection = ");
        builder.push_bind(collection.as_str()).push(" AND ");
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY seq");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to find documents in {}: {}", collection, e)))?;

        rows.into_iter().map(row_to_document).collect()
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
    ) -> StoreResult<Option<Document>> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE documents SET body = ");
        push_update(&mut builder, update);
        builder
            .push(" WHERE collection = ")
            .push_bind(collection.as_str())
            .push(" AND id = ");
        push_target(&mut builder, collection, filter);
        builder.push(" RETURNING body");

        let candidate = match update {
            Update::Set(fields) => fields.clone(),
            Update::Push(..) | Update::Pull(..) => Document::new(),
        };

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error(e, collection, &candidate, "update document"))?;

        row.map(row_to_document).transpose()
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<Option<Document>> {
        let mut builder = QueryBuilder::<Postgres>::new("DELETE FROM documents WHERE collection = ");
        builder.push_bind(collection.as_str()).push(" AND id = ");
        push_target(&mut builder, collection, filter);
        builder.push(" RETURNING body");

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to delete document in {}: {}", collection, e)))?;

        row.map(row_to_document).transpose()
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
