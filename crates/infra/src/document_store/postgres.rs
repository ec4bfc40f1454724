//! Postgres-backed document store.
//!
//! All collections share one `documents` table. Document bodies are stored as
//! JSONB, and `$set` updates are expressed as JSONB concatenation so only the
//! supplied keys change. `seq` preserves insertion order for scans.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use warehouse_core::DocumentId;

use super::{Document, DocumentStore, FindOptions, ID_FIELD, StoreError, StoreResult, with_id};

pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool of at most `max_connections` to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the backing table if it does not exist yet.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT      NOT NULL,
                id         TEXT      NOT NULL,
                seq        BIGSERIAL NOT NULL,
                body       JSONB     NOT NULL,
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS documents_collection_seq ON documents (collection, seq)",
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("document store schema ready");
        Ok(())
    }
}

fn decode_row(row: &sqlx::postgres::PgRow) -> StoreResult<Document> {
    let id: String = row.try_get("id")?;
    let Json(body): Json<Value> = row.try_get("body")?;

    match body {
        Value::Object(map) => Ok(with_id(&DocumentId::from(id), map)),
        other => Err(StoreError::Decode(format!(
            "document {id} is not an object: {other}"
        ))),
    }
}

fn to_i64(value: u64, what: &str) -> StoreResult<i64> {
    i64::try_from(value).map_err(|_| StoreError::Encode(format!("{what} out of range: {value}")))
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn find_one(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>> {
        let row = sqlx::query("SELECT id, body FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(decode_row).transpose()
    }

    async fn find(&self, collection: &str, options: FindOptions) -> StoreResult<Vec<Document>> {
        let skip = options.skip.map(|s| to_i64(s, "skip")).transpose()?;
        let limit = options.limit.map(|l| to_i64(l, "limit")).transpose()?;

        // NULL offset/limit mean "no skip" and "no limit" in Postgres.
        let rows = sqlx::query(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1
            ORDER BY seq
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(collection)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(decode_row).collect()
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> StoreResult<DocumentId> {
        let id = DocumentId::generate();
        document.remove(ID_FIELD);

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(id.as_str())
            .bind(Json(Value::Object(document)))
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn update_one(&self, collection: &str, id: &DocumentId, mut set: Document) -> StoreResult<bool> {
        set.remove(ID_FIELD);

        let result = sqlx::query(
            "UPDATE documents SET body = body || $3 WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id.as_str())
        .bind(Json(Value::Object(set)))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_one(&self, collection: &str, id: &DocumentId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
