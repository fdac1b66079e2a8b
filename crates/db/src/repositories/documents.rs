use crate::models::DbDocument;
use chrono::Utc;
use eyre::Result;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Fetches a collection in insertion order, narrowed by JSONB containment.
///
/// `containment` must be an object; an empty object matches every document.
pub async fn fetch_documents(
    pool: &Pool<Postgres>,
    collection: &str,
    containment: &Map<String, Value>,
) -> Result<Vec<DbDocument>> {
    tracing::debug!(
        "Fetching documents: collection={}, containment_keys={}",
        collection,
        containment.len()
    );

    let documents = sqlx::query_as::<_, DbDocument>(
        r#"
        SELECT collection, id, data, created_at
        FROM documents
        WHERE collection = $1 AND data @> $2
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(collection)
    .bind(Json(Value::Object(containment.clone())))
    .fetch_all(pool)
    .await?;

    tracing::debug!("Fetched {} documents from {}", documents.len(), collection);
    Ok(documents)
}

pub async fn get_document(
    pool: &Pool<Postgres>,
    collection: &str,
    id: &str,
) -> Result<Option<DbDocument>> {
    let document = sqlx::query_as::<_, DbDocument>(
        r#"
        SELECT collection, id, data, created_at
        FROM documents
        WHERE collection = $1 AND id = $2
        "#,
    )
    .bind(collection)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(document)
}

pub async fn insert_document(
    pool: &Pool<Postgres>,
    collection: &str,
    data: Map<String, Value>,
) -> Result<DbDocument> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    tracing::debug!("Creating document: collection={}, id={}", collection, id);

    let document = sqlx::query_as::<_, DbDocument>(
        r#"
        INSERT INTO documents (collection, id, data, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING collection, id, data, created_at
        "#,
    )
    .bind(collection)
    .bind(&id)
    .bind(Json(Value::Object(data)))
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(document)
}

pub async fn upsert_document(
    pool: &Pool<Postgres>,
    collection: &str,
    id: &str,
    data: Map<String, Value>,
) -> Result<DbDocument> {
    let now = Utc::now();

    let document = sqlx::query_as::<_, DbDocument>(
        r#"
        INSERT INTO documents (collection, id, data, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (collection, id)
        DO UPDATE SET data = $3
        RETURNING collection, id, data, created_at
        "#,
    )
    .bind(collection)
    .bind(id)
    .bind(Json(Value::Object(data)))
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(document)
}

/// Shallow-merges fields into an existing document. Returns `None` when the
/// document does not exist.
pub async fn merge_document(
    pool: &Pool<Postgres>,
    collection: &str,
    id: &str,
    data: Map<String, Value>,
) -> Result<Option<DbDocument>> {
    let document = sqlx::query_as::<_, DbDocument>(
        r#"
        UPDATE documents
        SET data = data || $3
        WHERE collection = $1 AND id = $2
        RETURNING collection, id, data, created_at
        "#,
    )
    .bind(collection)
    .bind(id)
    .bind(Json(Value::Object(data)))
    .fetch_optional(pool)
    .await?;

    Ok(document)
}
