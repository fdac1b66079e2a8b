use async_trait::async_trait;
use serde_json::{Map, Value};
use studyconnect_core::{
    errors::{StudyError, StudyResult},
    record::{Record, parse_timestamp},
    store::{DocumentStore, Query},
};

use crate::DbPool;
use crate::repositories::documents;

/// Document store backed by the Postgres `documents` table.
///
/// Plain string and boolean equality filters are pushed down as JSONB
/// containment; everything else is evaluated by [`Query::apply`] on the
/// fetched rows so both stores share one set of semantics.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Equality filters whose JSON equality matches the evaluator's equality.
pub fn pushdown_containment(query: &Query) -> Map<String, Value> {
    let mut containment = Map::new();
    for filter in query.equality_filters() {
        let exact = match &filter.value {
            Value::Bool(_) => true,
            Value::String(_) => parse_timestamp(&filter.value).is_none(),
            _ => false,
        };
        if exact && !containment.contains_key(&filter.field) {
            containment.insert(filter.field.clone(), filter.value.clone());
        }
    }
    containment
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn fetch_collection(&self, collection: &str, query: &Query) -> StudyResult<Vec<Record>> {
        let containment = pushdown_containment(query);
        let rows = documents::fetch_documents(&self.pool, collection, &containment).await?;
        let records = rows.into_iter().map(Record::from).collect();
        Ok(query.apply(records))
    }

    async fn get_document(&self, collection: &str, id: &str) -> StudyResult<Option<Record>> {
        let row = documents::get_document(&self.pool, collection, id).await?;
        Ok(row.map(Record::from))
    }

    async fn add_document(&self, collection: &str, fields: Map<String, Value>) -> StudyResult<String> {
        let row = documents::insert_document(&self.pool, collection, fields).await?;
        Ok(row.id)
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StudyResult<()> {
        documents::upsert_document(&self.pool, collection, id, fields).await?;
        Ok(())
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StudyResult<()> {
        documents::merge_document(&self.pool, collection, id, fields)
            .await?
            .ok_or_else(|| StudyError::NotFound(format!("{}/{} not found", collection, id)))?;
        Ok(())
    }
}
