use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use sqlx::types::Json;
use studyconnect_core::record::Record;

#[derive(Debug, Clone, FromRow)]
pub struct DbDocument {
    pub collection: String,
    pub id: String,
    pub data: Json<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<DbDocument> for Record {
    fn from(doc: DbDocument) -> Self {
        Record::from_value(doc.id, doc.data.0)
    }
}
