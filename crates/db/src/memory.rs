use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use eyre::{Result, WrapErr, eyre};
use serde_json::{Map, Value};
use studyconnect_core::{
    errors::{StudyError, StudyResult},
    record::Record,
    store::{DocumentStore, Query},
};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// In-process document store. Each collection keeps insertion order, which
/// is the order fetches return before any `order_by` is applied.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from `{ "collection": [ { "id": .., ..fields }, .. ] }`.
    ///
    /// Documents without a string `id` get a generated one.
    pub fn from_seed(seed: Value) -> Result<Self> {
        let Value::Object(seed) = seed else {
            return Err(eyre!("Seed must be an object of collections"));
        };

        let mut collections = HashMap::new();
        for (name, documents) in seed {
            let Value::Array(documents) = documents else {
                return Err(eyre!("Seed collection {} must be an array", name));
            };

            let records = documents
                .into_iter()
                .map(|document| {
                    let mut fields = match document {
                        Value::Object(map) => map,
                        other => return Err(eyre!("Seed document in {} is not an object: {}", name, other)),
                    };
                    let id = match fields.remove("id") {
                        Some(Value::String(id)) => id,
                        _ => Uuid::new_v4().to_string(),
                    };
                    Ok(Record::new(id, fields))
                })
                .collect::<Result<Vec<_>>>()?;

            collections.insert(name, records);
        }

        Ok(Self {
            collections: RwLock::new(collections),
        })
    }

    pub async fn load_seed_file(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("Failed to read seed file {}", path.display()))?;
        let seed: Value = serde_json::from_str(&raw).wrap_err("Seed file is not valid JSON")?;
        let store = Self::from_seed(seed)?;
        info!("Loaded seed data from {}", path.display());
        Ok(store)
    }

    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch_collection(&self, collection: &str, query: &Query) -> StudyResult<Vec<Record>> {
        let records = self
            .collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default();
        tracing::debug!("Fetched {} documents from {}", records.len(), collection);
        Ok(query.apply(records))
    }

    async fn get_document(&self, collection: &str, id: &str) -> StudyResult<Option<Record>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.iter().find(|r| r.id == id))
            .cloned())
    }

    async fn add_document(&self, collection: &str, fields: Map<String, Value>) -> StudyResult<String> {
        let id = Uuid::new_v4().to_string();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(Record::new(id.clone(), fields));
        Ok(id)
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StudyResult<()> {
        let mut collections = self.collections.write().await;
        let records = collections.entry(collection.to_string()).or_default();
        match records.iter_mut().find(|r| r.id == id) {
            Some(existing) => existing.fields = fields,
            None => records.push(Record::new(id, fields)),
        }
        Ok(())
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StudyResult<()> {
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|r| r.id == id))
            .ok_or_else(|| StudyError::NotFound(format!("{}/{} not found", collection, id)))?;
        existing.fields.extend(fields);
        Ok(())
    }
}
