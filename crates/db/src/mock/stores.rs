use async_trait::async_trait;
use mockall::mock;
use serde_json::{Map, Value};
use studyconnect_core::{
    errors::StudyResult,
    models::user::Coordinate,
    record::Record,
    store::{BlobStorage, DocumentStore, Geocoder, Query},
};

// Mock collaborators for testing
mock! {
    pub DocumentStore {}

    #[async_trait]
    impl DocumentStore for DocumentStore {
        async fn fetch_collection(
            &self,
            collection: &str,
            query: &Query,
        ) -> StudyResult<Vec<Record>>;

        async fn get_document(
            &self,
            collection: &str,
            id: &str,
        ) -> StudyResult<Option<Record>>;

        async fn add_document(
            &self,
            collection: &str,
            fields: Map<String, Value>,
        ) -> StudyResult<String>;

        async fn set_document(
            &self,
            collection: &str,
            id: &str,
            fields: Map<String, Value>,
        ) -> StudyResult<()>;

        async fn update_document(
            &self,
            collection: &str,
            id: &str,
            fields: Map<String, Value>,
        ) -> StudyResult<()>;
    }
}

mock! {
    pub Geocoder {}

    #[async_trait]
    impl Geocoder for Geocoder {
        async fn geocode(&self, location: &str) -> StudyResult<Coordinate>;
    }
}

mock! {
    pub BlobStorage {}

    #[async_trait]
    impl BlobStorage for BlobStorage {
        async fn put_blob(&self, path: &str, bytes: Vec<u8>) -> StudyResult<String>;

        async fn get_blob(&self, path: &str) -> StudyResult<Vec<u8>>;
    }
}
