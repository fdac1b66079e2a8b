use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use studyconnect_core::{
    errors::{StudyError, StudyResult},
    store::BlobStorage,
};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::info;

/// Rejects empty, absolute and parent-relative blob paths.
fn validate_blob_path(path: &str) -> StudyResult<&Path> {
    let candidate = Path::new(path);
    let valid = !path.is_empty()
        && candidate
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if !valid {
        return Err(StudyError::Storage(format!("Invalid blob path: {:?}", path)));
    }
    Ok(candidate)
}

/// Stores blobs as plain files under a root directory.
///
/// Each blob lives at `{root}/{path}`; the returned URL is a `file://` URL.
pub struct FsBlobStorage {
    root: PathBuf,
}

impl FsBlobStorage {
    pub async fn new(root: PathBuf) -> eyre::Result<Self> {
        fs::create_dir_all(&root).await?;
        let root = fs::canonicalize(&root).await?;
        info!("Blob storage directory: {}", root.display());
        Ok(Self { root })
    }

    pub fn blob_path(&self, path: &str) -> StudyResult<PathBuf> {
        Ok(self.root.join(validate_blob_path(path)?))
    }
}

#[async_trait]
impl BlobStorage for FsBlobStorage {
    async fn put_blob(&self, path: &str, bytes: Vec<u8>) -> StudyResult<String> {
        let target = self.blob_path(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StudyError::Storage(e.to_string()))?;
        }
        fs::write(&target, &bytes)
            .await
            .map_err(|e| StudyError::Storage(e.to_string()))?;

        tracing::debug!("Stored blob {} ({} bytes)", path, bytes.len());
        Ok(format!("file://{}", target.display()))
    }

    async fn get_blob(&self, path: &str) -> StudyResult<Vec<u8>> {
        let target = self.blob_path(path)?;
        fs::read(&target).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StudyError::NotFound(format!("Blob {} not found", path)),
            _ => StudyError::Storage(e.to_string()),
        })
    }
}

/// Keeps blobs in memory; URLs use the `memory://` scheme.
#[derive(Debug, Default)]
pub struct MemoryBlobStorage {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, path: &str) -> bool {
        self.blobs.read().await.contains_key(path)
    }
}

#[async_trait]
impl BlobStorage for MemoryBlobStorage {
    async fn put_blob(&self, path: &str, bytes: Vec<u8>) -> StudyResult<String> {
        validate_blob_path(path)?;
        self.blobs.write().await.insert(path.to_string(), bytes);
        Ok(format!("memory://{}", path))
    }

    async fn get_blob(&self, path: &str) -> StudyResult<Vec<u8>> {
        self.blobs
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| StudyError::NotFound(format!("Blob {} not found", path)))
    }
}
