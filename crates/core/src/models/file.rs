use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{Record, collections, fields};

pub const UNKNOWN_FILE_NAME: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    Note,
    Recording,
}

impl FileKind {
    pub fn collection(&self) -> &'static str {
        match self {
            FileKind::Note => collections::USER_FILES,
            FileKind::Recording => collections::RECORDINGS,
        }
    }

    pub fn storage_prefix(&self) -> &'static str {
        match self {
            FileKind::Note => "files",
            FileKind::Recording => "recordings",
        }
    }

    pub fn default_extension(&self) -> &'static str {
        match self {
            FileKind::Note => "pdf",
            FileKind::Recording => "m4a",
        }
    }
}

/// Metadata of an uploaded note or recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: String,
    pub user_id: String,
    pub file_name: String,
    /// Storage path of the blob.
    pub file_url: String,
    pub created_at: DateTime<Utc>,
    pub kind: FileKind,
}

impl StoredFile {
    pub fn from_record(record: &Record, kind: FileKind, fetched_at: DateTime<Utc>) -> Self {
        Self {
            id: record.id.clone(),
            user_id: record
                .str_field(fields::USER_ID)
                .unwrap_or_default()
                .to_string(),
            file_name: record
                .text_field(fields::FILE_NAME)
                .unwrap_or(UNKNOWN_FILE_NAME)
                .to_string(),
            file_url: record
                .str_field(fields::FILE_URL)
                .unwrap_or_default()
                .to_string(),
            created_at: record
                .timestamp_field(fields::CREATED_AT)
                .unwrap_or(fetched_at),
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFileDocument {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "fileURL")]
    pub file_url: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
