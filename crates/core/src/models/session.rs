use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{StudyError, StudyResult};
use crate::record::{Record, fields};

pub const UNTITLED_SESSION: &str = "Untitled Session";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub session_name: String,
    pub group_name: String,
    pub session_date: DateTime<Utc>,
    pub owner_user_id: Option<String>,
}

impl Session {
    /// Decodes a stored session. Only `sessionDate` is required; a missing
    /// `sessionName` falls back to [`UNTITLED_SESSION`] and a missing
    /// `groupName` decodes as an empty string.
    pub fn from_record(record: &Record) -> StudyResult<Self> {
        let session_date = match record.get(fields::SESSION_DATE) {
            None => return Err(StudyError::malformed(&record.id, "missing sessionDate")),
            Some(_) => record
                .timestamp_field(fields::SESSION_DATE)
                .ok_or_else(|| StudyError::malformed(&record.id, "unparseable sessionDate"))?,
        };

        let session_name = record
            .text_field(fields::SESSION_NAME)
            .unwrap_or(UNTITLED_SESSION)
            .to_string();

        Ok(Self {
            id: record.id.clone(),
            session_name,
            group_name: record
                .str_field(fields::GROUP_NAME)
                .unwrap_or_default()
                .to_string(),
            session_date,
            owner_user_id: record.text_field(fields::OWNER_USER_ID).map(str::to_string),
        })
    }
}

/// Input of the session creation form; serializes to the stored document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub session_name: String,
    pub group_name: String,
    pub session_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_user_id: Option<String>,
}
