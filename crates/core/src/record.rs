use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{StudyError, StudyResult};

/// Collection names shared with the hosted store.
pub mod collections {
    pub const GROUPS: &str = "groups";
    pub const SESSIONS: &str = "sessions";
    pub const USERS: &str = "users";
    pub const USER_FILES: &str = "user_files";
    pub const RECORDINGS: &str = "recordings";
}

/// Field names as they appear in stored documents.
pub mod fields {
    pub const SESSION_NAME: &str = "sessionName";
    pub const SESSION_DATE: &str = "sessionDate";
    pub const GROUP_NAME: &str = "groupName";
    pub const OWNER_USER_ID: &str = "ownerUserId";

    pub const GROUP_DESCRIPTION: &str = "groupDescription";
    pub const SELECTED_COLOR: &str = "selectedColor";
    pub const ADMIN_NAME: &str = "adminName";
    pub const GROUP_IMAGE_URL: &str = "groupImageUrl";
    pub const MEMBER_COUNT: &str = "memberCount";
    pub const CREATED_AT: &str = "createdAt";

    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const LOCATION: &str = "location";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const COORDINATE: &str = "coordinate";
    pub const PIN_COLOR: &str = "pinColor";
    pub const LOCATION_VISIBLE: &str = "locationVisible";

    pub const USER_ID: &str = "userID";
    pub const FILE_NAME: &str = "fileName";
    pub const FILE_URL: &str = "fileURL";
}

/// A raw document returned by the remote store.
///
/// Field values are loosely typed; the typed accessors return `None` for both
/// missing and wrongly-typed fields so callers can decide on a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Builds a record from a JSON object. Non-object values produce an empty record.
    pub fn from_value(id: impl Into<String>, value: Value) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(id, fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Like [`Record::str_field`] but treats blank strings as missing.
    pub fn text_field(&self, key: &str) -> Option<&str> {
        self.str_field(key).filter(|s| !s.trim().is_empty())
    }

    pub fn f64_field(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn u64_field(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn timestamp_field(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get(key).and_then(parse_timestamp)
    }
}

/// Parses a stored timestamp.
///
/// Accepted shapes are RFC 3339 strings, integer Unix seconds, and
/// `{ "seconds": .., "nanoseconds": .. }` objects (the underscore-prefixed
/// export form is accepted as well).
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = match map.get("nanoseconds").or_else(|| map.get("_nanoseconds")) {
                Some(v) => v.as_u64()?,
                None => 0,
            };
            if nanos >= 1_000_000_000 {
                return None;
            }
            Utc.timestamp_opt(seconds, nanos as u32).single()
        }
        _ => None,
    }
}

/// Canonical stored form of an instant.
pub fn timestamp_value(instant: DateTime<Utc>) -> Value {
    Value::String(instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// Serializes a request struct into document fields.
pub fn into_fields<T: Serialize>(value: &T) -> StudyResult<Map<String, Value>> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(StudyError::Validation(
            "Document must serialize to an object".to_string(),
        )),
        Err(e) => Err(StudyError::Internal(Box::new(e))),
    }
}
