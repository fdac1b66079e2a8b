use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::color::ColorTag;
use crate::record::{Record, fields};

pub const UNNAMED_GROUP: &str = "Unnamed";
pub const NO_DESCRIPTION: &str = "No Description";
pub const NO_MEMBERS: &str = "No members yet";

/// Display-ready view of a stored group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDisplay {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: ColorTag,
    pub member_count_display: String,
    pub admin_name: Option<String>,
    pub image_url: Option<String>,
}

impl GroupDisplay {
    /// Never fails: missing fields are replaced with fixed fallbacks.
    pub fn from_record(record: &Record) -> Self {
        let member_count_display = match record.u64_field(fields::MEMBER_COUNT) {
            Some(1) => "1 member".to_string(),
            Some(n) if n > 0 => format!("{} members", n),
            _ => NO_MEMBERS.to_string(),
        };

        Self {
            id: record.id.clone(),
            name: record
                .text_field(fields::GROUP_NAME)
                .unwrap_or(UNNAMED_GROUP)
                .to_string(),
            description: record
                .text_field(fields::GROUP_DESCRIPTION)
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            color: ColorTag::parse_or_fallback(record.str_field(fields::SELECTED_COLOR)),
            member_count_display,
            admin_name: record.text_field(fields::ADMIN_NAME).map(str::to_string),
            image_url: record.text_field(fields::GROUP_IMAGE_URL).map(str::to_string),
        }
    }
}

/// Input of the group creation form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: String,
    pub admin_name: String,
    pub color: ColorTag,
    /// JPEG bytes of the optional group image.
    #[serde(skip)]
    pub image: Option<Vec<u8>>,
}

/// Stored shape of a newly created group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGroupDocument {
    #[serde(rename = "groupName")]
    pub name: String,
    #[serde(rename = "groupDescription")]
    pub description: String,
    #[serde(rename = "adminName")]
    pub admin_name: String,
    #[serde(rename = "selectedColor")]
    pub selected_color: ColorTag,
    #[serde(rename = "groupImageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
