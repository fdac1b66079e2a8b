use serde::{Deserialize, Serialize};

use crate::color::ColorTag;
use crate::errors::{StudyError, StudyResult};
use crate::record::{Record, fields};

pub const UNNAMED_USER: &str = "Unnamed";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> StudyResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(StudyError::Validation(format!(
                "Coordinate out of range: ({}, {})",
                latitude, longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Where a user says they are: either free text still to be geocoded or
/// an already resolved coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserLocation {
    Text(String),
    Coordinate(Coordinate),
}

impl UserLocation {
    /// Top-level `latitude`/`longitude` win over a nested `coordinate` object,
    /// which wins over the `location` text.
    pub fn from_record(record: &Record) -> Option<Self> {
        let top_level = match (
            record.f64_field(fields::LATITUDE),
            record.f64_field(fields::LONGITUDE),
        ) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon).ok(),
            _ => None,
        };

        let nested = || {
            let obj = record.get(fields::COORDINATE)?.as_object()?;
            let lat = obj.get(fields::LATITUDE)?.as_f64()?;
            let lon = obj.get(fields::LONGITUDE)?.as_f64()?;
            Coordinate::new(lat, lon).ok()
        };

        if let Some(coordinate) = top_level.or_else(nested) {
            return Some(UserLocation::Coordinate(coordinate));
        }

        record
            .text_field(fields::LOCATION)
            .map(|text| UserLocation::Text(text.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<UserLocation>,
    pub location_visible: bool,
    pub pin_color: Option<ColorTag>,
}

impl UserProfile {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            name: record
                .text_field(fields::NAME)
                .unwrap_or(UNNAMED_USER)
                .to_string(),
            email: record.text_field(fields::EMAIL).map(str::to_string),
            phone: record.text_field(fields::PHONE).map(str::to_string),
            location: UserLocation::from_record(record),
            location_visible: record.bool_field(fields::LOCATION_VISIBLE).unwrap_or(true),
            pin_color: record
                .str_field(fields::PIN_COLOR)
                .and_then(|tag| tag.parse().ok()),
        }
    }
}

/// A map marker for another user. Recomputed on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPin {
    pub user_id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub color: ColorTag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfileRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Partial profile update; only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_visible: Option<bool>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.location.is_none()
            && self.location_visible.is_none()
    }
}
