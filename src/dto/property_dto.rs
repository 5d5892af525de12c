//! API-facing property shapes.
//!
//! The store names columns with underscores (`property_for`, `min_price`);
//! the API speaks camelCase (`propertyFor`, `minPrice`). This module is the
//! one place the two conventions are mapped, in both directions.

use serde::{Deserialize, Serialize};

use crate::model::property::Property;
use crate::service::matching::PropertyFilter;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    pub id: String,
    pub date: String,
    pub property_for: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub sub_type: String,
    pub condition: String,
    pub bedroom: String,
    pub bath: String,
    pub size: String,
    pub facing: String,
    pub total_floor: String,
    pub floor_no: String,
    pub road: String,
    pub furnished: String,
    pub parking: String,
    pub contact: String,
    pub reference_by: String,
    pub project_name: String,
    pub address: String,
    pub additional: String,
    pub min_price: String,
    pub max_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl From<Property> for PropertyDto {
    fn from(p: Property) -> Self {
        PropertyDto {
            id: p.id,
            date: p.date,
            property_for: p.property_for,
            property_type: p.property_type,
            sub_type: p.sub_type,
            condition: p.condition,
            bedroom: p.bedroom,
            bath: p.bath,
            size: p.size,
            facing: p.facing,
            total_floor: p.total_floor,
            floor_no: p.floor_no,
            road: p.road,
            furnished: p.furnished,
            parking: p.parking,
            contact: p.contact,
            reference_by: p.reference_by,
            project_name: p.project_name,
            address: p.address,
            additional: p.additional,
            min_price: p.min_price,
            max_price: p.max_price,
            price: p.price,
        }
    }
}

/// Base64-encoded attachment travelling inside the submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDto {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub content_type: String,
    pub data_base64: String,
}

/// Property form submission. Empty id/date are defaulted at the boundary;
/// constrained-choice fields are advisory only and never rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPropertyRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub property_for: String,
    #[serde(rename = "type", default)]
    pub property_type: String,
    #[serde(default)]
    pub sub_type: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub bedroom: String,
    #[serde(default)]
    pub bath: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub facing: String,
    #[serde(default)]
    pub total_floor: String,
    #[serde(default)]
    pub floor_no: String,
    #[serde(default)]
    pub road: String,
    #[serde(default)]
    pub furnished: String,
    #[serde(default)]
    pub parking: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub reference_by: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub additional: String,
    #[serde(default)]
    pub min_price: String,
    #[serde(default)]
    pub max_price: String,
    #[serde(default)]
    pub attachments: Vec<AttachmentDto>,
}

impl SubmitPropertyRequest {
    /// Storage-shaped record for the form fields; attachments travel to the
    /// spreadsheet log, not the store.
    pub fn into_property(self) -> Property {
        Property {
            object_id: None,
            id: self.id,
            date: self.date,
            property_for: self.property_for,
            property_type: self.property_type,
            sub_type: self.sub_type,
            condition: self.condition,
            bedroom: self.bedroom,
            bath: self.bath,
            size: self.size,
            facing: self.facing,
            total_floor: self.total_floor,
            floor_no: self.floor_no,
            road: self.road,
            furnished: self.furnished,
            parking: self.parking,
            contact: self.contact,
            reference_by: self.reference_by,
            project_name: self.project_name,
            address: self.address,
            additional: self.additional,
            min_price: self.min_price,
            max_price: self.max_price,
            price: None,
        }
    }
}

/// Search filter as query parameters; every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySearchQuery {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub property_for: Option<String>,
    #[serde(rename = "type", default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub bedroom: Option<String>,
    #[serde(default)]
    pub bath: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub min_price: Option<String>,
    #[serde(default)]
    pub max_price: Option<String>,
}

impl From<PropertySearchQuery> for PropertyFilter {
    fn from(q: PropertySearchQuery) -> Self {
        PropertyFilter {
            id: q.id.unwrap_or_default(),
            property_for: q.property_for.unwrap_or_default(),
            property_type: q.property_type.unwrap_or_default(),
            condition: q.condition.unwrap_or_default(),
            bedroom: q.bedroom.unwrap_or_default(),
            bath: q.bath.unwrap_or_default(),
            size: q.size.unwrap_or_default(),
            locality: q.locality.unwrap_or_default(),
            min_price: q.min_price.unwrap_or_default(),
            max_price: q.max_price.unwrap_or_default(),
        }
    }
}

/// One search result row, flagged for matched-first display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySearchItemDto {
    pub matched: bool,
    #[serde(flatten)]
    pub property: PropertyDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySearchResponseDto {
    /// Running count of all records.
    pub total: usize,
    /// Running count of records matching the current filter.
    pub match_count: usize,
    pub properties: Vec<PropertySearchItemDto>,
}
