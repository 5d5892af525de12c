use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Listed real-estate unit as stored in the `properties` collection.
///
/// Column names are the store's underscore convention; the API uses
/// camelCase and the two are mapped explicitly in `dto::property_dto`.
/// Commercial fields are free-text numeric strings, so comparisons go
/// through `service::matching::effective_price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,

    /// Business identifier, timestamp-derived at submission time and never
    /// reassigned. Not collision-checked.
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
    /// Explicit asking price; preferred over min/max when present and numeric.
    #[serde(default)]
    pub price: Option<String>,
}

impl Property {
    /// Numeric view of the business id for descending-by-id ordering.
    /// Non-numeric ids sort as 0.
    pub fn id_num(&self) -> i64 {
        self.id.trim().parse::<i64>().unwrap_or(0)
    }
}

impl Default for Property {
    fn default() -> Self {
        Property {
            object_id: None,
            id: String::new(),
            date: String::new(),
            property_for: String::new(),
            property_type: String::new(),
            sub_type: String::new(),
            condition: String::new(),
            bedroom: String::new(),
            bath: String::new(),
            size: String::new(),
            facing: String::new(),
            total_floor: String::new(),
            floor_no: String::new(),
            road: String::new(),
            furnished: String::new(),
            parking: String::new(),
            contact: String::new(),
            reference_by: String::new(),
            project_name: String::new(),
            address: String::new(),
            additional: String::new(),
            min_price: String::new(),
            max_price: String::new(),
            price: None,
        }
    }
}
