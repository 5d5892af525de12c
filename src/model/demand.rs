use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const DEMAND_OPEN: &str = "Open";
pub const DEMAND_CLOSED: &str = "Closed";

/// Client requirement as stored in the `demands` collection.
///
/// Status is monotonic: created Open, closed once, deleted only when Closed.
/// bedroom/bath/facing/size/condition are collected but intentionally not
/// used as match constraints (loose matching by budget + type + locality).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demand {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,

    /// Business identifier, creation-timestamp millis, never reassigned.
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub property_for: String,
    #[serde(rename = "type", default)]
    pub property_type: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub bedroom: String,
    #[serde(default)]
    pub bath: String,
    #[serde(default)]
    pub facing: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub lead: String,
    #[serde(default)]
    pub min_price: String,
    #[serde(default)]
    pub max_price: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub followup: String,
    pub status: String,
}

impl Demand {
    pub fn is_closed(&self) -> bool {
        self.status == DEMAND_CLOSED
    }
}
