use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::demand::{Demand, DEMAND_OPEN};
use crate::dto::property_dto::PropertyDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandDto {
    pub id: i64,
    pub name: String,
    pub mobile: String,
    pub reference: String,
    pub property_for: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub condition: String,
    pub bedroom: String,
    pub bath: String,
    pub facing: String,
    pub size: String,
    pub purpose: String,
    pub lead_source: String,
    pub min_price: String,
    pub max_price: String,
    pub locality: String,
    pub followup: String,
    pub status: String,
}

impl From<Demand> for DemandDto {
    fn from(d: Demand) -> Self {
        DemandDto {
            id: d.id,
            name: d.name,
            mobile: d.mobile,
            reference: d.reference,
            property_for: d.property_for,
            property_type: d.property_type,
            condition: d.condition,
            bedroom: d.bedroom,
            bath: d.bath,
            facing: d.facing,
            size: d.size,
            purpose: d.purpose,
            lead_source: d.lead,
            min_price: d.min_price,
            max_price: d.max_price,
            locality: d.locality,
            followup: d.followup,
            status: d.status,
        }
    }
}

/// New client demand. Only the client name is mandatory; everything else
/// is free text collected for the agent.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDemandRequest {
    #[validate(length(min = 1, message = "client name is required"))]
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
    pub lead_source: String,
    #[serde(default)]
    pub min_price: String,
    #[serde(default)]
    pub max_price: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub followup: String,
}

impl CreateDemandRequest {
    /// Storage-shaped record; id is assigned by the service, status starts Open.
    pub fn into_demand(self, id: i64) -> Demand {
        Demand {
            object_id: None,
            id,
            name: self.name,
            mobile: self.mobile,
            reference: self.reference,
            property_for: self.property_for,
            property_type: self.property_type,
            condition: self.condition,
            bedroom: self.bedroom,
            bath: self.bath,
            facing: self.facing,
            size: self.size,
            purpose: self.purpose,
            lead: self.lead_source,
            min_price: self.min_price,
            max_price: self.max_price,
            locality: self.locality,
            followup: self.followup,
            status: DEMAND_OPEN.to_string(),
        }
    }
}

/// One demand together with the inventory records satisfying its
/// type/locality/budget constraints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandWithMatchesDto {
    #[serde(flatten)]
    pub demand: DemandDto,
    pub match_count: usize,
    pub matches: Vec<PropertyDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandListResponseDto {
    pub total: usize,
    pub demands: Vec<DemandWithMatchesDto>,
}

/// Outbound share payload: plain-text summary plus the messaging deep link.
/// Fire-and-forget; no response is parsed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandShareDto {
    pub text: String,
    pub whatsapp_url: String,
}
