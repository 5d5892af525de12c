use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tokio::sync::broadcast;
use tracing::{error, info, instrument};

use crate::dto::demand_dto::{
    CreateDemandRequest, DemandDto, DemandListResponseDto, DemandShareDto, DemandWithMatchesDto,
};
use crate::dto::property_dto::PropertyDto;
use crate::model::demand::{Demand, DEMAND_CLOSED};
use crate::repository::demand_repo::DemandRepository;
use crate::repository::property_repo::PropertyRepository;
use crate::service::matching::match_set;
use crate::util::error::ServiceError;
use crate::util::events::{DemandChange, DemandChangeAction, DemandEvents};

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn or_zero(value: &str) -> &str {
    if value.is_empty() { "0" } else { value }
}

/// Plain-text client-requirement summary handed to the messaging deep link.
pub fn share_text(demand: &Demand) -> String {
    format!(
        "Client Requirement:\nName: {}\nMobile: {}\nProperty For: {}\nType: {}\nBedroom: {}\nBudget: ₹{} - ₹{}\nLocality: {}",
        demand.name,
        demand.mobile,
        or_dash(&demand.property_for),
        or_dash(&demand.property_type),
        or_dash(&demand.bedroom),
        or_zero(&demand.min_price),
        or_zero(&demand.max_price),
        or_dash(&demand.locality),
    )
}

#[async_trait]
pub trait DemandService: Send + Sync {
    /// All demands newest-first, each carrying its inventory match set.
    async fn list(&self) -> Result<DemandListResponseDto, ServiceError>;
    async fn create(&self, request: CreateDemandRequest) -> Result<DemandDto, ServiceError>;
    async fn close(&self, id: i64) -> Result<DemandDto, ServiceError>;
    /// Only Closed demands may be deleted (route-level admin gate applies).
    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
    async fn share(&self, id: i64) -> Result<DemandShareDto, ServiceError>;
}

pub struct DemandServiceImpl {
    pub demand_repo: Arc<dyn DemandRepository>,
    pub property_repo: Arc<dyn PropertyRepository>,
    pub events: Arc<DemandEvents>,
}

impl DemandServiceImpl {
    pub fn new(
        demand_repo: Arc<dyn DemandRepository>,
        property_repo: Arc<dyn PropertyRepository>,
        events: Arc<DemandEvents>,
    ) -> Self {
        Self { demand_repo, property_repo, events }
    }

    /// Change-notification stream for the SSE endpoint.
    pub fn subscribe(&self) -> broadcast::Receiver<DemandChange> {
        self.events.subscribe()
    }
}

#[async_trait]
impl DemandService for DemandServiceImpl {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<DemandListResponseDto, ServiceError> {
        let demands = self.demand_repo.list().await?;
        let properties = self.property_repo.list().await?;

        let total = demands.len();
        let items = demands
            .into_iter()
            .map(|demand| {
                let matched: Vec<PropertyDto> = match_set(&demand, &properties)
                    .into_iter()
                    .cloned()
                    .map(PropertyDto::from)
                    .collect();
                DemandWithMatchesDto {
                    match_count: matched.len(),
                    matches: matched,
                    demand: DemandDto::from(demand),
                }
            })
            .collect();

        info!("Listed {} demands with match sets", total);
        Ok(DemandListResponseDto { total, demands: items })
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create(&self, request: CreateDemandRequest) -> Result<DemandDto, ServiceError> {
        if request.name.trim().is_empty() {
            error!("Demand rejected: client name is empty");
            return Err(ServiceError::InvalidInput("Client name is required".to_string()));
        }

        // Creation-timestamp id, same loose scheme as property listings.
        let id = Utc::now().timestamp_millis();
        self.demand_repo.insert(request.into_demand(id)).await?;

        // The stored row, not the optimistic local copy, is the final state.
        let stored = self.demand_repo.get_by_id(id).await?;
        self.events.publish(DemandChange { action: DemandChangeAction::Created, id });
        info!("Demand {} created with status {}", stored.id, stored.status);
        Ok(DemandDto::from(stored))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn close(&self, id: i64) -> Result<DemandDto, ServiceError> {
        let updated = self.demand_repo.update_status(id, DEMAND_CLOSED).await?;
        self.events.publish(DemandChange { action: DemandChangeAction::Closed, id });
        info!("Demand {} closed", id);
        Ok(DemandDto::from(updated))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let demand = self.demand_repo.get_by_id(id).await?;
        if !demand.is_closed() {
            error!("Refusing to delete demand {}: status is {}", id, demand.status);
            return Err(ServiceError::Conflict("Only closed demands can be deleted".to_string()));
        }
        self.demand_repo.delete(id).await?;
        self.events.publish(DemandChange { action: DemandChangeAction::Deleted, id });
        info!("Demand {} deleted", id);
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn share(&self, id: i64) -> Result<DemandShareDto, ServiceError> {
        let demand = self.demand_repo.get_by_id(id).await?;
        let text = share_text(&demand);
        let whatsapp_url = format!(
            "https://wa.me/?text={}",
            utf8_percent_encode(&text, NON_ALPHANUMERIC)
        );
        Ok(DemandShareDto { text, whatsapp_url })
    }
}
