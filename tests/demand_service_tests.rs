use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use resite_backend::dto::demand_dto::CreateDemandRequest;
use resite_backend::model::demand::{Demand, DEMAND_CLOSED, DEMAND_OPEN};
use resite_backend::model::property::Property;
use resite_backend::repository::demand_repo::DemandRepository;
use resite_backend::repository::property_repo::PropertyRepository;
use resite_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use resite_backend::service::demand_service::{share_text, DemandService, DemandServiceImpl};
use resite_backend::util::error::ServiceError;
use resite_backend::util::events::{DemandChangeAction, DemandEvents};

#[derive(Default)]
struct InMemoryDemandRepository {
    demands: Mutex<Vec<Demand>>,
}

#[async_trait]
impl DemandRepository for InMemoryDemandRepository {
    async fn list(&self) -> RepositoryResult<Vec<Demand>> {
        let mut demands = self.demands.lock().unwrap().clone();
        demands.sort_by_key(|d| std::cmp::Reverse(d.id));
        Ok(demands)
    }

    async fn get_by_id(&self, id: i64) -> RepositoryResult<Demand> {
        self.demands
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Demand not found for ID: {}", id)))
    }

    async fn insert(&self, demand: Demand) -> RepositoryResult<Demand> {
        self.demands.lock().unwrap().push(demand.clone());
        Ok(demand)
    }

    async fn update_status(&self, id: i64, status: &str) -> RepositoryResult<Demand> {
        let mut demands = self.demands.lock().unwrap();
        let demand = demands
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| RepositoryError::not_found(format!("No demand found to update status for ID: {}", id)))?;
        demand.status = status.to_string();
        Ok(demand.clone())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut demands = self.demands.lock().unwrap();
        let before = demands.len();
        demands.retain(|d| d.id != id);
        if demands.len() == before {
            return Err(RepositoryError::not_found(format!("No demand found to delete for ID: {}", id)));
        }
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryPropertyRepository {
    properties: Mutex<Vec<Property>>,
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn list(&self) -> RepositoryResult<Vec<Property>> {
        Ok(self.properties.lock().unwrap().clone())
    }

    async fn insert(&self, property: Property) -> RepositoryResult<Property> {
        self.properties.lock().unwrap().push(property.clone());
        Ok(property)
    }
}

struct Fixture {
    demand_repo: Arc<InMemoryDemandRepository>,
    property_repo: Arc<InMemoryPropertyRepository>,
    service: DemandServiceImpl,
}

fn fixture() -> Fixture {
    let demand_repo = Arc::new(InMemoryDemandRepository::default());
    let property_repo = Arc::new(InMemoryPropertyRepository::default());
    let events = Arc::new(DemandEvents::default());
    let service = DemandServiceImpl::new(demand_repo.clone(), property_repo.clone(), events);
    Fixture { demand_repo, property_repo, service }
}

fn request(name: &str) -> CreateDemandRequest {
    CreateDemandRequest {
        name: name.to_string(),
        mobile: "9876543210".to_string(),
        ..CreateDemandRequest::default()
    }
}

#[tokio::test]
async fn test_create_assigns_id_and_opens_demand() {
    let fx = fixture();
    let created = fx.service.create(request("Asha")).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.status, DEMAND_OPEN);
    assert_eq!(created.name, "Asha");
    assert_eq!(fx.demand_repo.demands.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_rejects_blank_name() {
    let fx = fixture();
    let err = fx.service.create(request("   ")).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert!(fx.demand_repo.demands.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_close_marks_demand_closed() {
    let fx = fixture();
    let created = fx.service.create(request("Asha")).await.unwrap();

    let closed = fx.service.close(created.id).await.unwrap();
    assert_eq!(closed.status, DEMAND_CLOSED);
}

#[tokio::test]
async fn test_close_unknown_demand_is_not_found() {
    let fx = fixture();
    let err = fx.service.close(42).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_refuses_open_demand() {
    let fx = fixture();
    let created = fx.service.create(request("Asha")).await.unwrap();

    let err = fx.service.delete(created.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(fx.demand_repo.demands.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_closed_demand_succeeds() {
    let fx = fixture();
    let created = fx.service.create(request("Asha")).await.unwrap();
    fx.service.close(created.id).await.unwrap();

    fx.service.delete(created.id).await.unwrap();
    assert!(fx.demand_repo.demands.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_mutations_publish_change_events() {
    let fx = fixture();
    let mut receiver = fx.service.subscribe();

    let created = fx.service.create(request("Asha")).await.unwrap();
    fx.service.close(created.id).await.unwrap();
    fx.service.delete(created.id).await.unwrap();

    let first = receiver.recv().await.unwrap();
    assert_eq!(first.action, DemandChangeAction::Created);
    assert_eq!(first.id, created.id);

    let second = receiver.recv().await.unwrap();
    assert_eq!(second.action, DemandChangeAction::Closed);

    let third = receiver.recv().await.unwrap();
    assert_eq!(third.action, DemandChangeAction::Deleted);
}

#[tokio::test]
async fn test_list_carries_match_sets() {
    let fx = fixture();
    {
        let mut stored = fx.property_repo.properties.lock().unwrap();
        stored.push(Property {
            id: "100".to_string(),
            property_type: "Flat".to_string(),
            address: "2BHK in Andheri West".to_string(),
            max_price: "4200000".to_string(),
            ..Property::default()
        });
        stored.push(Property {
            id: "200".to_string(),
            property_type: "Villa".to_string(),
            address: "Bandra East".to_string(),
            max_price: "9000000".to_string(),
            ..Property::default()
        });
    }

    let mut req = request("Asha");
    req.property_type = "Flat".to_string();
    req.locality = "Andheri".to_string();
    req.max_price = "4500000".to_string();
    fx.service.create(req).await.unwrap();

    let res = fx.service.list().await.unwrap();
    assert_eq!(res.total, 1);
    assert_eq!(res.demands[0].match_count, 1);
    assert_eq!(res.demands[0].matches[0].id, "100");
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let fx = fixture();
    for demand in [
        request("First").into_demand(10),
        request("Second").into_demand(20),
        request("Third").into_demand(15),
    ] {
        fx.demand_repo.insert(demand).await.unwrap();
    }

    let res = fx.service.list().await.unwrap();
    let ids: Vec<i64> = res.demands.iter().map(|d| d.demand.id).collect();
    assert_eq!(ids, vec![20, 15, 10]);
}

#[tokio::test]
async fn test_share_builds_summary_and_deep_link() {
    let fx = fixture();
    let mut req = request("Asha");
    req.property_for = "Buy".to_string();
    req.property_type = "Flat".to_string();
    req.bedroom = "2".to_string();
    req.min_price = "4000000".to_string();
    req.max_price = "4500000".to_string();
    req.locality = "Andheri".to_string();
    let created = fx.service.create(req).await.unwrap();

    let share = fx.service.share(created.id).await.unwrap();
    assert!(share.text.starts_with("Client Requirement:\nName: Asha"));
    assert!(share.text.contains("Budget: ₹4000000 - ₹4500000"));
    assert!(share.text.contains("Locality: Andheri"));
    assert!(share.whatsapp_url.starts_with("https://wa.me/?text="));
    // The deep link payload is percent-encoded.
    assert!(!share.whatsapp_url.contains(' '));
    assert!(!share.whatsapp_url.contains('\n'));
}

#[test]
fn test_share_text_substitutes_blank_fields() {
    let demand = CreateDemandRequest {
        name: "Ravi".to_string(),
        ..CreateDemandRequest::default()
    }
    .into_demand(7);

    let text = share_text(&demand);
    assert!(text.contains("Property For: -"));
    assert!(text.contains("Type: -"));
    assert!(text.contains("Budget: ₹0 - ₹0"));
    assert!(text.contains("Locality: -"));
}
