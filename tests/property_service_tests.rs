use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use resite_backend::dto::property_dto::{AttachmentDto, SubmitPropertyRequest};
use resite_backend::model::property::Property;
use resite_backend::repository::property_repo::PropertyRepository;
use resite_backend::repository::repository_error::RepositoryResult;
use resite_backend::service::matching::PropertyFilter;
use resite_backend::service::property_service::{
    default_listing_id, sheet_row, PropertyService, PropertyServiceImpl,
};
use resite_backend::util::error::ServiceError;
use resite_backend::util::sheets::{SheetLogAppender, SheetsError};

// In-memory stand-in for the Mongo-backed property collection.
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

// Records appended rows instead of calling the Sheets API.
#[derive(Default)]
struct RecordingSheetLog {
    rows: Mutex<Vec<Vec<String>>>,
    fail: bool,
}

#[async_trait]
impl SheetLogAppender for RecordingSheetLog {
    async fn append_row(&self, row: Vec<String>) -> Result<(), SheetsError> {
        if self.fail {
            return Err(SheetsError::RequestFailed("simulated outage".to_string()));
        }
        self.rows.lock().unwrap().push(row);
        Ok(())
    }
}

fn service_with(
    repo: Arc<InMemoryPropertyRepository>,
    log: Arc<RecordingSheetLog>,
) -> PropertyServiceImpl {
    PropertyServiceImpl::new(repo, Some(log))
}

fn submission(id: &str, property_type: &str, address: &str) -> SubmitPropertyRequest {
    SubmitPropertyRequest {
        id: id.to_string(),
        property_type: property_type.to_string(),
        address: address.to_string(),
        contact: "9876543210".to_string(),
        ..SubmitPropertyRequest::default()
    }
}

#[test]
fn test_default_listing_id_is_six_digits() {
    let id = default_listing_id();
    assert_eq!(id.len(), 6);
    assert!(id.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_sheet_row_column_order() {
    let mut listing = submission("123456", "Flat", "Andheri West");
    listing.date = "2026-08-30".to_string();
    listing.property_for = "Sell".to_string();
    listing.condition = "New".to_string();
    listing.bedroom = "2".to_string();
    listing.bath = "2".to_string();
    listing.size = "950".to_string();
    listing.facing = "East".to_string();
    listing.total_floor = "12".to_string();
    listing.floor_no = "7".to_string();
    listing.road = "30ft".to_string();
    listing.furnished = "Semi".to_string();
    listing.parking = "1".to_string();
    listing.reference_by = "Walk-in".to_string();
    listing.project_name = "Sunrise Heights".to_string();
    listing.additional = "Corner unit".to_string();
    listing.min_price = "4000000".to_string();
    listing.max_price = "4500000".to_string();
    listing.attachments = vec![AttachmentDto {
        file_name: "front.jpg".to_string(),
        content_type: "image/jpeg".to_string(),
        data_base64: "aGVsbG8=".to_string(),
    }];

    let row = sheet_row(&listing);
    assert_eq!(row.len(), 22);
    assert_eq!(
        row,
        vec![
            "2026-08-30",
            "Sell",
            "New",
            "Flat",
            "2",
            "2",
            "950",
            "East",
            "12",
            "7",
            "30ft",
            "Semi",
            "1",
            "9876543210",
            "Walk-in",
            "Sunrise Heights",
            "Andheri West",
            "Corner unit",
            "4000000",
            "4500000",
            "aGVsbG8=",
            "image/jpeg",
        ]
    );
}

#[test]
fn test_sheet_row_without_attachments_leaves_columns_blank() {
    let listing = submission("1", "Flat", "Andheri");
    let row = sheet_row(&listing);
    assert_eq!(row.len(), 22);
    assert_eq!(row[20], "");
    assert_eq!(row[21], "");
}

#[test]
fn test_sheet_row_logs_first_attachment_only() {
    let mut listing = submission("1", "Flat", "Andheri");
    listing.attachments = vec![
        AttachmentDto {
            file_name: "a.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data_base64: "Zmlyc3Q=".to_string(),
        },
        AttachmentDto {
            file_name: "b.png".to_string(),
            content_type: "image/png".to_string(),
            data_base64: "c2Vjb25k".to_string(),
        },
    ];
    let row = sheet_row(&listing);
    assert_eq!(row[20], "Zmlyc3Q=");
    assert_eq!(row[21], "image/jpeg");
}

#[tokio::test]
async fn test_submit_stores_listing_and_appends_row() {
    let repo = Arc::new(InMemoryPropertyRepository::default());
    let log = Arc::new(RecordingSheetLog::default());
    let service = service_with(repo.clone(), log.clone());

    let stored = service.submit(submission("654321", "Flat", "Andheri")).await.unwrap();
    assert_eq!(stored.id, "654321");

    assert_eq!(repo.properties.lock().unwrap().len(), 1);
    let rows = log.rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][3], "Flat");
}

#[tokio::test]
async fn test_submit_defaults_blank_id_and_date() {
    let repo = Arc::new(InMemoryPropertyRepository::default());
    let log = Arc::new(RecordingSheetLog::default());
    let service = service_with(repo.clone(), log);

    let stored = service.submit(submission("", "Flat", "Andheri")).await.unwrap();
    assert_eq!(stored.id.len(), 6);
    assert!(stored.id.chars().all(|c| c.is_ascii_digit()));
    // YYYY-MM-DD
    assert_eq!(stored.date.len(), 10);
    assert_eq!(&stored.date[4..5], "-");
}

#[tokio::test]
async fn test_submit_allows_duplicate_ids() {
    let repo = Arc::new(InMemoryPropertyRepository::default());
    let log = Arc::new(RecordingSheetLog::default());
    let service = service_with(repo.clone(), log);

    service.submit(submission("111111", "Flat", "Andheri")).await.unwrap();
    service.submit(submission("111111", "Villa", "Bandra")).await.unwrap();

    let stored = repo.properties.lock().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].id, stored[1].id);
}

#[tokio::test]
async fn test_submit_rejects_invalid_base64_attachment() {
    let repo = Arc::new(InMemoryPropertyRepository::default());
    let log = Arc::new(RecordingSheetLog::default());
    let service = service_with(repo.clone(), log.clone());

    let mut listing = submission("1", "Flat", "Andheri");
    listing.attachments = vec![AttachmentDto {
        file_name: "broken.jpg".to_string(),
        content_type: "image/jpeg".to_string(),
        data_base64: "not base64!!!".to_string(),
    }];

    let err = service.submit(listing).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    // Nothing logged, nothing stored.
    assert!(log.rows.lock().unwrap().is_empty());
    assert!(repo.properties.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_without_sheet_log_fails() {
    let repo = Arc::new(InMemoryPropertyRepository::default());
    let service = PropertyServiceImpl::new(repo.clone(), None);

    let err = service.submit(submission("1", "Flat", "Andheri")).await.unwrap_err();
    assert!(matches!(err, ServiceError::InternalError(_)));
    assert!(repo.properties.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_append_leaves_nothing_stored() {
    let repo = Arc::new(InMemoryPropertyRepository::default());
    let log = Arc::new(RecordingSheetLog { fail: true, ..RecordingSheetLog::default() });
    let service = service_with(repo.clone(), log);

    let err = service.submit(submission("1", "Flat", "Andheri")).await.unwrap_err();
    assert!(matches!(err, ServiceError::InternalError(_)));
    assert!(repo.properties.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_orders_matched_first_with_counts() {
    let repo = Arc::new(InMemoryPropertyRepository::default());
    {
        let mut stored = repo.properties.lock().unwrap();
        stored.push(Property {
            id: "100".to_string(),
            property_type: "Villa".to_string(),
            ..Property::default()
        });
        stored.push(Property {
            id: "200".to_string(),
            property_type: "Flat".to_string(),
            ..Property::default()
        });
        stored.push(Property {
            id: "300".to_string(),
            property_type: "Flat".to_string(),
            ..Property::default()
        });
    }
    let log = Arc::new(RecordingSheetLog::default());
    let service = service_with(repo, log);

    let filter = PropertyFilter {
        property_type: "flat".to_string(),
        ..PropertyFilter::default()
    };
    let res = service.search(filter).await.unwrap();

    assert_eq!(res.total, 3);
    assert_eq!(res.match_count, 2);
    let ids: Vec<&str> = res.properties.iter().map(|p| p.property.id.as_str()).collect();
    assert_eq!(ids, vec!["300", "200", "100"]);
    assert!(res.properties[0].matched);
    assert!(res.properties[1].matched);
    assert!(!res.properties[2].matched);
}

#[tokio::test]
async fn test_search_with_empty_filter_returns_whole_inventory() {
    let repo = Arc::new(InMemoryPropertyRepository::default());
    {
        let mut stored = repo.properties.lock().unwrap();
        stored.push(Property { id: "1".to_string(), ..Property::default() });
        stored.push(Property { id: "2".to_string(), ..Property::default() });
    }
    let log = Arc::new(RecordingSheetLog::default());
    let service = service_with(repo, log);

    let res = service.search(PropertyFilter::default()).await.unwrap();
    assert_eq!(res.total, 2);
    assert_eq!(res.match_count, 2);
}
