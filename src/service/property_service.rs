use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use chrono::Utc;
use tracing::{error, info, instrument};

use crate::dto::property_dto::{
    PropertyDto, PropertySearchItemDto, PropertySearchResponseDto, SubmitPropertyRequest,
};
use crate::repository::property_repo::PropertyRepository;
use crate::service::matching::{matches, sort_by_match, PropertyFilter};
use crate::util::error::ServiceError;
use crate::util::sheets::SheetLogAppender;

/// Fixed column order of the spreadsheet log row. The attachment columns
/// are singular; the first attachment is logged there.
pub fn sheet_row(listing: &SubmitPropertyRequest) -> Vec<String> {
    let (attachment_base64, attachment_type) = listing
        .attachments
        .first()
        .map(|a| (a.data_base64.clone(), a.content_type.clone()))
        .unwrap_or_default();

    vec![
        listing.date.clone(),
        listing.property_for.clone(),
        listing.condition.clone(),
        listing.property_type.clone(),
        listing.bedroom.clone(),
        listing.bath.clone(),
        listing.size.clone(),
        listing.facing.clone(),
        listing.total_floor.clone(),
        listing.floor_no.clone(),
        listing.road.clone(),
        listing.furnished.clone(),
        listing.parking.clone(),
        listing.contact.clone(),
        listing.reference_by.clone(),
        listing.project_name.clone(),
        listing.address.clone(),
        listing.additional.clone(),
        listing.min_price.clone(),
        listing.max_price.clone(),
        attachment_base64,
        attachment_type,
    ]
}

/// Textual listing id derived from the submission timestamp: the last six
/// digits of the current millis. Deliberately not collision-checked.
pub fn default_listing_id() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let start = millis.len().saturating_sub(6);
    millis[start..].to_string()
}

#[async_trait]
pub trait PropertyService: Send + Sync {
    /// Load-everything search: the whole collection ordered matched-first,
    /// with running totals for display.
    async fn search(&self, filter: PropertyFilter) -> Result<PropertySearchResponseDto, ServiceError>;

    /// Property form submission: default the id/date, validate attachments,
    /// append the row to the spreadsheet log, then store the record.
    async fn submit(&self, listing: SubmitPropertyRequest) -> Result<PropertyDto, ServiceError>;
}

pub struct PropertyServiceImpl {
    pub property_repo: Arc<dyn PropertyRepository>,
    /// Absent when the Sheets secrets are not configured; submissions then
    /// fail with a structured error instead of crashing at startup.
    pub sheet_log: Option<Arc<dyn SheetLogAppender>>,
}

impl PropertyServiceImpl {
    pub fn new(property_repo: Arc<dyn PropertyRepository>, sheet_log: Option<Arc<dyn SheetLogAppender>>) -> Self {
        Self { property_repo, sheet_log }
    }
}

#[async_trait]
impl PropertyService for PropertyServiceImpl {
    #[instrument(skip(self, filter))]
    async fn search(&self, filter: PropertyFilter) -> Result<PropertySearchResponseDto, ServiceError> {
        let mut properties = self.property_repo.list().await?;
        sort_by_match(&mut properties, &filter);

        let total = properties.len();
        let items: Vec<PropertySearchItemDto> = properties
            .into_iter()
            .map(|p| PropertySearchItemDto {
                matched: matches(&filter, &p),
                property: PropertyDto::from(p),
            })
            .collect();
        let match_count = items.iter().filter(|i| i.matched).count();

        info!("Search over {} properties, {} matching", total, match_count);
        Ok(PropertySearchResponseDto {
            total,
            match_count,
            properties: items,
        })
    }

    #[instrument(skip(self, listing))]
    async fn submit(&self, mut listing: SubmitPropertyRequest) -> Result<PropertyDto, ServiceError> {
        info!("Property form submitted");

        // Boundary defaulting, matching the form's on-mount behavior.
        if listing.id.trim().is_empty() {
            listing.id = default_listing_id();
        }
        if listing.date.trim().is_empty() {
            listing.date = Utc::now().format("%Y-%m-%d").to_string();
        }

        // Every attachment must be valid base64; one bad file fails the
        // whole submission rather than being silently dropped.
        let engine = &base64::engine::general_purpose::STANDARD;
        for attachment in &listing.attachments {
            if let Err(e) = engine.decode(attachment.data_base64.as_bytes()) {
                error!("Attachment {:?} is not valid base64: {}", attachment.file_name, e);
                return Err(ServiceError::InvalidInput(format!(
                    "Attachment {} is not valid base64: {}",
                    attachment.file_name, e
                )));
            }
        }

        // Spreadsheet log first: a failed append leaves nothing stored so
        // the caller can retry the unchanged form.
        let sheet_log = self.sheet_log.as_ref().ok_or_else(|| {
            error!("Property submission rejected: Sheets credentials are not configured");
            ServiceError::InternalError(
                "Spreadsheet log is not configured: missing Google Sheets credentials".to_string(),
            )
        })?;
        sheet_log
            .append_row(sheet_row(&listing))
            .await
            .map_err(|e| ServiceError::InternalError(format!("Spreadsheet append failed: {}", e)))?;

        let stored = self.property_repo.insert(listing.into_property()).await?;
        info!("Property listing stored with id {}", stored.id);
        Ok(PropertyDto::from(stored))
    }
}
