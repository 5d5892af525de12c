use axum::{
    extract::{Json, Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::dto::property_dto::{PropertySearchQuery, SubmitPropertyRequest};
use crate::service::matching::PropertyFilter;
use crate::service::property_service::{PropertyService, PropertyServiceImpl};
use crate::util::error::HandlerError;

// Inventory search; an empty query returns the whole inventory newest-first.
pub async fn search_properties_handler(
    State(service): State<Arc<PropertyServiceImpl>>,
    Query(query): Query<PropertySearchQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let filter = PropertyFilter::from(query);
    let res = service.search(filter).await?;
    Ok(Json(res))
}

// Listing intake: logs to the spreadsheet first, then stores the listing.
pub async fn submit_property_handler(
    State(service): State<Arc<PropertyServiceImpl>>,
    Json(payload): Json<SubmitPropertyRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.submit(payload).await?;
    Ok(Json(res))
}
