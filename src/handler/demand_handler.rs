use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
};
use futures::{Stream, StreamExt};
use tokio_stream::wrappers::BroadcastStream;
use validator::Validate;

use crate::dto::demand_dto::CreateDemandRequest;
use crate::service::demand_service::{DemandService, DemandServiceImpl};
use crate::util::error::HandlerError;

// Demands newest-first, each with its inventory match set.
pub async fn list_demands_handler(
    State(service): State<Arc<DemandServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list().await?;
    Ok(Json(res))
}

pub async fn create_demand_handler(
    State(service): State<Arc<DemandServiceImpl>>,
    Json(payload): Json<CreateDemandRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let res = service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn close_demand_handler(
    State(service): State<Arc<DemandServiceImpl>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.close(id).await?;
    Ok(Json(res))
}

// Admin-gated at the router; the service additionally refuses open demands.
pub async fn delete_demand_handler(
    State(service): State<Arc<DemandServiceImpl>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn share_demand_handler(
    State(service): State<Arc<DemandServiceImpl>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.share(id).await?;
    Ok(Json(res))
}

/// Change-notification stream. Events carry only the action and demand id;
/// clients are expected to re-fetch the list on receipt.
pub async fn demand_events_handler(
    State(service): State<Arc<DemandServiceImpl>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(service.subscribe()).filter_map(|change| async move {
        // Lagged receivers just miss the dropped notifications.
        let change = change.ok()?;
        let event = Event::default().event("demand-change").json_data(&change).ok()?;
        Some(Ok(event))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
