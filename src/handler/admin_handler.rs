use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::dto::user_dto::UpdateRoleRequest;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;

// Role-editor listing; every registered profile with its effective role.
pub async fn list_users_handler(
    State(service): State<Arc<UserServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list_profiles().await?;
    Ok(Json(res))
}

pub async fn update_user_role_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    service.update_role(&id, &payload.role).await?;
    Ok(StatusCode::NO_CONTENT)
}
