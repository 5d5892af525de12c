use axum::{Router, routing::{get, put}, middleware};
use crate::handler::admin_handler::{
    list_users_handler,
    update_user_role_handler,
};
use std::sync::Arc;
use crate::service::user_service::UserServiceImpl;
use crate::middlewares::auth_middleware::{admin_auth, AuthState};

pub fn admin_router(service: Arc<UserServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    // Admin-protected role editor
    Router::new()
        .route("/admin/users", get(list_users_handler))
        .route("/admin/users/{id}/role", put(update_user_role_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, admin_auth))
        .with_state(service)
}
